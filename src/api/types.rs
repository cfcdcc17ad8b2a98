use serde::{Deserialize, Serialize};

use crate::models::{Movie, SearchRecord};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TrendingEntryDto {
    pub id: String,
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub poster_url: String,
}

impl From<SearchRecord> for TrendingEntryDto {
    fn from(record: SearchRecord) -> Self {
        Self {
            id: record.id,
            search_term: record.search_term,
            count: record.count,
            movie_id: record.movie_id,
            poster_url: record.poster_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordSearchRequest {
    pub search_term: String,
    pub movie: Movie,
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}
