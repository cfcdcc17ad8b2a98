use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted trending entry, one per distinct search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    #[serde(rename = "$id")]
    pub id: String,

    #[serde(rename = "searchTerm")]
    pub search_term: String,

    pub count: i64,

    pub movie_id: i64,

    pub poster_url: String,

    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields written when a term is seen for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSearchRecord {
    #[serde(rename = "searchTerm")]
    pub search_term: String,

    pub count: i64,

    pub movie_id: i64,

    pub poster_url: String,
}

impl NewSearchRecord {
    #[must_use]
    pub fn first_occurrence(search_term: &str, movie: &Movie, image_base_url: &str) -> Self {
        Self {
            search_term: search_term.to_string(),
            count: 1,
            movie_id: movie.id,
            poster_url: build_poster_url(image_base_url, movie.poster_path.as_deref()),
        }
    }
}

/// Partial update. Only the fields that are `Some` are sent to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl SearchRecordPatch {
    #[must_use]
    pub const fn count(count: i64) -> Self {
        Self { count: Some(count) }
    }
}

/// The movie a search resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,

    #[serde(default)]
    pub poster_path: Option<String>,
}

impl Movie {
    #[must_use]
    pub fn new(id: i64, poster_path: Option<&str>) -> Self {
        Self {
            id,
            poster_path: poster_path.map(ToString::to_string),
        }
    }
}

/// Joins the image host prefix and a poster path with exactly one `/`.
///
/// A missing or empty path yields the bare prefix.
#[must_use]
pub fn build_poster_url(image_base_url: &str, poster_path: Option<&str>) -> String {
    let base = image_base_url.trim_end_matches('/');

    match poster_path.map(str::trim) {
        None | Some("") => base.to_string(),
        Some(path) if path.starts_with('/') => format!("{base}{path}"),
        Some(path) => format!("{base}/{path}"),
    }
}
