use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::AppwriteConfig;
use crate::models::{NewSearchRecord, SearchRecord, SearchRecordPatch};
use crate::store::{Query, SearchRecordStore, StoreError};

/// Asks the server to generate the document id.
const UNIQUE_ID: &str = "unique()";

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    total: u64,
    documents: Vec<SearchRecord>,
}

#[derive(Serialize)]
struct CreateDocumentRequest<'a> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a NewSearchRecord,
}

#[derive(Serialize)]
struct UpdateDocumentRequest<'a> {
    data: &'a SearchRecordPatch,
}

#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Client for a single Appwrite Databases collection.
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    client: Client,
    config: AppwriteConfig,
}

impl AppwriteClient {
    #[must_use]
    pub const fn with_shared_client(client: Client, config: AppwriteConfig) -> Self {
        Self { client, config }
    }

    fn ensure_configured(&self) -> Result<(), StoreError> {
        let missing: Vec<&str> = [
            ("project_id", &self.config.project_id),
            ("database_id", &self.config.database_id),
            ("collection_id", &self.config.collection_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Configuration(format!(
                "missing appwrite {}",
                missing.join(", ")
            )))
        }
    }

    fn documents_url(&self, document_id: Option<&str>) -> Result<Url, StoreError> {
        self.ensure_configured()?;

        let mut url = Url::parse(&self.config.endpoint).map_err(|e| {
            StoreError::Configuration(format!("invalid endpoint {}: {e}", self.config.endpoint))
        })?;

        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                StoreError::Configuration(format!(
                    "endpoint cannot be a base URL: {}",
                    self.config.endpoint
                ))
            })?;
            segments.pop_if_empty().extend([
                "databases",
                self.config.database_id.as_str(),
                "collections",
                self.config.collection_id.as_str(),
                "documents",
            ]);
            if let Some(id) = document_id {
                segments.push(id);
            }
        }

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Response-Format", "1.5.0");

        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
            builder = builder.header("X-Appwrite-Key", key);
        }

        builder
    }

    async fn send(builder: RequestBuilder) -> Result<Response, StoreError> {
        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Network(format!("request timed out: {e}"))
            } else {
                StoreError::Network(e.to_string())
            }
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(Self::error_for_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Unexpected Appwrite response body");
            StoreError::MalformedResponse(e.to_string())
        })
    }

    fn error_for_status(status: StatusCode, body: &str) -> StoreError {
        let message = serde_json::from_str::<AppwriteErrorBody>(body).map_or_else(
            |_| body.trim().to_string(),
            |e| match e.kind {
                Some(kind) => format!("{} ({kind})", e.message),
                None => e.message,
            },
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized(message),
            StatusCode::NOT_FOUND => StoreError::NotFound(message),
            _ => StoreError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl SearchRecordStore for AppwriteClient {
    async fn list(&self, queries: &[Query]) -> Result<Vec<SearchRecord>, StoreError> {
        let mut url = self.documents_url(None)?;
        {
            let mut pairs = url.query_pairs_mut();
            for query in queries {
                pairs.append_pair("queries[]", &query.to_appwrite());
            }
        }

        debug!(queries = queries.len(), "Listing Appwrite documents");

        let response = Self::send(self.request(Method::GET, url)).await?;
        let list: DocumentList = Self::parse(response).await?;

        debug!(
            total = list.total,
            returned = list.documents.len(),
            "Listed Appwrite documents"
        );

        Ok(list.documents)
    }

    async fn update(
        &self,
        id: &str,
        patch: &SearchRecordPatch,
    ) -> Result<SearchRecord, StoreError> {
        let url = self.documents_url(Some(id))?;

        debug!(document_id = %id, "Updating Appwrite document");

        let response = Self::send(
            self.request(Method::PATCH, url)
                .json(&UpdateDocumentRequest { data: patch }),
        )
        .await?;

        Self::parse(response).await
    }

    async fn create(&self, record: &NewSearchRecord) -> Result<SearchRecord, StoreError> {
        let url = self.documents_url(None)?;

        debug!(search_term = %record.search_term, "Creating Appwrite document");

        let response = Self::send(self.request(Method::POST, url).json(&CreateDocumentRequest {
            document_id: UNIQUE_ID,
            data: record,
        }))
        .await?;

        Self::parse(response).await
    }
}
