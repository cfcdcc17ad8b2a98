use std::sync::Arc;

use crate::clients::appwrite::AppwriteClient;
use crate::config::{Config, StoreBackend};
use crate::services::{DefaultTrendingService, TrendingService, TrendingTracker};
use crate::store::{InMemoryStore, SearchRecordStore};
use tracing::info;

/// Build a shared HTTP client with reasonable defaults for API calls.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("cinetrend/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Everything built once at startup and handed to the CLI and HTTP layers.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Arc<dyn SearchRecordStore>,

    pub trending_service: Arc<dyn TrendingService>,

    pub tracker: TrendingTracker,
}

impl SharedState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn SearchRecordStore> = match config.store.backend {
            StoreBackend::Appwrite => {
                let http_client =
                    build_shared_http_client(config.appwrite.request_timeout_seconds)?;
                info!(
                    endpoint = %config.appwrite.endpoint,
                    collection = %config.appwrite.collection_id,
                    "Using Appwrite store"
                );
                Arc::new(AppwriteClient::with_shared_client(
                    http_client,
                    config.appwrite.clone(),
                ))
            }
            StoreBackend::Memory => {
                info!("Using in-memory store; records are lost on exit");
                Arc::new(InMemoryStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Wires the services around an already constructed store.
    #[must_use]
    pub fn with_store(config: Config, store: Arc<dyn SearchRecordStore>) -> Self {
        let trending_service: Arc<dyn TrendingService> = Arc::new(DefaultTrendingService::new(
            store.clone(),
            config.trending.limit,
            config.trending.image_base_url.clone(),
        ));
        let tracker = TrendingTracker::new(trending_service.clone());

        Self {
            config: Arc::new(config),
            store,
            trending_service,
            tracker,
        }
    }
}
