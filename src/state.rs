use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::Config;
use crate::seed;
use crate::store::CatalogStore;

/// Shared application state.
///
/// The store is a single process-wide repository constructed here and handed
/// to every handler through axum's `State`; nothing reaches it through a
/// global. Requests mutate it last-write-wins under the lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<RwLock<CatalogStore>>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut store = CatalogStore::new();

        // One-time seeding, synchronously before the service accepts requests
        if !config.skip_seed {
            seed::populate(&mut store);
        }

        Ok(Self {
            config,
            store: Arc::new(RwLock::new(store)),
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
        })
    }
}
