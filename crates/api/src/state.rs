use std::sync::Arc;

use artwork_gallery_core::access::UpdatePolicy;
use artwork_gallery_core::store::ArtworkStore;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Box<dyn ArtworkStore>,
    policy: Box<dyn UpdatePolicy>,
    config: AppConfig,
}

impl AppState {
    pub fn new(
        store: impl ArtworkStore,
        policy: impl UpdatePolicy,
        config: AppConfig,
    ) -> Self {
        Self {
            inner: Arc::new(InnerState {
                store: Box::new(store),
                policy: Box::new(policy),
                config,
            }),
        }
    }

    pub fn store(&self) -> &dyn ArtworkStore {
        self.inner.store.as_ref()
    }

    pub fn policy(&self) -> &dyn UpdatePolicy {
        self.inner.policy.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }
}
