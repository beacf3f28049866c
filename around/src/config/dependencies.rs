//! Dependency initialization and wiring for the around service.

use std::sync::Arc;

use axum::Router;
use tracing::{error, info};

use crate::config::ServiceConfig;
use crate::server::{create_app, AppState};
use crate::ServiceError;
use around_repository::{OpenSearchProvider, PostStoreProvider, PostStoreService};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The router, with the shared store client in its state.
    pub app: Router,
    /// The configuration the dependencies were built from.
    pub config: ServiceConfig,
}

impl Dependencies {
    /// Build the store client, bootstrap the index and assemble the router.
    ///
    /// Any failure here is fatal: there is no retry and no degraded mode.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServiceError)` - If the store cannot be reached or the index cannot be prepared
    pub async fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index = %config.index.index_name,
            document_type = %config.index.document_type,
            default_distance_km = config.default_distance_km,
            max_results = config.index.max_results,
            store_timeout_secs = config.store_timeout.as_secs(),
            listen_addr = %config.listen_addr,
            "Initializing dependencies"
        );

        let provider = OpenSearchProvider::new(
            &config.opensearch_url,
            config.index.clone(),
            config.store_timeout,
        )?;

        Self::with_provider(config, Arc::new(provider)).await
    }

    /// Wire the service around an already constructed provider.
    pub async fn with_provider(
        config: ServiceConfig,
        provider: Arc<dyn PostStoreProvider>,
    ) -> Result<Self, ServiceError> {
        let store = PostStoreService::new(provider);

        if let Err(e) = store.bootstrap().await {
            error!(error = %e, index = %config.index.index_name, "Failed to ensure index exists");
            return Err(e.into());
        }

        info!("Document store ready");

        let app = create_app(AppState {
            store,
            default_distance_km: config.default_distance_km,
        });

        Ok(Self { app, config })
    }
}
