//! ServerBuilder for fluent API to build the dashboard HTTP server

use super::handlers::AppState;
use super::router::build_routes;
use crate::actions::InvoiceActions;
use crate::core::auth::IdentityProvider;
use crate::core::cache::ViewCache;
use crate::core::service::InvoiceStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the dashboard server
///
/// The store and the identity provider are constructed by the caller once,
/// at process start, and shared by every request.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .with_identity_provider(StaticCredentialsProvider::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    views: ViewCache,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            identity: None,
            views: ViewCache::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared invoice store (required)
    pub fn with_shared_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the identity provider used by `/login` (required)
    pub fn with_identity_provider(mut self, provider: impl IdentityProvider + 'static) -> Self {
        self.identity = Some(Arc::new(provider));
        self
    }

    /// Use an existing view cache, e.g. to observe revalidations
    pub fn with_view_cache(mut self, views: ViewCache) -> Self {
        self.views = views;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the application state
    pub fn build_state(&mut self) -> Result<AppState> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;
        let identity = self.identity.take().ok_or_else(|| {
            anyhow::anyhow!("IdentityProvider is required. Call .with_identity_provider()")
        })?;

        let actions = InvoiceActions::new(store, Arc::new(self.views.clone()));
        Ok(AppState {
            actions,
            views: self.views.clone(),
            identity,
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let mut app = build_routes(state);
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::StaticCredentialsProvider;
    use crate::storage::InMemoryInvoiceStore;

    #[test]
    fn test_build_without_store_fails() {
        let result = ServerBuilder::new()
            .with_identity_provider(StaticCredentialsProvider::new())
            .build();
        let err = result.err().expect("store is required");
        assert!(err.to_string().contains("InvoiceStore is required"));
    }

    #[test]
    fn test_build_without_identity_provider_fails() {
        let result = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .build();
        let err = result.err().expect("identity provider is required");
        assert!(err.to_string().contains("IdentityProvider is required"));
    }

    #[test]
    fn test_fluent_chaining_full_pipeline() {
        let result = ServerBuilder::default()
            .with_store(InMemoryInvoiceStore::new())
            .with_identity_provider(StaticCredentialsProvider::new())
            .with_view_cache(ViewCache::new())
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok(), "full fluent pipeline should succeed");
    }
}
