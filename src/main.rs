//! Dashboard server binary
//!
//! Reads configuration from the environment (or the YAML file named by
//! `DASHBOARD_CONFIG`), opens the store once and serves the form actions.

use dashboard::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dashboard=debug,tower_http=debug")),
        )
        .init();

    let config = match std::env::var("DASHBOARD_CONFIG") {
        Ok(path) => DashboardConfig::from_yaml_file(&path)?,
        Err(_) => DashboardConfig::from_env()?,
    };

    let identity = identity_provider_from_env();

    let builder = ServerBuilder::new()
        .with_shared_store(open_store(&config).await?)
        .with_identity_provider(identity);

    builder.serve(&config.bind_addr).await
}

#[cfg(feature = "postgres")]
async fn open_store(config: &DashboardConfig) -> Result<Arc<dyn InvoiceStore>> {
    let pool = dashboard::storage::postgres::connect(config).await?;
    dashboard::storage::postgres::ensure_schema(&pool).await?;
    Ok(Arc::new(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn open_store(_config: &DashboardConfig) -> Result<Arc<dyn InvoiceStore>> {
    tracing::warn!("built without the `postgres` feature; invoices are kept in memory");
    Ok(Arc::new(InMemoryInvoiceStore::new()))
}

fn identity_provider_from_env() -> StaticCredentialsProvider {
    let provider = StaticCredentialsProvider::new();
    match (
        std::env::var("DASHBOARD_USER_EMAIL"),
        std::env::var("DASHBOARD_USER_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => {
            tracing::info!(%email, "registered dashboard user");
            provider.with_user(email, "Dashboard User", password)
        }
        _ => {
            tracing::warn!("no DASHBOARD_USER_EMAIL/DASHBOARD_USER_PASSWORD set; sign-in will reject everyone");
            provider
        }
    }
}
