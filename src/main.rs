use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use inventory::app::{self, product::handler::AppState, product::service::ProductService};
use inventory::infrastructure::{
    config::{Config, DatabaseConfig, StoreBackend},
    logger::Logger,
};
use inventory::store::{MemoryProductStore, ProductStore};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    Logger::init(&config.logging);

    info!("Starting inventory server...");

    let store = build_store(&config.database).await?;
    let state = AppState {
        product_service: ProductService::new(store),
    };
    let app = app::router(state, Duration::from_secs(config.http.timeout_seconds));

    let listener = TcpListener::bind(config.http.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.http.bind_addr()))?;
    let addr = listener.local_addr()?;

    info!("Inventory server running on http://{}", addr);
    info!("   GET    /products      - List products");
    info!("   POST   /products      - Create product");
    info!("   GET    /products/:id  - Get product");
    info!("   PUT    /products/:id  - Replace product");
    info!("   DELETE /products/:id  - Delete product");
    info!("   GET    /health        - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn ProductStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory product store");
            Ok(Arc::new(MemoryProductStore::new()))
        }
        #[cfg(feature = "database")]
        StoreBackend::Postgres => {
            use inventory::infrastructure::database::DatabaseManager;
            use inventory::store::PgProductStore;

            let db = DatabaseManager::new(config)
                .await
                .context("failed to connect to database")?;
            let store = PgProductStore::new(db.get_pool().clone());
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "database"))]
        StoreBackend::Postgres => {
            anyhow::bail!("postgres backend requires the `database` feature")
        }
    }
}
