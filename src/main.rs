use shop_catalog::config::{AppConfig, StoreBackend};
use shop_catalog::store::{MemoryStore, PostgresStore, Store};
use shop_catalog::{seed, serve};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_default_env()
        .init();

    println!("Shop Catalog");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{} store={:?}",
        config.server.host, config.server.port, config.store.backend
    );

    match config.store.backend {
        StoreBackend::Postgres => {
            println!("Connecting to PostgreSQL...");
            let postgres_store =
                PostgresStore::new(&config.database_url(), config.max_connections()).await?;

            println!("Running database migrations...");
            postgres_store.migrate().await?;
            println!("Database ready");

            let store = Arc::new(postgres_store);
            run_server(store.clone(), &config).await?;
            store.close().await;
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store, data is lost on exit");
            run_server(Arc::new(MemoryStore::new()), &config).await?;
        }
    }

    Ok(())
}

async fn run_server<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    // Load seed data for demonstration (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        seed::load_seed_data(&*store).await?;
        println!("Seed data loaded successfully");
    }

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("Shop App listening on http://{}", bind_address);

    serve(store, listener).await
}
