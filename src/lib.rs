pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::{normalize, CatalogError, ErrorMessage, NormalizedError, ValidationErrors};

pub use logic::{CascadeOutcome, GarmentOperations, ProductOperations};

// Export all model types
pub use model::*;

// Export store types
pub use store::{GarmentStore, MemoryStore, PostgresStore, ProductStore, Store};

use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the catalog on an already bound listener until the server stops
pub async fn serve<S: Store + 'static>(store: Arc<S>, listener: TcpListener) -> anyhow::Result<()> {
    let app = crate::api::routes::create_app(store);
    axum::serve(listener, app).await?;
    Ok(())
}
