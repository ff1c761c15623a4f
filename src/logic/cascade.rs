use serde::Serialize;

use crate::model::Garment;
use crate::store::traits::ProductStore;

/// What the cascade step did after a garment deletion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CascadeOutcome {
    /// No garment matched the delete, nothing to clean up
    NoGarment,
    /// The garment owned no products, no delete was issued
    NoProducts,
    Deleted { count: u64 },
    /// The product delete failed; the listed products may be orphaned
    Failed { error: String },
}

/// Remove every product owned by a garment that has just been deleted.
///
/// Runs after the garment row is gone, so a failure here cannot undo that
/// delete. Errors are logged and reported in the outcome, never returned.
pub async fn cascade_delete_products<S: ProductStore + ?Sized>(
    store: &S,
    deleted: Option<&Garment>,
) -> CascadeOutcome {
    let Some(garment) = deleted else {
        return CascadeOutcome::NoGarment;
    };

    if garment.products.is_empty() {
        return CascadeOutcome::NoProducts;
    }

    match store.delete_products(&garment.products).await {
        Ok(count) => {
            log::info!(
                "Deleted {} product(s) owned by garment {} ({})",
                count,
                garment.id,
                garment.name
            );
            CascadeOutcome::Deleted { count }
        }
        Err(e) => {
            log::error!(
                "Failed to delete products owned by garment {}: {:#}",
                garment.id,
                e
            );
            CascadeOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
