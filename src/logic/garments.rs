use crate::error::{CatalogError, Result};
use crate::logic::cascade::{cascade_delete_products, CascadeOutcome};
use crate::model::{parse_id, Garment, GarmentForm, PopulatedGarment, Product, ProductForm};
use crate::store::traits::{GarmentStore, Store};

/// Garment operations, including the product link and the cascading delete
pub struct GarmentOperations;

impl GarmentOperations {
    pub async fn create<S: GarmentStore + ?Sized>(store: &S, form: &GarmentForm) -> Result<Garment> {
        let garment = form.validate()?.into_garment();
        store.insert_garment(garment.clone()).await?;
        log::debug!("Created garment {} ({})", garment.id, garment.name);
        Ok(garment)
    }

    pub async fn find_by_id<S: GarmentStore + ?Sized>(
        store: &S,
        raw_id: &str,
    ) -> Result<Option<Garment>> {
        let id = parse_id(raw_id)?;
        Ok(store.get_garment(&id).await?)
    }

    pub async fn find_many<S: GarmentStore + ?Sized>(store: &S) -> Result<Vec<Garment>> {
        Ok(store.list_garments().await?)
    }

    /// Load a garment with its products resolved, in link order
    pub async fn find_populated<S: Store + ?Sized>(
        store: &S,
        raw_id: &str,
    ) -> Result<Option<PopulatedGarment>> {
        let id = parse_id(raw_id)?;
        let Some(garment) = store.get_garment(&id).await? else {
            return Ok(None);
        };
        let found = store.get_products_by_ids(&garment.products).await?;
        Ok(Some(PopulatedGarment::assemble(garment, found)))
    }

    /// Create a product owned by a garment.
    ///
    /// The id is appended to the garment's list in a single store write, so
    /// concurrent links to one garment never drop each other. The product is
    /// saved afterwards; the two writes are not atomic and a failure in
    /// between leaves a reference that resolves to nothing.
    pub async fn add_product<S: Store + ?Sized>(
        store: &S,
        raw_garment_id: &str,
        form: &ProductForm,
    ) -> Result<(Garment, Product)> {
        let garment_id = parse_id(raw_garment_id)?;
        let product = form.validate()?.into_product(Some(garment_id));

        if !store.append_garment_product(&garment_id, &product.id).await? {
            return Err(CatalogError::NotFound { entity: "Garment" });
        }
        store.insert_product(product.clone()).await?;

        let garment = store
            .get_garment(&garment_id)
            .await?
            .ok_or(CatalogError::NotFound { entity: "Garment" })?;

        log::debug!("Linked product {} to garment {}", product.id, garment.id);
        Ok((garment, product))
    }

    /// Delete a garment, then remove the products it owned.
    ///
    /// Returns `None` if nothing was deleted. A failed cascade does not fail
    /// the call.
    pub async fn delete_by_id<S: Store + ?Sized>(
        store: &S,
        raw_id: &str,
    ) -> Result<Option<CascadeOutcome>> {
        let id = parse_id(raw_id)?;
        let deleted = store.delete_garment(&id).await?;
        let outcome = cascade_delete_products(store, deleted.as_ref()).await;

        match outcome {
            CascadeOutcome::NoGarment => Ok(None),
            outcome => Ok(Some(outcome)),
        }
    }
}
