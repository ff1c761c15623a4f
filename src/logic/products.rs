use crate::error::Result;
use crate::model::{parse_id, Product, ProductFilter, ProductForm};
use crate::store::traits::{ProductStore, Store};

/// Product operations on top of any store
pub struct ProductOperations;

impl ProductOperations {
    /// Validate and persist a standalone product
    pub async fn create<S: ProductStore + ?Sized>(store: &S, form: &ProductForm) -> Result<Product> {
        let product = form.validate()?.into_product(None);
        store.insert_product(product.clone()).await?;
        log::debug!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub async fn find_by_id<S: ProductStore + ?Sized>(
        store: &S,
        raw_id: &str,
    ) -> Result<Option<Product>> {
        let id = parse_id(raw_id)?;
        Ok(store.get_product(&id).await?)
    }

    pub async fn find_many<S: ProductStore + ?Sized>(
        store: &S,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>> {
        Ok(store.list_products(filter).await?)
    }

    /// Replace a product's fields after re-running validation.
    ///
    /// Returns `None` when the id is well formed but matches nothing.
    pub async fn update_by_id<S: ProductStore + ?Sized>(
        store: &S,
        raw_id: &str,
        form: &ProductForm,
    ) -> Result<Option<Product>> {
        let id = parse_id(raw_id)?;
        let fields = form.validate()?;

        let Some(mut product) = store.get_product(&id).await? else {
            return Ok(None);
        };
        product.apply(fields);

        if !store.update_product(product.clone()).await? {
            return Ok(None);
        }
        Ok(Some(product))
    }

    /// Delete a product and drop it from its owning garment's list.
    ///
    /// The unlink is a second write; if it fails the product stays deleted
    /// and the stale reference is skipped when the garment is populated.
    pub async fn delete_by_id<S: Store + ?Sized>(store: &S, raw_id: &str) -> Result<()> {
        let id = parse_id(raw_id)?;
        let Some(product) = store.delete_product(&id).await? else {
            return Ok(());
        };

        if let Some(owner) = product.garment {
            if let Err(e) = store.remove_garment_product(&owner, &id).await {
                log::warn!("Failed to unlink product {} from garment {}: {:#}", id, owner, e);
            }
        }
        Ok(())
    }
}
