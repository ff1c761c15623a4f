use crate::model::{Garment, Id, Product, ProductFilter};
use anyhow::Result;

#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> Result<()>;
    async fn get_product(&self, id: &Id) -> Result<Option<Product>>;
    /// List products matching the filter, oldest first
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>>;
    /// Fetch every stored product whose id is in `ids`. Order is unspecified.
    async fn get_products_by_ids(&self, ids: &[Id]) -> Result<Vec<Product>>;
    /// Replace a stored product. Returns false if no product has that id.
    async fn update_product(&self, product: Product) -> Result<bool>;
    /// Delete one product, returning the removed document
    async fn delete_product(&self, id: &Id) -> Result<Option<Product>>;
    /// Delete every product whose id is in `ids` in a single operation
    async fn delete_products(&self, ids: &[Id]) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait GarmentStore: Send + Sync {
    async fn insert_garment(&self, garment: Garment) -> Result<()>;
    async fn get_garment(&self, id: &Id) -> Result<Option<Garment>>;
    async fn list_garments(&self) -> Result<Vec<Garment>>;
    /// Append a product id to a garment's list in one write. Returns false
    /// if no garment has that id; an id already present is left in place.
    async fn append_garment_product(&self, garment_id: &Id, product_id: &Id) -> Result<bool>;
    /// Remove a product id from a garment's list in one write. Returns false
    /// if no garment has that id.
    async fn remove_garment_product(&self, garment_id: &Id, product_id: &Id) -> Result<bool>;
    /// Delete one garment, returning the removed document
    async fn delete_garment(&self, id: &Id) -> Result<Option<Garment>>;
}

pub trait Store: ProductStore + GarmentStore + Send + Sync {}

impl<T: ProductStore + GarmentStore + Send + Sync> Store for T {}
