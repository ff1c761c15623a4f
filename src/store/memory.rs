use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::model::{Garment, Id, Product, ProductFilter};
use crate::store::traits::{GarmentStore, ProductStore};

#[derive(Debug)]
struct Row<T> {
    seq: u64,
    value: T,
}

/// Rows keyed by id, remembering insertion order for listings.
#[derive(Debug)]
struct Table<T> {
    rows: HashMap<Id, Row<T>>,
    next_seq: u64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: HashMap::new(),
            next_seq: 0,
        }
    }

    fn insert(&mut self, id: Id, value: T) -> Result<()> {
        if self.rows.contains_key(&id) {
            anyhow::bail!("duplicate key {}", id);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(id, Row { seq, value });
        Ok(())
    }

    fn get(&self, id: &Id) -> Option<T> {
        self.rows.get(id).map(|row| row.value.clone())
    }

    fn replace(&mut self, id: &Id, value: T) -> bool {
        self.modify(id, |current| *current = value)
    }

    fn modify<F: FnOnce(&mut T)>(&mut self, id: &Id, change: F) -> bool {
        match self.rows.get_mut(id) {
            Some(row) => {
                change(&mut row.value);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &Id) -> Option<T> {
        self.rows.remove(id).map(|row| row.value)
    }

    fn ordered<F: Fn(&T) -> bool>(&self, keep: F) -> Vec<T> {
        let mut rows: Vec<&Row<T>> = self.rows.values().filter(|row| keep(&row.value)).collect();
        rows.sort_by_key(|row| row.seq);
        rows.into_iter().map(|row| row.value.clone()).collect()
    }
}

/// Process-local store holding both collections behind their own locks.
///
/// Every trait method takes a lock once and releases it before returning, so
/// each call is atomic on its own and nothing is held across an await point.
#[derive(Debug)]
pub struct MemoryStore {
    products: RwLock<Table<Product>>,
    garments: RwLock<Table<Garment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Table::new()),
            garments: RwLock::new(Table::new()),
        }
    }

    pub fn product_count(&self) -> usize {
        self.products.read().rows.len()
    }

    pub fn garment_count(&self) -> usize {
        self.garments.read().rows.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: Product) -> Result<()> {
        self.products.write().insert(product.id, product)
    }

    async fn get_product(&self, id: &Id) -> Result<Option<Product>> {
        Ok(self.products.read().get(id))
    }

    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        Ok(self.products.read().ordered(|p| filter.matches(p)))
    }

    async fn get_products_by_ids(&self, ids: &[Id]) -> Result<Vec<Product>> {
        let products = self.products.read();
        Ok(ids.iter().filter_map(|id| products.get(id)).collect())
    }

    async fn update_product(&self, product: Product) -> Result<bool> {
        let id = product.id;
        Ok(self.products.write().replace(&id, product))
    }

    async fn delete_product(&self, id: &Id) -> Result<Option<Product>> {
        Ok(self.products.write().remove(id))
    }

    async fn delete_products(&self, ids: &[Id]) -> Result<u64> {
        let mut products = self.products.write();
        let removed = ids.iter().filter_map(|id| products.remove(id)).count();
        Ok(removed as u64)
    }
}

#[async_trait::async_trait]
impl GarmentStore for MemoryStore {
    async fn insert_garment(&self, garment: Garment) -> Result<()> {
        self.garments.write().insert(garment.id, garment)
    }

    async fn get_garment(&self, id: &Id) -> Result<Option<Garment>> {
        Ok(self.garments.read().get(id))
    }

    async fn list_garments(&self) -> Result<Vec<Garment>> {
        Ok(self.garments.read().ordered(|_| true))
    }

    async fn append_garment_product(&self, garment_id: &Id, product_id: &Id) -> Result<bool> {
        Ok(self
            .garments
            .write()
            .modify(garment_id, |garment| garment.link_product(*product_id)))
    }

    async fn remove_garment_product(&self, garment_id: &Id, product_id: &Id) -> Result<bool> {
        Ok(self.garments.write().modify(garment_id, |garment| {
            garment.unlink_product(product_id);
        }))
    }

    async fn delete_garment(&self, id: &Id) -> Result<Option<Garment>> {
        Ok(self.garments.write().remove(id))
    }
}
