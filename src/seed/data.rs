use anyhow::{Context, Result};

use crate::logic::ProductOperations;
use crate::model::{Product, ProductForm};
use crate::store::traits::ProductStore;

/// name, brand, price, color, category
const SEED_PRODUCTS: [(&str, &str, &str, &str, &str); 8] = [
    ("Kemeja Flanel", "Hollister", "750000", "biru muda", "baju"),
    ("Celana Chino", "Levi's", "900000", "krem", "celana"),
    ("Sweater", "Gap", "650000", "merah muda", "jaket"),
    ("Kacamata Aviator", "Ray-Ban", "2000000", "emas", "aksesoris"),
    ("Baju Renang", "Speedo", "500000", "biru tua", "baju"),
    ("Topi Baseball", "New Era", "350000", "hitam", "aksesoris"),
    ("Rompi", "Zara", "850000", "abu-abu", "baju"),
    ("Jas", "Hugo Boss", "4500000", "hitam", "baju"),
];

fn seed_form((name, brand, price, color, category): (&str, &str, &str, &str, &str)) -> ProductForm {
    ProductForm {
        name: Some(name.to_string()),
        brand: Some(brand.to_string()),
        price: Some(price.to_string()),
        color: Some(color.to_string()),
        category: Some(category.to_string()),
    }
}

/// Insert the sample catalog through the normal create path, so every
/// seeded product has passed validation.
pub async fn load_seed_data<S: ProductStore + ?Sized>(store: &S) -> Result<Vec<Product>> {
    let mut products = Vec::with_capacity(SEED_PRODUCTS.len());
    for entry in SEED_PRODUCTS {
        let product = ProductOperations::create(store, &seed_form(entry))
            .await
            .with_context(|| format!("Failed to seed product '{}'", entry.0))?;
        products.push(product);
    }
    log::info!("Seeded {} products", products.len());
    Ok(products)
}
