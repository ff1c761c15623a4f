use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};

use crate::model::{Category, Garment, Id, Product, ProductFilter};
use crate::store::traits::{GarmentStore, ProductStore};

const PRODUCT_COLUMNS: &str = "id, name, brand, price, color, category, garment_id";
const GARMENT_COLUMNS: &str = "id, name, location, contact, products";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn product_from_row(row: &PgRow) -> Result<Product> {
    let category: Option<String> = row.try_get("category")?;
    let category = category
        .map(|c| c.parse::<Category>())
        .transpose()
        .context("Stored product has an unknown category")?;

    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        brand: row.try_get("brand")?,
        price: row.try_get("price")?,
        color: row.try_get("color")?,
        category,
        garment: row.try_get("garment_id")?,
    })
}

fn garment_from_row(row: &PgRow) -> Result<Garment> {
    Ok(Garment {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        location: row.try_get("location")?,
        contact: row.try_get("contact")?,
        products: row.try_get("products")?,
    })
}

#[async_trait::async_trait]
impl ProductStore for PostgresStore {
    async fn insert_product(&self, product: Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, brand, price, color, category, garment_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price)
        .bind(&product.color)
        .bind(product.category.map(|c| c.as_str()))
        .bind(product.garment)
        .execute(&self.pool)
        .await
        .context("Failed to insert product")?;

        Ok(())
    }

    async fn get_product(&self, id: &Id) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch product")?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let rows = match filter.category {
            Some(category) => sqlx::query(&format!(
                "SELECT {} FROM products WHERE category = $1 ORDER BY seq",
                PRODUCT_COLUMNS
            ))
            .bind(category.as_str())
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query(&format!(
                "SELECT {} FROM products ORDER BY seq",
                PRODUCT_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await,
        }
        .context("Failed to list products")?;

        rows.iter().map(product_from_row).collect()
    }

    async fn get_products_by_ids(&self, ids: &[Id]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = ANY($1)",
            PRODUCT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch products by id")?;

        rows.iter().map(product_from_row).collect()
    }

    async fn update_product(&self, product: Product) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, brand = $3, price = $4, color = $5, category = $6, garment_id = $7
            WHERE id = $1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price)
        .bind(&product.color)
        .bind(product.category.map(|c| c.as_str()))
        .bind(product.garment)
        .execute(&self.pool)
        .await
        .context("Failed to update product")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, id: &Id) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to delete product")?;

        row.as_ref().map(product_from_row).transpose()
    }

    async fn delete_products(&self, ids: &[Id]) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .context("Failed to delete products")?;

        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl GarmentStore for PostgresStore {
    async fn insert_garment(&self, garment: Garment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO garments (id, name, location, contact, products)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(garment.id)
        .bind(&garment.name)
        .bind(&garment.location)
        .bind(&garment.contact)
        .bind(&garment.products)
        .execute(&self.pool)
        .await
        .context("Failed to insert garment")?;

        Ok(())
    }

    async fn get_garment(&self, id: &Id) -> Result<Option<Garment>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM garments WHERE id = $1",
            GARMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch garment")?;

        row.as_ref().map(garment_from_row).transpose()
    }

    async fn list_garments(&self) -> Result<Vec<Garment>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM garments ORDER BY seq",
            GARMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list garments")?;

        rows.iter().map(garment_from_row).collect()
    }

    async fn append_garment_product(&self, garment_id: &Id, product_id: &Id) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE garments
            SET products = CASE
                WHEN $2 = ANY(products) THEN products
                ELSE array_append(products, $2)
            END
            WHERE id = $1
            "#,
        )
        .bind(garment_id)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .context("Failed to link product to garment")?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_garment_product(&self, garment_id: &Id, product_id: &Id) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE garments SET products = array_remove(products, $2) WHERE id = $1",
        )
        .bind(garment_id)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .context("Failed to unlink product from garment")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_garment(&self, id: &Id) -> Result<Option<Garment>> {
        let row = sqlx::query(&format!(
            "DELETE FROM garments WHERE id = $1 RETURNING {}",
            GARMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to delete garment")?;

        row.as_ref().map(garment_from_row).transpose()
    }
}
