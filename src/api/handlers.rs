use axum::{
    extract::{Path, Query, State},
    response::{Html, Json, Redirect},
    Form,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::views;
use crate::error::{CatalogError, NormalizedError};
use crate::logic::ProductOperations;
use crate::model::{Category, ProductFilter, ProductForm};
use crate::store::traits::{GarmentStore, Store};

pub type AppState<S> = Arc<S>;
pub type ApiResult<T> = Result<T, NormalizedError>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn home() -> Html<String> {
    Html(views::home())
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
}

// Product handlers
pub async fn list_products<S: Store>(
    State(store): State<AppState<S>>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Html<String>> {
    let requested = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let (products, label) = match requested {
        None => (
            ProductOperations::find_many(&*store, &ProductFilter::all()).await?,
            "All",
        ),
        // An unknown category matches nothing rather than failing
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => (
                ProductOperations::find_many(&*store, &ProductFilter::by_category(category))
                    .await?,
                raw,
            ),
            Err(_) => (Vec::new(), raw),
        },
    };

    Ok(Html(views::products_index(&products, label)))
}

pub async fn new_product_form() -> Html<String> {
    Html(views::product_form(
        "New product",
        "/products",
        &ProductForm::default(),
    ))
}

pub async fn create_product<S: Store>(
    State(store): State<AppState<S>>,
    Form(form): Form<ProductForm>,
) -> ApiResult<Redirect> {
    let product = ProductOperations::create(&*store, &form).await?;
    Ok(Redirect::to(&format!("/products/{}", product.id)))
}

pub async fn show_product<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let product = ProductOperations::find_by_id(&*store, &id)
        .await?
        .ok_or(CatalogError::NotFound { entity: "Product" })?;

    let garment = match product.garment {
        Some(owner) => store.get_garment(&owner).await.map_err(CatalogError::from)?,
        None => None,
    };

    Ok(Html(views::product_show(&product, garment.as_ref())))
}

pub async fn edit_product_form<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let product = ProductOperations::find_by_id(&*store, &id)
        .await?
        .ok_or(CatalogError::NotFound { entity: "Product" })?;

    Ok(Html(views::product_form(
        &format!("Edit {}", product.name),
        &format!("/products/{}?_method=PUT", product.id),
        &ProductForm::from(&product),
    )))
}

pub async fn update_product<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> ApiResult<Redirect> {
    let product = ProductOperations::update_by_id(&*store, &id, &form)
        .await?
        .ok_or(CatalogError::NotFound { entity: "Product" })?;

    Ok(Redirect::to(&format!("/products/{}", product.id)))
}

pub async fn delete_product<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Redirect> {
    ProductOperations::delete_by_id(&*store, &id).await?;
    Ok(Redirect::to("/products"))
}
