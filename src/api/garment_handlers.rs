use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};

use crate::api::handlers::{ApiResult, AppState};
use crate::api::views;
use crate::error::CatalogError;
use crate::logic::{CascadeOutcome, GarmentOperations};
use crate::model::{GarmentForm, ProductForm};
use crate::store::traits::Store;

pub async fn list_garments<S: Store>(
    State(store): State<AppState<S>>,
) -> ApiResult<Html<String>> {
    let garments = GarmentOperations::find_many(&*store).await?;
    Ok(Html(views::garments_index(&garments)))
}

pub async fn new_garment_form() -> Html<String> {
    Html(views::garment_form())
}

pub async fn create_garment<S: Store>(
    State(store): State<AppState<S>>,
    Form(form): Form<GarmentForm>,
) -> ApiResult<Redirect> {
    GarmentOperations::create(&*store, &form).await?;
    Ok(Redirect::to("/garments"))
}

pub async fn show_garment<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let populated = GarmentOperations::find_populated(&*store, &id)
        .await?
        .ok_or(CatalogError::NotFound { entity: "Garment" })?;
    Ok(Html(views::garment_show(&populated)))
}

pub async fn new_garment_product_form<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let garment = GarmentOperations::find_by_id(&*store, &id)
        .await?
        .ok_or(CatalogError::NotFound { entity: "Garment" })?;
    Ok(Html(views::garment_product_form(&garment)))
}

pub async fn create_garment_product<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> ApiResult<Redirect> {
    let (garment, _) = GarmentOperations::add_product(&*store, &id, &form).await?;
    Ok(Redirect::to(&format!("/garments/{}", garment.id)))
}

pub async fn delete_garment<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Redirect> {
    if let Some(CascadeOutcome::Failed { error }) = GarmentOperations::delete_by_id(&*store, &id).await? {
        log::warn!("Garment {} deleted but its products were not: {}", id, error);
    }
    Ok(Redirect::to("/garments"))
}
