use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::api::method_override::method_override;
use crate::api::{garment_handlers, handlers};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/", get(handlers::home))
        // Health check
        .route("/health", get(handlers::health_check))
        // Products
        .route("/products", get(handlers::list_products::<S>))
        .route("/products", post(handlers::create_product::<S>))
        .route("/products/create", get(handlers::new_product_form))
        .route("/products/:id", get(handlers::show_product::<S>))
        .route("/products/:id", put(handlers::update_product::<S>))
        .route("/products/:id", delete(handlers::delete_product::<S>))
        .route("/products/:id/edit", get(handlers::edit_product_form::<S>))
        // Garments
        .route("/garments", get(garment_handlers::list_garments::<S>))
        .route("/garments", post(garment_handlers::create_garment::<S>))
        .route("/garments/create", get(garment_handlers::new_garment_form))
        .route("/garments/:id", get(garment_handlers::show_garment::<S>))
        .route("/garments/:id", delete(garment_handlers::delete_garment::<S>))
        .route(
            "/garments/:id/products/create",
            get(garment_handlers::new_garment_product_form::<S>),
        )
        .route(
            "/garments/:id/products",
            post(garment_handlers::create_garment_product::<S>),
        )
}

/// Build the complete application around a store handle.
///
/// The routed app is mounted as the fallback of an outer router so that the
/// method override runs before route matching.
pub fn create_app<S: Store + 'static>(store: Arc<S>) -> Router {
    let routes = create_router::<S>()
        .with_state(store)
        .nest_service("/public", ServeDir::new("public"));

    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn(method_override))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{GarmentOperations, ProductOperations};
    use crate::model::{GarmentForm, ProductForm};
    use crate::store::{MemoryStore, ProductStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    async fn send(app: Router, request: Request<Body>) -> Response {
        match app.oneshot(request).await {
            Ok(response) => response,
            Err(err) => match err {},
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap_or_else(|err| panic!("failed to build request: {err}"))
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|err| panic!("failed to build request: {err}"))
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap_or_else(|err| panic!("failed to read response body: {err}"));
        String::from_utf8(bytes.to_vec()).unwrap_or_else(|err| panic!("body is not UTF-8: {err}"))
    }

    fn location(response: &Response) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    fn sweater() -> ProductForm {
        ProductForm {
            name: Some("Sweater".to_string()),
            brand: Some("Gap".to_string()),
            price: Some("650000".to_string()),
            color: Some("merah muda".to_string()),
            category: Some("jaket".to_string()),
        }
    }

    #[tokio::test]
    async fn health_endpoint_reports_healthy() {
        let app = create_app(Arc::new(MemoryStore::new()));
        let response = send(app, get_request("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("healthy"));
    }

    #[tokio::test]
    async fn create_product_redirects_to_show_page() {
        let store = Arc::new(MemoryStore::new());
        let app = create_app(store.clone());

        let response = send(
            app,
            form_post(
                "/products",
                "name=Kemeja+Flanel&brand=Hollister&price=750000&color=biru+muda&category=baju",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let products = store.list_products(&Default::default()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(location(&response), format!("/products/{}", products[0].id));
    }

    #[tokio::test]
    async fn invalid_category_is_a_plain_text_400() {
        let store = Arc::new(MemoryStore::new());
        let app = create_app(store.clone());

        let response = send(
            app,
            form_post("/products", "name=Sneakers&brand=Nike&price=1&color=putih&category=shoes"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(
            body_text(response).await,
            "`shoes` is not a valid enum value for path `category`."
        );
        assert_eq!(store.product_count(), 0);
    }

    #[tokio::test]
    async fn malformed_product_id_is_400() {
        let app = create_app(Arc::new(MemoryStore::new()));
        let response = send(app, get_request("/products/not-an-id")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Product ID not found");
    }

    #[tokio::test]
    async fn unknown_product_id_is_404() {
        let app = create_app(Arc::new(MemoryStore::new()));
        let uri = format!("/products/{}", crate::model::generate_id());
        let response = send(app, get_request(&uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Product not found");
    }

    #[tokio::test]
    async fn list_filters_by_category() {
        let store = Arc::new(MemoryStore::new());
        ProductOperations::create(&*store, &sweater()).await.unwrap();
        let mut rompi = sweater();
        rompi.name = Some("Rompi".to_string());
        rompi.category = Some("baju".to_string());
        ProductOperations::create(&*store, &rompi).await.unwrap();

        let body = body_text(send(create_app(store.clone()), get_request("/products")).await).await;
        assert!(body.contains("<strong>All</strong>"));
        assert!(body.contains("Sweater") && body.contains("Rompi"));

        let body = body_text(
            send(create_app(store.clone()), get_request("/products?category=jaket")).await,
        )
        .await;
        assert!(body.contains("<strong>jaket</strong>"));
        assert!(body.contains("Sweater") && !body.contains("Rompi"));

        let body = body_text(
            send(create_app(store), get_request("/products?category=shoes")).await,
        )
        .await;
        assert!(body.contains("No products yet."));
    }

    #[tokio::test]
    async fn method_override_routes_put_and_delete() {
        let store = Arc::new(MemoryStore::new());
        let product = ProductOperations::create(&*store, &sweater()).await.unwrap();

        let response = send(
            create_app(store.clone()),
            form_post(
                &format!("/products/{}?_method=PUT", product.id),
                "name=Sweater+Rajut&brand=Gap&price=700000&color=merah+muda&category=jaket",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/products/{}", product.id));
        let updated = store.get_product(&product.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Sweater Rajut");
        assert_eq!(updated.price, 700000.0);

        let response = send(
            create_app(store.clone()),
            form_post(&format!("/products/{}?_method=DELETE", product.id), ""),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/products");
        assert_eq!(store.product_count(), 0);
    }

    #[tokio::test]
    async fn encoded_method_override_is_decoded() {
        let store = Arc::new(MemoryStore::new());
        let product = ProductOperations::create(&*store, &sweater()).await.unwrap();

        let response = send(
            create_app(store.clone()),
            form_post(&format!("/products/{}?_method=%44ELETE", product.id), ""),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/products");
        assert_eq!(store.product_count(), 0);
    }

    #[tokio::test]
    async fn garment_delete_cascades_over_http() {
        let store = Arc::new(MemoryStore::new());
        let garment = GarmentOperations::create(
            &*store,
            &GarmentForm {
                name: Some("Acme".to_string()),
                location: None,
                contact: Some("555-0100".to_string()),
            },
        )
        .await
        .unwrap();

        for body in [
            "name=Sweater&brand=Gap&price=650000&color=merah+muda",
            "name=Rompi&brand=Zara&price=850000&color=abu-abu&category=baju",
        ] {
            let response = send(
                create_app(store.clone()),
                form_post(&format!("/garments/{}/products", garment.id), body),
            )
            .await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), format!("/garments/{}", garment.id));
        }

        let page = body_text(
            send(create_app(store.clone()), get_request(&format!("/garments/{}", garment.id))).await,
        )
        .await;
        let sweater_at = page.find("Sweater").unwrap();
        let rompi_at = page.find("Rompi").unwrap();
        assert!(sweater_at < rompi_at);

        let response = send(
            create_app(store.clone()),
            form_post(&format!("/garments/{}?_method=DELETE", garment.id), ""),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(store.garment_count(), 0);
        assert_eq!(store.product_count(), 0);
    }

    #[tokio::test]
    async fn missing_garment_fields_are_listed() {
        let app = create_app(Arc::new(MemoryStore::new()));
        let response = send(app, form_post("/garments", "location=Bandung")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "Nama Tidak Boleh Kosong, Kontak Tidak Boleh Kosong"
        );
    }
}
