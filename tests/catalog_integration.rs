use reqwest::{redirect::Policy, Client, StatusCode};
use shop_catalog::store::{GarmentStore, MemoryStore, ProductStore};
use shop_catalog::{serve, Garment, ProductFilter};
use std::sync::Arc;
use tokio::net::TcpListener;

// Test client wrapper for making form calls without following redirects
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .redirect(Policy::none())
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await
    }
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Boot the app on an ephemeral port against a fresh in-memory store
async fn start_server() -> (TestClient, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("Listener has no address");

    tokio::spawn(serve(store.clone(), listener));

    (TestClient::new(format!("http://{}", address)), store)
}

#[tokio::test]
async fn test_garment_cascade_workflow() {
    let (client, store) = start_server().await;

    // Create the garment
    let response = client
        .post_form("/garments", &[("name", "Acme"), ("contact", "555-0100")])
        .await
        .expect("Failed to create garment");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/garments");

    let garments: Vec<Garment> = store.list_garments().await.unwrap();
    assert_eq!(garments.len(), 1);
    let garment_id = garments[0].id;

    // Create two products under it
    for (name, brand) in [("Celana Chino", "Levi's"), ("Topi Baseball", "New Era")] {
        let response = client
            .post_form(
                &format!("/garments/{}/products", garment_id),
                &[
                    ("name", name),
                    ("brand", brand),
                    ("price", "350000"),
                    ("color", "hitam"),
                    ("category", "aksesoris"),
                ],
            )
            .await
            .expect("Failed to create product");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let garment = store.get_garment(&garment_id).await.unwrap().unwrap();
    assert_eq!(garment.products.len(), 2);

    // The garment page lists both, in link order
    let page = client
        .get(&format!("/garments/{}", garment_id))
        .await
        .expect("Failed to fetch garment")
        .text()
        .await
        .unwrap();
    let first = page.find("Celana Chino").expect("first product missing");
    let second = page.find("Topi Baseball").expect("second product missing");
    assert!(first < second);

    // Each product page links back to its garment
    let product_page = client
        .get(&format!("/products/{}", garment.products[0]))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(product_page.contains(&format!("/garments/{}", garment_id)));

    // Delete the garment through the override convention
    let response = client
        .post_form(&format!("/garments/{}?_method=DELETE", garment_id), &[])
        .await
        .expect("Failed to delete garment");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    for product_id in &garment.products {
        let response = client
            .get(&format!("/products/{}", product_id))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.get_product(product_id).await.unwrap().is_none());
    }
    assert!(store.list_products(&ProductFilter::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_error_responses_are_plain_text() {
    let (client, store) = start_server().await;

    let response = client.get("/products/abc123").await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Product ID not found");

    let response = client
        .post_form(
            "/products",
            &[("name", "Jas"), ("brand", "Hugo Boss"), ("color", "hitam")],
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Path `price` is required.");

    assert_eq!(store.product_count(), 0);
}

#[tokio::test]
async fn test_product_edit_round_trip() {
    let (client, store) = start_server().await;

    let response = client
        .post_form(
            "/products",
            &[
                ("name", "Rompi"),
                ("brand", "Zara"),
                ("price", "850000"),
                ("color", "abu-abu"),
                ("category", "baju"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let show_path = location(&response);

    let edit_page = client
        .get(&format!("{}/edit", show_path))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(edit_page.contains("value=\"Rompi\""));
    assert!(edit_page.contains("?_method=PUT"));

    let response = client
        .post_form(
            &format!("{}?_method=PUT", show_path),
            &[
                ("name", "Rompi"),
                ("brand", "Zara"),
                ("price", "800000"),
                ("color", "abu-abu"),
                ("category", "jaket"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), show_path);

    let products = store.list_products(&ProductFilter::all()).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, 800000.0);

    let listing = client
        .get("/products?category=jaket")
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(listing.contains("Rompi"));
}
