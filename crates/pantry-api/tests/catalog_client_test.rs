#![allow(clippy::unwrap_used)]
// Integration tests for `CatalogClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pantry_api::{CatalogClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let client = CatalogClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Category listing ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_category() {
    let (server, client) = setup().await;

    let body = json!({
        "count": 2,
        "page": 1,
        "products": [
            { "code": "111", "product_name": "Crisps", "nutrition_grades": "d" },
            { "code": "222", "product_name": "Pretzels" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/category/snacks/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let products = client.list_category("snacks", 1).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].code, "111");
    assert_eq!(products[0].product_name.as_deref(), Some("Crisps"));
    assert_eq!(products[0].nutrition_grades.as_deref(), Some("d"));
    assert!(products[1].nutrition_grades.is_none());
}

#[tokio::test]
async fn test_list_category_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/category/snacks/3.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let err = client.list_category("snacks", 3).await.unwrap_err();

    assert!(
        matches!(err, Error::Status { status: 503, .. }),
        "expected Status error, got: {err:?}"
    );
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_list_category_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/category/snacks/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list_category("snacks", 1).await;

    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("oops")),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Text search ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_sends_expected_query() {
    let (server, client) = setup().await;

    let body = json!({
        "count": 1,
        "page": "2",
        "page_size": 100,
        "products": [{ "code": "333", "product_name": "Dark chocolate" }]
    });

    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .and(query_param("search_terms", "dark chocolate"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "100"))
        .and(query_param("json", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let products = client.search("dark chocolate", 2).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].product_name.as_deref(), Some("Dark chocolate"));
}

#[tokio::test]
async fn test_search_without_products_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 0 })))
        .mount(&server)
        .await;

    let products = client.search("nothing", 1).await.unwrap();
    assert!(products.is_empty());
}

// ── Identifier lookup ───────────────────────────────────────────────

#[tokio::test]
async fn test_get_product_found() {
    let (server, client) = setup().await;

    let body = json!({
        "code": "3017620422003",
        "status": 1,
        "status_verbose": "product found",
        "product": {
            "code": "3017620422003",
            "product_name": "Nutella",
            "brands": "Ferrero",
            "quantity": "400 g",
            "nutrition_grades": "e",
            "image_url": "https://images.example/nutella.jpg"
        }
    });

    Mock::given(method("GET"))
        .and(path("/api/v0/product/3017620422003.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let product = client.get_product("3017620422003").await.unwrap().unwrap();

    assert_eq!(product.code, "3017620422003");
    assert_eq!(product.product_name.as_deref(), Some("Nutella"));
    assert_eq!(product.brands.as_deref(), Some("Ferrero"));
    assert_eq!(product.quantity.as_deref(), Some("400 g"));
}

#[tokio::test]
async fn test_get_product_status_zero_is_none() {
    let (server, client) = setup().await;

    let body = json!({
        "code": "000000000000",
        "status": 0,
        "status_verbose": "product not found"
    });

    Mock::given(method("GET"))
        .and(path("/api/v0/product/000000000000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let product = client.get_product("000000000000").await.unwrap();
    assert!(product.is_none());
}

#[tokio::test]
async fn test_get_product_http_404_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/product/42.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let product = client.get_product("42").await.unwrap();
    assert!(product.is_none());
}

#[tokio::test]
async fn test_get_product_server_error_propagates() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/product/42.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.get_product("42").await;
    assert!(
        matches!(result, Err(Error::Status { status: 500, .. })),
        "expected Status error, got: {result:?}"
    );
}

// ── Category names ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_categories() {
    let (server, client) = setup().await;

    let body = json!({
        "count": 3,
        "tags": [
            { "id": "en:snacks", "name": "Snacks", "products": 1200, "known": 1 },
            { "id": "en:empty", "name": "Empty", "products": 0, "known": 0 },
            { "id": "en:beverages", "name": "Beverages", "products": 900, "known": 1 }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/categories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let list = client.list_categories().await.unwrap();

    assert_eq!(list.tags.len(), 3);
    assert_eq!(list.tags[0].name, "Snacks");
    assert_eq!(list.tags[0].products, 1200);
    assert_eq!(list.tags[1].products, 0);
    assert_eq!(list.tags[2].name, "Beverages");
}

// ── Transport failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1.
    let client =
        CatalogClient::from_reqwest("http://127.0.0.1:1", reqwest::Client::new()).unwrap();
    let result = client.list_categories().await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
