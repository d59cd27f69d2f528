//! HTTP behaviour of the listings client against a mock server.

use std::time::Duration;

use estate_core::api::client::ListingClient;
use estate_core::core::controller::{ListingController, ListingEvent};
use estate_core::core::query::{FilterKey, ListingQuery};
use estate_core::core::services::favorite_store::HttpFavoriteStore;
use estate_core::core::services::traits::FavoriteStore;
use estate_core::error::{ApiError, AppError, PropertyError};
use estate_core::utils::retry::RetryConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ListingClient {
    ListingClient::new(server.uri()).expect("client creation failed")
}

fn listing(id: u32, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "price": 450000,
        "address": "10 Elm St",
        "city": "Austin",
        "state": "TX",
        "zip_code": "78701",
        "bedrooms": 3,
        "bathrooms": 2.0,
        "square_feet": 1800,
        "status": "For Sale",
        "property_type": "Single Family"
    })
}

#[tokio::test]
async fn test_list_properties_paged_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .and(query_param("city", "Austin"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [listing(13, "Ranch House")],
            "page": 2,
            "pages": 3,
            "total": 25,
            "per_page": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut query = ListingQuery::default().with_filter(FilterKey::City, "Austin");
    query.set_page(2);

    let page = client_for(&server)
        .get_properties(&query.api_query())
        .await
        .expect("listing request failed");

    assert_eq!(page.page, 2);
    assert_eq!(page.pages, 3);
    assert_eq!(page.result_count(), 25);
    assert_eq!(page.items[0].title, "Ranch House");
}

#[tokio::test]
async fn test_list_properties_bare_array_is_one_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([listing(1, "A"), listing(2, "B"), listing(3, "C")])),
        )
        .mount(&server)
        .await;

    let page = client_for(&server)
        .get_properties("?page=1")
        .await
        .expect("listing request failed");

    assert_eq!(page.items.len(), 3);
    assert_eq!((page.page, page.pages), (1, 1));
}

#[tokio::test]
async fn test_server_error_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .expect(2)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_properties("page=1")
        .await
        .unwrap_err();

    match err {
        AppError::Api(ApiError::Http {
            status, message, ..
        }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "db down");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad filter"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_properties("min_price=abc")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::Http { status: 400, .. })));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(listing(1, "Slow"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = ListingClient::with_timeout(server.uri(), 1)
        .expect("client creation failed")
        .with_retry(RetryConfig::none());

    let err = client.get_property(1).await.unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::Timeout { .. })));
}

#[tokio::test]
async fn test_gateway_timeout_reports_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .respond_with(ResponseTemplate::new(504))
        .expect(1)
        .mount(&server)
        .await;

    let client = ListingClient::with_timeout(server.uri(), 7)
        .expect("client creation failed")
        .with_retry(RetryConfig::none());

    let err = client.get_properties("page=1").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::Timeout { timeout_secs: 7, .. })
    ));
    assert_eq!(
        err.display_friendly(),
        "The listings server did not answer within 7s"
    );
}

#[tokio::test]
async fn test_get_property() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(7, "Craftsman")))
        .mount(&server)
        .await;

    let property = client_for(&server).get_property(7).await.expect("lookup failed");
    assert_eq!(property.id, 7);
    assert_eq!(property.full_address(), "10 Elm St, Austin, TX 78701");
}

#[tokio::test]
async fn test_missing_property_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_property(404).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Property(PropertyError::NotFound { id: 404 })
    ));
}

#[tokio::test]
async fn test_add_favorite_posts_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/favorites"))
        .and(body_json(json!({
            "property_id": 4,
            "user_email": "user@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "Added"})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .add_favorite(4, "user@example.com")
        .await
        .expect("favorite request failed");
}

#[tokio::test]
async fn test_duplicate_favorite_reports_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/favorites"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Property already in favorites"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .add_favorite(4, "user@example.com")
        .await
        .unwrap_err();
    match err {
        AppError::Api(ApiError::Http { status, message, .. }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Property already in favorites");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_favorite_store_lists_and_removes_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/favorites/first%20last%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listing(2, "Saved")])))
        .expect(1)
        .mount(&server)
        .await;

    let store = HttpFavoriteStore::new(client_for(&server), "first last@example.com");
    let favorites = store.list().await.expect("favorites request failed");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, 2);

    // No DELETE endpoint: removal must not touch the server
    store.remove(2).await.expect("local removal failed");
}

#[tokio::test]
async fn test_controller_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/properties"))
        .and(query_param("bedrooms", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "page": 1,
            "pages": 0,
            "total": 0
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut controller = ListingController::default();
    let changed = controller
        .dispatch(
            ListingEvent::SetFilter(FilterKey::Bedrooms, "3".to_string()),
            &client,
        )
        .await;

    assert!(changed);
    assert!(controller.listing().data().is_some_and(|p| p.is_empty()));
    assert_eq!(controller.location(), "?bedrooms=3");
}
