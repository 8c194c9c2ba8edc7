//! HTTP tests against the full router and an in-memory database.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_api::config::DEFAULT_LOCKOUT_PRODUCT_ID;
use storefront_api::{build_app, AppState};
use storefront_core::{DocumentId, LockoutRule, Money, Product};
use storefront_db::{Database, DbConfig};

const RED: &str = DEFAULT_LOCKOUT_PRODUCT_ID;
const ORANGE: &str = "67cfc3218e6716214620f930";
const BLUE: &str = "67cfc3218e6716214620f932";

async fn app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let products = db.products();

    for (id, name, price) in [
        (RED, "Red Set", 50),
        (ORANGE, "Orange Set", 100),
        (BLUE, "Blue Set", 30),
    ] {
        products
            .insert(&Product::new(
                DocumentId::parse(id).unwrap(),
                name,
                Money::from_units(price),
            ))
            .await
            .unwrap();
    }

    let rule = LockoutRule::new(
        DocumentId::parse(RED).unwrap(),
        chrono::Duration::minutes(60),
    );
    let state = AppState::with_lockout(db.clone(), Some(rule));

    (build_app(state, Duration::from_secs(10)), db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

fn product<'a>(listing: &'a Value, id: &str) -> &'a Value {
    listing
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["_id"] == id)
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _db) = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_listing_shapes_products() {
    let (app, _db) = app().await;

    let (status, body) = send(&app, Method::GET, "/product/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let orange = product(&body, ORANGE);
    assert_eq!(orange["name"], "Orange Set");
    assert_eq!(orange["price"].as_f64(), Some(100.0));
    assert!(orange.get("itemLimit").is_none());

    let (status, _) = send(&app, Method::GET, "/product", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_red_set_locks_after_order() {
    let (app, _db) = app().await;

    let (_, before) = send(&app, Method::GET, "/product/", None).await;
    assert_eq!(product(&before, RED)["itemLimit"], 1);

    let (status, _) = send(
        &app,
        Method::POST,
        "/product/place-order",
        Some(json!({
            "cart": [{ "productId": RED, "quantity": 1 }],
            "totalAmount": 50
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, after) = send(&app, Method::GET, "/product/", None).await;
    assert_eq!(product(&after, RED)["itemLimit"], 0);
    assert!(product(&after, BLUE).get("itemLimit").is_none());
}

#[tokio::test]
async fn test_calculate_with_pairs_and_member() {
    let (app, _db) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/product/calculate",
        Some(json!({
            "cart": [{ "productId": ORANGE, "quantity": 5 }],
            "memberNumber": "M-42"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grandTotal"].as_f64(), Some(500.0));
    assert_eq!(body["memberDiscount"].as_f64(), Some(48.0));
    assert_eq!(body["totalDiscount"].as_f64(), Some(68.0));
    assert_eq!(body["finalTotal"].as_f64(), Some(432.0));

    let items = body["discountItems"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], ORANGE);
    assert_eq!(items[0]["name"], "Orange Set");
    assert_eq!(items[0]["discountAmount"].as_f64(), Some(20.0));
}

#[tokio::test]
async fn test_calculate_without_member() {
    let (app, _db) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/product/calculate",
        Some(json!({ "cart": [{ "productId": ORANGE, "quantity": 5 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["memberDiscount"].as_f64(), Some(0.0));
    assert_eq!(body["finalTotal"].as_f64(), Some(480.0));
}

#[tokio::test]
async fn test_calculate_rejects_empty_cart() {
    let (app, _db) = app().await;

    for payload in [json!({ "cart": [] }), json!({})] {
        let (status, body) = send(&app, Method::POST, "/product/calculate", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Cart cannot be empty" }));
    }
}

#[tokio::test]
async fn test_calculate_rejects_malformed_id() {
    let (app, _db) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/product/calculate",
        Some(json!({ "cart": [{ "productId": "not-an-id", "quantity": 1 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid productId: not-an-id");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _db) = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/product/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ \"cart\": ["))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_place_order_stores_pending_order() {
    let (app, db) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/product/place-order",
        Some(json!({
            "cart": [{ "productId": ORANGE, "quantity": 5 }],
            "memberNumber": "M-42",
            "totalAmount": 432
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order placed successfully!");

    let order_id = DocumentId::parse(body["orderId"].as_str().unwrap()).unwrap();
    let stored = db.orders().get_by_id(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.total_amount, Money::from_units(432));
    assert_eq!(stored.member_number.as_deref(), Some("M-42"));
    assert_eq!(stored.cart.len(), 1);
}

#[tokio::test]
async fn test_place_order_requires_cart_and_amount() {
    let (app, db) = app().await;

    for payload in [
        json!({ "cart": [{ "productId": ORANGE, "quantity": 1 }] }),
        json!({ "cart": [], "totalAmount": 100 }),
        json!({ "cart": [{ "productId": ORANGE, "quantity": 1 }], "totalAmount": 0 }),
    ] {
        let (status, body) =
            send(&app, Method::POST, "/product/place-order", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Cart cannot be empty and totalAmount is required."
        );
    }

    assert_eq!(db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_client_paths_match_case_insensitively() {
    let (app, db) = app().await;

    let (status, listing) = send(&app, Method::GET, "/Product/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 3);

    let (status, body) = send(
        &app,
        Method::POST,
        "/Product/calculate",
        Some(json!({ "cart": [{ "productId": ORANGE, "quantity": 5 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["finalTotal"].as_f64(), Some(480.0));

    let (status, body) = send(
        &app,
        Method::POST,
        "/Product/place-order",
        Some(json!({
            "cart": [{ "productId": ORANGE, "quantity": 1 }],
            "totalAmount": 100
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(db.orders().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_non_array_cart_counts_as_empty() {
    let (app, db) = app().await;

    for cart in [json!("oops"), json!({}), json!(7)] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/product/calculate",
            Some(json!({ "cart": cart.clone() })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Cart cannot be empty" }));

        let (status, body) = send(
            &app,
            Method::POST,
            "/product/place-order",
            Some(json!({ "cart": cart, "totalAmount": 100 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Cart cannot be empty and totalAmount is required." })
        );
    }

    assert_eq!(db.orders().count().await.unwrap(), 0);
}
