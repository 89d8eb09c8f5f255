//! Order submission, staff review and status transitions over live
//! HTTP.

#![allow(clippy::expect_used)]

use mandap_integration_tests::{ADMIN_EMAIL, TestServer, client, sign_in, spawn_server};
use serde_json::{Value, json};

/// Submit an order for 2 tables and 1 chair; returns the new order id.
async fn submit_order(client: &reqwest::Client, server: &TestServer, name: &str, phone: &str) -> String {
    let resp = client
        .post(server.url("/orders"))
        .json(&json!({
            "customerName": name,
            "phoneNumber": phone,
            "location": "Shivaji Nagar, Pune",
            "startDate": "2025-06-01",
            "endDate": "2025-06-04",
            "items": [
                {"productId": "p-table", "quantity": 2},
                {"productId": "p-chair", "quantity": 1},
            ],
        }))
        .send()
        .await
        .expect("submit");
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.expect("json body");
    body["id"].as_str().expect("order id").to_owned()
}

#[tokio::test]
async fn test_submit_computes_totals_server_side() {
    let server = spawn_server().await;
    let shopper = client();
    submit_order(&shopper, &server, "Asha Pawar", "9876543210").await;

    let staff = client();
    sign_in(&staff, &server, ADMIN_EMAIL).await;
    let resp = staff
        .get(server.url("/orders"))
        .send()
        .await
        .expect("list");
    assert_eq!(resp.status(), 200);

    let orders: Value = resp.json().await.expect("json body");
    let order = &orders[0];
    // 2 x 100 + 1 x 50 with zero adjustments.
    assert_eq!(order["totals"]["itemsTotal"], "250");
    assert_eq!(order["totals"]["grandTotal"], "250");
    assert_eq!(order["totalItems"], 3);
    assert_eq!(order["days"], 3);
    assert_eq!(order["status"], "pending");
}

#[tokio::test]
async fn test_submit_rejects_bad_input() {
    let server = spawn_server().await;
    let shopper = client();

    // End date not after start date.
    let resp = shopper
        .post(server.url("/orders"))
        .json(&json!({
            "customerName": "Asha Pawar",
            "phoneNumber": "9876543210",
            "location": "Pune",
            "startDate": "2025-06-04",
            "endDate": "2025-06-01",
            "items": [],
        }))
        .send()
        .await
        .expect("submit");
    assert_eq!(resp.status(), 400);

    // Unknown product.
    let resp = shopper
        .post(server.url("/orders"))
        .json(&json!({
            "customerName": "Asha Pawar",
            "phoneNumber": "9876543210",
            "location": "Pune",
            "startDate": "2025-06-01",
            "endDate": "2025-06-04",
            "items": [{"productId": "p-ghost", "quantity": 1}],
        }))
        .send()
        .await
        .expect("submit");
    assert_eq!(resp.status(), 400);

    // Negative quantity.
    let resp = shopper
        .post(server.url("/orders"))
        .json(&json!({
            "customerName": "Asha Pawar",
            "phoneNumber": "9876543210",
            "location": "Pune",
            "startDate": "2025-06-01",
            "endDate": "2025-06-04",
            "items": [{"productId": "p-table", "quantity": -2}],
        }))
        .send()
        .await
        .expect("submit");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_transition_applies_once_then_ignores() {
    let server = spawn_server().await;
    let shopper = client();
    let id = submit_order(&shopper, &server, "Asha Pawar", "9876543210").await;

    let staff = client();
    sign_in(&staff, &server, ADMIN_EMAIL).await;

    let resp = staff
        .post(server.url(&format!("/orders/{id}/status")))
        .json(&json!({"current": "pending", "target": "completed"}))
        .send()
        .await
        .expect("transition");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["applied"], true);
    assert_eq!(body["status"], "completed");

    // A completed order is terminal; the second request is a no-op.
    let resp = staff
        .post(server.url(&format!("/orders/{id}/status")))
        .json(&json!({"current": "completed", "target": "cancelled"}))
        .send()
        .await
        .expect("transition");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["applied"], false);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_transition_requires_staff() {
    let server = spawn_server().await;
    let shopper = client();
    let id = submit_order(&shopper, &server, "Asha Pawar", "9876543210").await;

    let resp = shopper
        .post(server.url(&format!("/orders/{id}/status")))
        .json(&json!({"current": "pending", "target": "completed"}))
        .send()
        .await
        .expect("transition");
    assert!(resp.status().is_redirection());
}

#[tokio::test]
async fn test_list_filters_by_name_and_phone() {
    let server = spawn_server().await;
    let shopper = client();
    submit_order(&shopper, &server, "Asha Pawar", "9876543210").await;
    submit_order(&shopper, &server, "Rahul Joshi", "9000011111").await;

    let staff = client();
    sign_in(&staff, &server, ADMIN_EMAIL).await;

    let resp = staff
        .get(server.url("/orders?name=asha"))
        .send()
        .await
        .expect("list");
    let orders: Value = resp.json().await.expect("json body");
    assert_eq!(orders.as_array().expect("array").len(), 1);
    assert_eq!(orders[0]["customerName"], "Asha Pawar");

    let resp = staff
        .get(server.url("/orders?phone=90000"))
        .send()
        .await
        .expect("list");
    let orders: Value = resp.json().await.expect("json body");
    assert_eq!(orders.as_array().expect("array").len(), 1);
    assert_eq!(orders[0]["customerName"], "Rahul Joshi");

    let resp = staff.get(server.url("/orders")).send().await.expect("list");
    let orders: Value = resp.json().await.expect("json body");
    assert_eq!(orders.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn test_public_catalog_is_open_and_sorted() {
    let server = spawn_server().await;
    let shopper = client();

    let resp = shopper
        .get(server.url("/products"))
        .send()
        .await
        .expect("products");
    assert_eq!(resp.status(), 200);
    let products: Value = resp.json().await.expect("json body");
    assert_eq!(products[0]["name"], "Banquet table");
    assert_eq!(products[1]["name"], "Folding chair");
}
