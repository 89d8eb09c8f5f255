//! Integration test harness for the mandap server.
//!
//! Spawns the full application (router, guards, session layer) over an
//! in-memory store on an ephemeral port and exercises it with a real
//! HTTP client. Each test gets its own server and cookie jar, so tests
//! never share state.
//!
//! Run with: cargo test -p mandap-integration-tests

#![allow(clippy::expect_used)]

use std::sync::Arc;

use mandap_server::config::MandapConfig;
use mandap_server::services::auth::MemoryIdentityBackend;
use mandap_server::state::AppState;
use mandap_server::store::{DocumentStore, MemoryStore};
use mandap_server::app;
use mandap_core::Role;
use serde_json::json;

/// Password shared by every seeded account.
pub const PASSWORD: &str = "integration test password";

/// Seeded account emails, one per role.
pub const USER_EMAIL: &str = "shopper@example.com";
pub const ADMIN_EMAIL: &str = "staff@example.com";
pub const SUPERADMIN_EMAIL: &str = "owner@example.com";

/// A running server instance, with a handle on its backing store so
/// tests can mutate documents out from under the server.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
}

impl TestServer {
    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Spawn the application with seeded products and one account per
/// role.
pub async fn spawn_server() -> TestServer {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    seed_products(store.as_ref()).await;

    let config = MandapConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        session_days: 30,
        seed_superadmin: None,
    };

    let state = AppState::new(config, store.clone(), Arc::new(MemoryIdentityBackend::new()));
    for (email, role) in [
        (USER_EMAIL, Role::User),
        (ADMIN_EMAIL, Role::Admin),
        (SUPERADMIN_EMAIL, Role::Superadmin),
    ] {
        state
            .identity()
            .sign_up(email, PASSWORD, Some(role))
            .await
            .expect("seed account");
    }

    let router = app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    TestServer {
        base_url: format!("http://{addr}"),
        store,
    }
}

async fn seed_products(store: &MemoryStore) {
    store
        .set(
            "products",
            "p-table",
            json!({"name": "Banquet table", "sequence": 1, "price": "100", "currency": "INR"}),
        )
        .await
        .expect("seed product");
    store
        .set(
            "products",
            "p-chair",
            json!({"name": "Folding chair", "sequence": 2, "price": "50", "currency": "INR"}),
        )
        .await
        .expect("seed product");
}

/// Client with a cookie jar and redirects disabled, so tests can
/// assert on Location headers directly.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build client")
}

/// Sign the client's session in as the given account.
pub async fn sign_in(client: &reqwest::Client, server: &TestServer, email: &str) {
    let resp = client
        .post(server.url("/login"))
        .form(&[("email", email), ("password", PASSWORD)])
        .send()
        .await
        .expect("login request");
    assert!(
        resp.status().is_redirection(),
        "login should redirect, got {}",
        resp.status()
    );
}
