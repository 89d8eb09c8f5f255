//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Health check
//!
//! # Catalog
//! GET  /products            - Product listing (public)
//! GET  /shop                - Shop catalog (signed-in)
//!
//! # Auth
//! GET  /login               - Login page
//! POST /login               - Login action
//! GET  /logout              - Logout action
//!
//! # Orders
//! POST /orders              - Submit an order (public)
//! GET  /orders              - Order list with filters (staff)
//! POST /orders/{id}/status  - Status transition (staff)
//!
//! # Superadmin
//! GET  /admin-dashboard     - Summary dashboard (superadmin)
//! POST /admin/users/new     - Provision an account (superadmin)
//! ```
//!
//! Unknown paths redirect to the public product listing.

pub mod admin;
pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Router,
    handler::Handler,
    middleware::from_fn_with_state,
    response::Redirect,
    routing::{get, post},
};
use mandap_core::RoleSet;

use crate::middleware::{RouteGuard, enforce};
use crate::state::AppState;

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}

/// Unknown paths land on the public product listing.
async fn fallback() -> Redirect {
    Redirect::to("/products")
}

/// Create all routes, with guards attached per route.
///
/// `/orders` carries different guards per method: submission is open,
/// listing is staff-only.
pub fn routes(state: &AppState) -> Router<AppState> {
    let guard = RouteGuard::new(state.authz());
    let signed_in = from_fn_with_state(guard.signed_in(), enforce);
    let staff = from_fn_with_state(guard.with_roles(RoleSet::STAFF), enforce);
    let superadmin = from_fn_with_state(guard.with_roles(RoleSet::SUPERADMIN), enforce);

    Router::new()
        .route("/health", get(health))
        .route("/products", get(products::index))
        .route("/shop", get(products::shop.layer(signed_in)))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route(
            "/orders",
            post(orders::submit).get(orders::list.layer(staff.clone())),
        )
        .route("/orders/{id}/status", post(orders::transition.layer(staff)))
        .route(
            "/admin-dashboard",
            get(admin::dashboard.layer(superadmin.clone())),
        )
        .route("/admin/users/new", post(admin::create_user.layer(superadmin)))
        .fallback(fallback)
}
