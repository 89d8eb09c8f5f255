//! Superadmin route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use mandap_core::{OrderStatus, Role};
use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::state::AppState;

/// Account creation payload.
#[derive(Debug, Deserialize)]
pub struct NewUserRequest {
    pub email: String,
    pub password: String,
    /// Defaults to `user` when omitted.
    pub role: Option<Role>,
}

/// Dashboard summary: catalog size plus order counts.
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let products = state.catalog().list().await?;
    let orders = state.orders().list_orders().await?;
    let pending = orders
        .iter()
        .filter(|o| o.order.status == OrderStatus::Pending)
        .count();

    Ok(Json(json!({
        "products": products.len(),
        "orders": orders.len(),
        "pendingOrders": pending,
    })))
}

/// Provision a new account with a chosen role.
///
/// Runs in a throwaway provisioning context, so the superadmin's own
/// session survives the account creation.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUserRequest>,
) -> Result<impl IntoResponse> {
    let subject = state
        .identity()
        .sign_up(&request.email, &request.password, request.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": subject.id,
            "email": request.email,
            "role": request.role.unwrap_or(Role::User),
        })),
    ))
}
