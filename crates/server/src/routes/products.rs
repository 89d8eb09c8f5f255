//! Product route handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// Public product listing, sorted by display sequence.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().list().await?;
    Ok(Json(products.as_ref().clone()))
}

/// Shop page catalog. Same payload as the public listing; the route is
/// guarded so only signed-in subjects reach it.
pub async fn shop(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.catalog().list().await?;
    Ok(Json(products.as_ref().clone()))
}
