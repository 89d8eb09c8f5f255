//! Order route handlers.
//!
//! Submission is open to shoppers; listing and status changes are
//! staff-only (guarded at the router).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use mandap_core::{OrderId, OrderStatus, ProductId};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::{Product, StoredOrder};
use crate::services::orders::{
    BookingRange, CustomerDetails, TransitionOutcome, ValidationError, build_order,
    filter_orders,
};
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Order submission payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_name: String,
    pub phone_number: String,
    pub location: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub delivery_date: Option<chrono::NaiveDate>,
    pub items: Vec<ItemSelection>,
}

/// One selected product line in a submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSelection {
    pub product_id: ProductId,
    /// Signed on the wire so a negative quantity is rejected rather
    /// than wrapped.
    pub quantity: i64,
}

/// Staff order-list filters.
#[derive(Debug, Deserialize, Default)]
pub struct OrderFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Status transition payload.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub current: OrderStatus,
    pub target: OrderStatus,
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a new order.
///
/// Selections are resolved against the current catalog; prices and
/// subtotals are recomputed server-side, never trusted from the
/// client.
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<OrderRequest>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog().list().await?;

    let mut selected: Vec<Product> = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let Some(product) = catalog.iter().find(|p| p.id == item.product_id) else {
            return Err(AppError::BadRequest(format!(
                "unknown product: {}",
                item.product_id
            )));
        };
        let quantity = u32::try_from(item.quantity).map_err(|_| {
            AppError::Validation(ValidationError::NegativeQuantity {
                product: product.name.clone(),
            })
        })?;
        let mut product = product.clone();
        product.selected_quantity = quantity;
        selected.push(product);
    }

    let details = CustomerDetails {
        name: request.customer_name,
        phone: request.phone_number,
        location: request.location,
    };
    let range = BookingRange {
        start: request.start_date,
        end: request.end_date,
        delivery: request.delivery_date,
    };

    let order = build_order(&details, range, &selected)?;
    let id = state.orders().submit(&order).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Staff order listing with optional name and phone filters.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<StoredOrder>>> {
    let orders = state.orders().list_orders().await?;
    let filtered = filter_orders(
        &orders,
        filter.name.as_deref().unwrap_or(""),
        filter.phone.as_deref().unwrap_or(""),
    );
    Ok(Json(filtered.into_iter().cloned().collect()))
}

/// Apply a status transition to an order.
///
/// An illegal transition is reported as `applied: false` with status
/// 200, not as an error; the caller's current status simply no longer
/// matches reality.
pub async fn transition(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<serde_json::Value>> {
    let id = OrderId::new(id);
    let outcome = state
        .orders()
        .transition(&id, request.current, request.target)
        .await?;

    let (applied, status) = match outcome {
        TransitionOutcome::Applied => (true, request.target),
        TransitionOutcome::Ignored => (false, request.current),
    };
    Ok(Json(json!({ "applied": applied, "status": status })))
}
