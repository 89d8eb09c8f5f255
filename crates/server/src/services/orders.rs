//! Order workflow: build, submit, transition, list.

use chrono::{NaiveDate, Utc};
use mandap_core::{CurrencyCode, OrderId, OrderStatus, dates::days_between};
use thiserror::Error;
use tokio::sync::watch;

use crate::models::{Order, OrderItem, OrderTotals, Product, StoredOrder};
use crate::store::{OrderRepository, StoreError};

/// Validation failures caught before any remote call.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// The end date must be strictly after the start date.
    #[error("end date must be after start date")]
    InvalidDateRange,

    /// A selection carried a negative quantity.
    #[error("quantity for {product} must be a non-negative integer")]
    NegativeQuantity { product: String },
}

/// Customer-entered order fields.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub location: String,
}

/// Requested booking range.
#[derive(Debug, Clone, Copy)]
pub struct BookingRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub delivery: Option<NaiveDate>,
}

/// Result of a requested status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The new status was persisted.
    Applied,
    /// The transition was not legal from the current status; nothing
    /// was written. Not an error.
    Ignored,
}

/// Build an order snapshot from customer details and selected
/// products.
///
/// Products with `selected_quantity == 0` are dropped; an order with
/// no line items is permitted. Every derived figure (subtotals,
/// totals, day count) is recomputed here. Status is stamped `pending`
/// and both timestamps to now.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateRange`] unless the end date
/// is strictly after the start date.
pub fn build_order(
    details: &CustomerDetails,
    range: BookingRange,
    products: &[Product],
) -> Result<Order, ValidationError> {
    if range.end <= range.start {
        return Err(ValidationError::InvalidDateRange);
    }

    let items: Vec<OrderItem> = products
        .iter()
        .filter(|p| p.selected_quantity > 0)
        .map(|p| OrderItem::from_selection(p, p.selected_quantity))
        .collect();

    let currency = products
        .iter()
        .find_map(|p| p.currency)
        .unwrap_or_default();
    let totals = OrderTotals::from_items(&items, currency);
    let total_items = items.iter().map(|i| i.quantity).sum();

    let now = Utc::now();
    Ok(Order {
        customer_name: details.name.clone(),
        phone_number: details.phone.clone(),
        location: details.location.clone(),
        start_date: range.start,
        end_date: range.end,
        delivery_date: range.delivery,
        days: days_between(range.start, range.end),
        items,
        total_items,
        totals,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

/// Pure derived view over an order list.
///
/// `name` matches case-insensitively as a substring of the customer
/// name; `phone` matches as an exact-character substring of the phone
/// number. Empty filters match everything. The input is untouched.
#[must_use]
pub fn filter_orders<'a>(
    orders: &'a [StoredOrder],
    name: &str,
    phone: &str,
) -> Vec<&'a StoredOrder> {
    let name = name.trim().to_lowercase();
    let phone = phone.trim();
    orders
        .iter()
        .filter(|o| {
            let name_ok =
                name.is_empty() || o.order.customer_name.to_lowercase().contains(&name);
            let phone_ok = phone.is_empty() || o.order.phone_number.contains(phone);
            name_ok && phone_ok
        })
        .collect()
}

/// Continuously-updating view over the persisted orders.
pub struct OrdersFeed {
    orders: OrderRepository,
    changes: watch::Receiver<u64>,
}

impl OrdersFeed {
    /// Current snapshot, sorted by start date ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails.
    pub async fn snapshot(&self) -> Result<Vec<StoredOrder>, StoreError> {
        self.orders.list_sorted().await
    }

    /// Wait until the collection changes again.
    pub async fn changed(&mut self) {
        // An error means the store side was dropped; treat as a quiet
        // end of the feed.
        let _ = self.changes.changed().await;
    }
}

/// Governs order persistence and the status lifecycle.
#[derive(Clone)]
pub struct OrderWorkflow {
    orders: OrderRepository,
}

impl OrderWorkflow {
    #[must_use]
    pub fn new(orders: OrderRepository) -> Self {
        Self { orders }
    }

    /// Persist an order snapshot as a new document, exactly once per
    /// call.
    ///
    /// There is no idempotency key: callers must not re-invoke while a
    /// submission is in flight. Two concurrent submissions produce two
    /// persisted orders.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the caller surfaces
    /// it (no retry here).
    pub async fn submit(&self, order: &Order) -> Result<OrderId, StoreError> {
        let id = self.orders.add(order).await?;
        tracing::info!(
            order = %id,
            customer = %order.customer_name,
            total_items = order.total_items,
            grand_total = %order.totals.grand_total,
            "order submitted"
        );
        Ok(id)
    }

    /// Advance an order's status under the restricted transition
    /// policy.
    ///
    /// Only `pending -> completed` and `pending -> cancelled` reach
    /// the store. Anything else - a non-pending current status, or a
    /// same-status target - returns [`TransitionOutcome::Ignored`]
    /// without contacting the store. On a legal transition the new
    /// status and a fresh `updatedAt` are persisted; callers update
    /// their local view only after this resolves.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the status write fails.
    pub async fn transition(
        &self,
        id: &OrderId,
        current: OrderStatus,
        target: OrderStatus,
    ) -> Result<TransitionOutcome, StoreError> {
        if !current.can_transition_to(target) {
            tracing::debug!(order = %id, %current, %target, "transition ignored");
            return Ok(TransitionOutcome::Ignored);
        }

        self.orders.update_status(id, target, Utc::now()).await?;
        tracing::info!(order = %id, %current, %target, "order transitioned");
        Ok(TransitionOutcome::Applied)
    }

    /// One-shot list of all orders, sorted by start date ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails.
    pub async fn list_orders(&self) -> Result<Vec<StoredOrder>, StoreError> {
        self.orders.list_sorted().await
    }

    /// Live view over the order list; see [`OrdersFeed`].
    #[must_use]
    pub fn watch_orders(&self) -> OrdersFeed {
        OrdersFeed {
            orders: self.orders.clone(),
            changes: self.orders.subscribe(),
        }
    }
}
