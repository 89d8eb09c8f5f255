//! Order documents. Appended once, then status-patched.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mandap_core::{OrderId, OrderStatus};
use serde_json::json;
use tokio::sync::watch;

use crate::models::{Order, StoredOrder};

use super::{DocumentStore, StoreError, collections};

/// Repository for the `orders` collection.
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn DocumentStore>,
}

impl OrderRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new order; the store assigns the id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub async fn add(&self, order: &Order) -> Result<OrderId, StoreError> {
        let doc = serde_json::to_value(order)
            .map_err(|e| StoreError::malformed(collections::ORDERS, &e))?;
        let id = self.store.add(collections::ORDERS, doc).await?;
        Ok(OrderId::new(id))
    }

    /// Patch an order's status and `updatedAt` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the order does not exist,
    /// or another [`StoreError`] if the write fails.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.store
            .update(
                collections::ORDERS,
                id.as_str(),
                json!({ "status": status, "updatedAt": updated_at }),
            )
            .await
    }

    /// List every order, sorted by start date ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails or a document cannot
    /// be decoded.
    pub async fn list_sorted(&self) -> Result<Vec<StoredOrder>, StoreError> {
        let docs = self.store.list(collections::ORDERS).await?;
        let mut orders = docs
            .into_iter()
            .map(|doc| {
                let order: Order = serde_json::from_value(doc.data)
                    .map_err(|e| StoreError::malformed(collections::ORDERS, &e))?;
                Ok(StoredOrder {
                    id: OrderId::new(doc.id),
                    order,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        orders.sort_by_key(|o| o.order.start_date);
        Ok(orders)
    }

    /// Watch the collection's change counter.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe(collections::ORDERS)
    }
}
