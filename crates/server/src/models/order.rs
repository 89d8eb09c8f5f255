//! Order snapshot models.
//!
//! An [`Order`] is built client-side in memory at submission time,
//! persisted exactly once, and from then on only its status (and
//! `updatedAt`) change. Money amounts are `Decimal`; every derived
//! figure is recomputed here rather than trusted from input.

use chrono::{DateTime, NaiveDate, Utc};
use mandap_core::{CurrencyCode, OrderId, OrderStatus, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::Product;

/// A single order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    /// Localized description, when the catalog carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_desc: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Always `quantity * unit_price`; never taken from the caller.
    pub subtotal: Decimal,
}

impl OrderItem {
    /// Build a line from a selected product, recomputing the subtotal.
    #[must_use]
    pub fn from_selection(product: &Product, quantity: u32) -> Self {
        let unit_price = product.unit_price();
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_desc: (!product.name_alt.is_empty()).then(|| product.name_alt.clone()),
            quantity,
            unit_price,
            subtotal: unit_price * Decimal::from(quantity),
        }
    }
}

/// Order totals with currency context.
///
/// Invariant: `grand_total = items_total - discount + tax + shipping`,
/// exactly. There is no pricing-rule engine; discount, tax and
/// shipping default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub currency: CurrencyCode,
    pub items_total: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
}

impl OrderTotals {
    /// Compute totals from order lines with zero adjustments.
    #[must_use]
    pub fn from_items(items: &[OrderItem], currency: CurrencyCode) -> Self {
        let items_total: Decimal = items.iter().map(|i| i.subtotal).sum();
        Self {
            currency,
            items_total,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            shipping: Decimal::ZERO,
            grand_total: items_total,
        }
    }
}

/// An order snapshot as persisted to the `orders` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub customer_name: String,
    pub phone_number: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    /// Calendar days between start and end dates.
    pub days: u32,
    /// Lines in selection order.
    pub items: Vec<OrderItem>,
    /// Sum of line quantities.
    pub total_items: u32,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order read back from the store, with its assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredOrder {
    pub id: OrderId,
    #[serde(flatten)]
    pub order: Order,
}
