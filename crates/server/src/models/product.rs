//! Catalog product model.

use mandap_core::{CurrencyCode, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// Persisted fields are read-only from this core; the document service
/// owns them. `selected_quantity` is per-request selection state used
/// while building an order. It is never written back to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned document id, attached on read.
    #[serde(default)]
    pub id: ProductId,
    /// Display name in the default locale.
    pub name: String,
    /// Display name in the alternate locale.
    #[serde(default)]
    pub name_alt: String,
    /// Catalog display ordering, ascending.
    pub sequence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Unit price in the currency's standard unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<CurrencyCode>,
    /// Quantity currently selected for an order being built.
    #[serde(skip)]
    pub selected_quantity: u32,
}

impl Product {
    /// Unit price, treating unpriced products as zero.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.price.unwrap_or_default()
    }
}
