//! Product documents. Read-only from this core.

use std::sync::Arc;

use mandap_core::ProductId;

use crate::models::Product;

use super::{DocumentStore, StoreError, collections};

/// Repository for the `products` collection.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProductRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// List every product, sorted by display sequence ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read fails or a document cannot
    /// be decoded.
    pub async fn list_sorted(&self) -> Result<Vec<Product>, StoreError> {
        let docs = self.store.list(collections::PRODUCTS).await?;
        let mut products = docs
            .into_iter()
            .map(|doc| {
                let mut product: Product = serde_json::from_value(doc.data)
                    .map_err(|e| StoreError::malformed(collections::PRODUCTS, &e))?;
                product.id = ProductId::new(doc.id);
                Ok(product)
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        products.sort_by_key(|p| p.sequence);
        Ok(products)
    }
}
