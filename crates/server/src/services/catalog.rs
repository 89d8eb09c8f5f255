//! Cached product catalog reads.

use std::sync::Arc;

use moka::future::Cache;

use crate::models::Product;
use crate::store::{ProductRepository, StoreError};

/// Single-slot cached view of the product list.
///
/// The first `list` call reads from the store and populates the slot;
/// later calls return the cached snapshot until [`invalidate`] is
/// called. This guards against redundant reads within a session, not
/// staleness - there is no TTL. Concurrent first reads are coalesced
/// into one store read: moka's `try_get_with` shares the in-flight
/// future (and its failure) with every waiter.
///
/// [`invalidate`]: ProductCatalog::invalidate
#[derive(Clone)]
pub struct ProductCatalog {
    products: ProductRepository,
    cache: Cache<(), Arc<Vec<Product>>>,
}

impl ProductCatalog {
    #[must_use]
    pub fn new(products: ProductRepository) -> Self {
        Self {
            products,
            cache: Cache::builder().max_capacity(1).build(),
        }
    }

    /// The product list, sorted by display sequence ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying read fails. Failures
    /// are not cached; the next call retries.
    pub async fn list(&self) -> Result<Arc<Vec<Product>>, StoreError> {
        self.cache
            .try_get_with((), async {
                tracing::debug!("catalog cache miss, reading products");
                self.products.list_sorted().await.map(Arc::new)
            })
            .await
            .map_err(|err: Arc<StoreError>| (*err).clone())
    }

    /// Drop the cached snapshot; the next `list` re-reads the store.
    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }
}
