//! Document-store seam.
//!
//! The identity and order data live in a remote document service that
//! this core treats as opaque: collections of JSON documents addressed
//! by collection name and document id. [`DocumentStore`] is the seam;
//! [`MemoryStore`] is the in-process implementation used by `main` and
//! by every test.
//!
//! # Collections
//!
//! - `profiles` - keyed by subject id, `{email, role, createdAt}`
//! - `products` - read-only from this core, sorted by `sequence`
//! - `orders` - full order documents, ids assigned by the store

mod memory;
mod orders;
mod products;
mod profiles;

pub use memory::MemoryStore;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use profiles::ProfileRepository;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

/// Collection names used by the core.
pub mod collections {
    pub const PROFILES: &str = "profiles";
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
}

/// A document read from the store: opaque id plus JSON payload.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Errors from the document service.
///
/// Variants carry owned strings rather than source errors so the type
/// is `Clone`: coalesced reads (the catalog's single-flight cache)
/// share one failure between all waiters.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    /// The backend rejected or failed the operation.
    #[error("document store error: {0}")]
    Backend(String),

    /// A stored document could not be decoded into its model type.
    #[error("malformed document in {collection}: {message}")]
    Malformed { collection: String, message: String },
}

impl StoreError {
    pub(crate) fn malformed(collection: &str, err: &serde_json::Error) -> Self {
        Self::Malformed {
            collection: collection.to_owned(),
            message: err.to_string(),
        }
    }
}

/// Asynchronous document service.
///
/// All operations are non-blocking; writes become visible to
/// [`subscribe`](DocumentStore::subscribe) watchers after they resolve.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document, `None` if absent. Absence is not an error.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    /// Create or replace a document at a caller-chosen id.
    async fn set(&self, collection: &str, id: &str, doc: Value) -> Result<(), StoreError>;

    /// Append a document; the store assigns and returns the id.
    async fn add(&self, collection: &str, doc: Value) -> Result<String, StoreError>;

    /// Shallow-merge `patch` fields into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;

    /// List every document in a collection.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Watch a collection for changes.
    ///
    /// The receiver's value is a change counter bumped on every write
    /// to the collection; live queries re-read on each bump.
    fn subscribe(&self, collection: &str) -> watch::Receiver<u64>;
}
