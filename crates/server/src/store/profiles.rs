//! Profile documents, keyed by subject id.

use std::sync::Arc;

use mandap_core::SubjectId;
use serde_json::Value;

use crate::models::Profile;

use super::{DocumentStore, StoreError, collections};

/// Repository for the `profiles` collection.
#[derive(Clone)]
pub struct ProfileRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProfileRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Read the raw profile document for a subject, `None` if absent.
    ///
    /// Returned as a raw value because role resolution must tolerate
    /// partially-formed documents (missing fields default to the
    /// anonymous role, they are not decode errors).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read itself fails.
    pub async fn get_raw(&self, id: &SubjectId) -> Result<Option<Value>, StoreError> {
        self.store.get(collections::PROFILES, id.as_str()).await
    }

    /// Write a profile document at the subject's id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    pub async fn set(&self, id: &SubjectId, profile: &Profile) -> Result<(), StoreError> {
        let doc = serde_json::to_value(profile)
            .map_err(|e| StoreError::malformed(collections::PROFILES, &e))?;
        self.store.set(collections::PROFILES, id.as_str(), doc).await
    }
}
