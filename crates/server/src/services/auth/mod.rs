//! Identity provider.
//!
//! Wraps the credential backend and the profile store. Sign-in yields
//! a [`Subject`] the route layer stores in the session; sign-up
//! provisions a new account through a scoped context so the caller's
//! own session is never replaced.

mod backend;
mod error;

pub use backend::{IdentityBackend, MemoryIdentityBackend, ProvisioningContext};
pub use error::AuthError;

use std::sync::Arc;

use chrono::Utc;
use mandap_core::{Email, Role};

use crate::models::{Profile, Subject};
use crate::store::ProfileRepository;

/// Identity provider.
///
/// Handles sign-in, sign-up and the profile write that accompanies
/// account creation.
#[derive(Clone)]
pub struct IdentityProvider {
    backend: Arc<dyn IdentityBackend>,
    profiles: ProfileRepository,
}

impl IdentityProvider {
    #[must_use]
    pub fn new(backend: Arc<dyn IdentityBackend>, profiles: ProfileRepository) -> Self {
        Self { backend, profiles }
    }

    /// Sign in with email and password.
    ///
    /// Session persistence (remember-me) is the route layer's concern;
    /// this only verifies credentials and returns the subject.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong password or
    /// unknown email, `AuthError::AccountDisabled` for a disabled
    /// account.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Subject, AuthError> {
        let email = Email::parse(email)?;
        let subject = self.backend.authenticate(&email, password).await?;
        tracing::info!(subject = %subject.id, "sign-in");
        Ok(subject)
    }

    /// Create a new account with the given role (default `user`).
    ///
    /// Provisioning runs inside a throwaway [`ProvisioningContext`]
    /// that is torn down on every exit path, so an admin creating an
    /// account keeps their own session. The profile document is
    /// written before the operation completes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailInUse` or `AuthError::WeakPassword`
    /// from account creation. If the profile write fails after the
    /// account was created, the error still propagates; the account
    /// exists without a profile (its role resolves to anonymous until
    /// repaired) and is not retried here.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Subject, AuthError> {
        let email = Email::parse(email)?;
        let role = role.unwrap_or(Role::User);

        let mut context = ProvisioningContext::new(self.backend.clone());
        let subject = context.create_account(&email, password).await?;

        let profile = Profile {
            email,
            role,
            created_at: Utc::now(),
        };
        self.profiles.set(&subject.id, &profile).await?;

        tracing::info!(subject = %subject.id, %role, "account provisioned");
        Ok(subject)
    }

    /// Sign out is session teardown; the backend keeps no per-session
    /// state. Logged for the audit trail.
    pub fn sign_out(&self, subject: Option<&Subject>) {
        if let Some(subject) = subject {
            tracing::info!(subject = %subject.id, "sign-out");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{DocumentStore, MemoryStore, StoreError};
    use async_trait::async_trait;
    use serde_json::Value;
    use tokio::sync::watch;

    fn provider_with_store(store: Arc<dyn DocumentStore>) -> IdentityProvider {
        IdentityProvider::new(
            Arc::new(MemoryIdentityBackend::new()),
            ProfileRepository::new(store),
        )
    }

    #[tokio::test]
    async fn test_sign_up_writes_profile_with_role() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let provider = provider_with_store(store.clone());

        let subject = provider
            .sign_up("ops@example.com", "a strong password", Some(Role::Admin))
            .await
            .unwrap();

        let doc = store
            .get("profiles", subject.id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["role"], "admin");
        assert_eq!(doc["email"], "ops@example.com");
        assert!(doc.get("createdAt").is_some());
    }

    #[tokio::test]
    async fn test_sign_up_defaults_to_user_role() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let provider = provider_with_store(store.clone());

        let subject = provider
            .sign_up("new@example.com", "a strong password", None)
            .await
            .unwrap();

        let doc = store
            .get("profiles", subject.id.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["role"], "user");
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let provider = provider_with_store(store);

        let created = provider
            .sign_up("a@b.c", "a strong password", None)
            .await
            .unwrap();
        let signed_in = provider.sign_in("a@b.c", "a strong password").await.unwrap();
        assert_eq!(created.id, signed_in.id);
    }

    /// Store that accepts reads but fails all writes.
    struct WriteFailingStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl DocumentStore for WriteFailingStore {
        async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
            self.inner.get(collection, id).await
        }
        async fn set(&self, _: &str, _: &str, _: Value) -> Result<(), StoreError> {
            Err(StoreError::Backend("write refused".into()))
        }
        async fn add(&self, _: &str, _: Value) -> Result<String, StoreError> {
            Err(StoreError::Backend("write refused".into()))
        }
        async fn update(&self, _: &str, _: &str, _: Value) -> Result<(), StoreError> {
            Err(StoreError::Backend("write refused".into()))
        }
        async fn list(&self, collection: &str) -> Result<Vec<crate::store::Document>, StoreError> {
            self.inner.list(collection).await
        }
        fn subscribe(&self, collection: &str) -> watch::Receiver<u64> {
            self.inner.subscribe(collection)
        }
    }

    #[tokio::test]
    async fn test_profile_write_failure_propagates_but_account_exists() {
        let backend = Arc::new(MemoryIdentityBackend::new());
        let store: Arc<dyn DocumentStore> = Arc::new(WriteFailingStore {
            inner: MemoryStore::new(),
        });
        let provider =
            IdentityProvider::new(backend.clone(), ProfileRepository::new(store));

        let err = provider
            .sign_up("a@b.c", "a strong password", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));

        // The account was created before the profile write failed; a
        // second signup for the same email reports the conflict.
        let email = Email::parse("a@b.c").unwrap();
        let err = backend
            .create_account(&email, "another password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailInUse));
    }
}
