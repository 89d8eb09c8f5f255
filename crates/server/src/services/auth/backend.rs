//! Identity backend seam.
//!
//! The real credential store is an external service; this trait is the
//! boundary. [`MemoryIdentityBackend`] is the in-process
//! implementation used by `main` and the tests, with argon2 password
//! hashing.

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use mandap_core::{Email, SubjectId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::Subject;

use super::AuthError;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Asynchronous credential store.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Verify credentials and return the subject.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for a wrong password or unknown email,
    /// `AccountDisabled` for a disabled account.
    async fn authenticate(&self, email: &Email, password: &str) -> Result<Subject, AuthError>;

    /// Create a new account and return its subject.
    ///
    /// # Errors
    ///
    /// `EmailInUse` if an account already exists for the email,
    /// `WeakPassword` if the password fails validation.
    async fn create_account(&self, email: &Email, password: &str) -> Result<Subject, AuthError>;
}

struct AccountRecord {
    subject_id: SubjectId,
    password_hash: String,
    disabled: bool,
}

/// In-process [`IdentityBackend`] with argon2id-hashed passwords.
#[derive(Default)]
pub struct MemoryIdentityBackend {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl MemoryIdentityBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account disabled. Test and operator hook.
    pub async fn disable(&self, email: &Email) {
        let mut accounts = self.accounts.write().await;
        if let Some(record) = accounts.get_mut(email.as_str()) {
            record.disabled = true;
        }
    }
}

#[async_trait]
impl IdentityBackend for MemoryIdentityBackend {
    async fn authenticate(&self, email: &Email, password: &str) -> Result<Subject, AuthError> {
        let accounts = self.accounts.read().await;
        let record = accounts
            .get(email.as_str())
            .ok_or(AuthError::InvalidCredentials)?;

        if record.disabled {
            return Err(AuthError::AccountDisabled);
        }

        verify_password(password, &record.password_hash)?;

        Ok(Subject {
            id: record.subject_id.clone(),
            email: Some(email.clone()),
        })
    }

    async fn create_account(&self, email: &Email, password: &str) -> Result<Subject, AuthError> {
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email.as_str()) {
            return Err(AuthError::EmailInUse);
        }

        let subject_id = SubjectId::new(Uuid::new_v4().simple().to_string());
        accounts.insert(
            email.as_str().to_owned(),
            AccountRecord {
                subject_id: subject_id.clone(),
                password_hash,
                disabled: false,
            },
        );

        Ok(Subject {
            id: subject_id,
            email: Some(email.clone()),
        })
    }
}

/// Scoped provisioning context for account creation.
///
/// Signing up a new account must never touch the caller's own session,
/// so provisioning goes through this disposable handle instead of the
/// provider's session-facing surface. The handle holds the freshly
/// provisioned subject only for the duration of the signup operation;
/// dropping it (on success or on any error path) discards that
/// transient authentication state.
pub struct ProvisioningContext {
    backend: Arc<dyn IdentityBackend>,
    provisioned: Option<SubjectId>,
}

impl ProvisioningContext {
    pub(super) fn new(backend: Arc<dyn IdentityBackend>) -> Self {
        Self {
            backend,
            provisioned: None,
        }
    }

    /// Create the account within this context.
    ///
    /// # Errors
    ///
    /// Propagates backend errors (`EmailInUse`, `WeakPassword`, ...).
    pub async fn create_account(
        &mut self,
        email: &Email,
        password: &str,
    ) -> Result<Subject, AuthError> {
        let subject = self.backend.create_account(email, password).await?;
        self.provisioned = Some(subject.id.clone());
        Ok(subject)
    }
}

impl Drop for ProvisioningContext {
    fn drop(&mut self) {
        if let Some(id) = self.provisioned.take() {
            // Teardown runs on every exit path; the transient identity
            // never escapes into the caller's session.
            tracing::debug!(subject = %id, "provisioning context discarded");
        }
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
