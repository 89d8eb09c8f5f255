//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during authentication operations.
///
/// Each variant corresponds to a provider error code. The
/// [`user_message`](AuthError::user_message) table maps codes to
/// fixed, user-presentable text; anything unmapped falls back to a
/// generic message so backend details never leak to the client.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password, or no account for the email. The two cases are
    /// deliberately indistinguishable to the caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but has been disabled.
    #[error("account disabled")]
    AccountDisabled,

    /// Signup attempted with an email that already has an account.
    #[error("email already in use")]
    EmailInUse,

    /// Malformed email address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] mandap_core::EmailError),

    /// Password does not meet minimum requirements.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// The identity backend could not be reached.
    #[error("identity backend unreachable: {0}")]
    Network(String),

    /// Profile document read/write failure.
    ///
    /// During signup this can mean the account was created but its
    /// profile was not; the account exists and the error still
    /// propagates (no silent retry).
    #[error("profile store error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing failure.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Fixed, user-presentable message for this error code.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Incorrect email or password",
            Self::AccountDisabled => "User account is disabled",
            Self::EmailInUse => "Email already in use",
            Self::InvalidEmail(_) => "Invalid email address",
            Self::WeakPassword(_) => "Password is too weak",
            Self::Network(_) => "Network error, please try again",
            _ => "Authentication error, please try again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_table() {
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Incorrect email or password"
        );
        assert_eq!(
            AuthError::EmailInUse.user_message(),
            "Email already in use"
        );
        assert_eq!(
            AuthError::AccountDisabled.user_message(),
            "User account is disabled"
        );
    }

    #[test]
    fn test_unmapped_codes_fall_back_to_generic() {
        assert_eq!(
            AuthError::PasswordHash.user_message(),
            "Authentication error, please try again"
        );
        let store = AuthError::Store(StoreError::Backend("boom".into()));
        assert_eq!(
            store.user_message(),
            "Authentication error, please try again"
        );
    }
}
