//! Session-stored types.

use mandap_core::{Email, SubjectId};
use serde::{Deserialize, Serialize};

use super::profile::Subject;

/// Session-stored subject identity.
///
/// Minimal data kept in the session to identify the signed-in subject.
/// The role is deliberately not stored here: it is resolved fresh from
/// the profile store on every authorization check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSubject {
    pub id: SubjectId,
    pub email: Option<Email>,
}

impl From<&Subject> for CurrentSubject {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id.clone(),
            email: subject.email.clone(),
        }
    }
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current signed-in subject.
    pub const CURRENT_SUBJECT: &str = "current_subject";
}
