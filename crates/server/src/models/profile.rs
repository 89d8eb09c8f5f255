//! Subject and profile models.

use chrono::{DateTime, Utc};
use mandap_core::{Email, Role, SubjectId};
use serde::{Deserialize, Serialize};

/// An authenticated principal.
///
/// Owned by the identity provider for the session lifetime; ends when
/// the session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub email: Option<Email>,
}

/// A profile document, keyed by subject id in the `profiles`
/// collection.
///
/// Created once at signup; the role is assigned at creation and never
/// self-escalated through this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
