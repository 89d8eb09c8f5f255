//! Role resolution.

use mandap_core::{Role, SubjectId};

use crate::store::{ProfileRepository, StoreError};

/// Resolves a subject's role from its profile document.
#[derive(Clone)]
pub struct RoleResolver {
    profiles: ProfileRepository,
}

impl RoleResolver {
    #[must_use]
    pub fn new(profiles: ProfileRepository) -> Self {
        Self { profiles }
    }

    /// Resolve the role for a subject id.
    ///
    /// Absence is not an error: a missing profile document, a missing
    /// `role` field, or an unrecognized role value all resolve to
    /// [`Role::Anonymous`], the safe default.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the read itself fails; callers
    /// on the authorization path treat that as deny, not as a default
    /// role.
    pub async fn role_of(&self, subject_id: &SubjectId) -> Result<Role, StoreError> {
        let Some(doc) = self.profiles.get_raw(subject_id).await? else {
            return Ok(Role::Anonymous);
        };

        let role = doc
            .get("role")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
            .unwrap_or(Role::Anonymous);

        Ok(role)
    }
}
