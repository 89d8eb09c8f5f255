//! Authorization decisions.
//!
//! An authorization outcome is a value, never an error: either the
//! request proceeds, or it redirects to the login page carrying the
//! originally requested path. Every failure mode on this path
//! (missing subject, role not in the required set, resolver failure)
//! collapses to the redirect - fail closed.

use mandap_core::RoleSet;

use crate::models::CurrentSubject;

use super::roles::RoleResolver;

/// Login page path used as the redirect target on denial.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The subject may proceed.
    Allow,
    /// Denied; send the client to login, preserving the original
    /// target.
    Redirect(LoginRedirect),
}

/// Redirect-to-login carrying the originally requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub return_url: String,
}

impl LoginRedirect {
    /// The full redirect location, `/login?returnUrl=...`.
    #[must_use]
    pub fn location(&self) -> String {
        format!(
            "{LOGIN_PATH}?returnUrl={}",
            urlencoding::encode(&self.return_url)
        )
    }
}

impl Decision {
    fn deny(requested_path: &str) -> Self {
        Self::Redirect(LoginRedirect {
            return_url: requested_path.to_owned(),
        })
    }
}

/// Produces allow/deny decisions for a required role set and subject.
#[derive(Clone)]
pub struct AuthorizationEngine {
    roles: RoleResolver,
}

impl AuthorizationEngine {
    #[must_use]
    pub fn new(roles: RoleResolver) -> Self {
        Self { roles }
    }

    /// Decide whether `subject` may reach `requested_path`.
    ///
    /// The subject's role is resolved fresh on every call - decisions
    /// are never cached across navigations, so a privilege change
    /// takes effect on the next one. A resolver failure is swallowed
    /// into deny (logged at warn); it never surfaces to the caller.
    pub async fn authorize(
        &self,
        required: RoleSet,
        requested_path: &str,
        subject: Option<&CurrentSubject>,
    ) -> Decision {
        let Some(subject) = subject else {
            return Decision::deny(requested_path);
        };

        match self.roles.role_of(&subject.id).await {
            Ok(role) if required.contains(role) => Decision::Allow,
            Ok(role) => {
                tracing::debug!(
                    subject = %subject.id,
                    %role,
                    %required,
                    path = requested_path,
                    "authorization denied"
                );
                Decision::deny(requested_path)
            }
            Err(err) => {
                tracing::warn!(
                    subject = %subject.id,
                    error = %err,
                    path = requested_path,
                    "role resolution failed, denying"
                );
                Decision::deny(requested_path)
            }
        }
    }

    /// Default check for routes that merely require a signed-in
    /// subject: the full `{user, admin, superadmin}` set. Anonymous is
    /// never implicitly acceptable.
    pub async fn authorize_signed_in(
        &self,
        requested_path: &str,
        subject: Option<&CurrentSubject>,
    ) -> Decision {
        self.authorize(RoleSet::SIGNED_IN, requested_path, subject)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{
        Document, DocumentStore, MemoryStore, ProfileRepository, StoreError,
    };
    use async_trait::async_trait;
    use mandap_core::{Role, SubjectId};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::sync::watch;

    fn subject(id: &str) -> CurrentSubject {
        CurrentSubject {
            id: SubjectId::new(id),
            email: None,
        }
    }

    async fn engine_with_role(id: &str, role: &str) -> AuthorizationEngine {
        let store = Arc::new(MemoryStore::new());
        store
            .set("profiles", id, json!({"role": role}))
            .await
            .unwrap();
        AuthorizationEngine::new(RoleResolver::new(ProfileRepository::new(store)))
    }

    #[tokio::test]
    async fn test_no_subject_redirects_with_return_url() {
        let engine = engine_with_role("u1", "admin").await;
        let decision = engine
            .authorize(RoleSet::STAFF, "/orders", None)
            .await;
        let Decision::Redirect(redirect) = decision else {
            panic!("expected redirect");
        };
        assert_eq!(redirect.return_url, "/orders");
        assert_eq!(redirect.location(), "/login?returnUrl=%2Forders");
    }

    #[tokio::test]
    async fn test_allows_iff_role_in_set() {
        for (role, expect_allow) in [
            ("admin", true),
            ("superadmin", true),
            ("user", false),
            ("anonymous", false),
        ] {
            let engine = engine_with_role("u1", role).await;
            let decision = engine
                .authorize(RoleSet::STAFF, "/orders", Some(&subject("u1")))
                .await;
            assert_eq!(
                matches!(decision, Decision::Allow),
                expect_allow,
                "role {role}"
            );
        }
    }

    #[tokio::test]
    async fn test_superadmin_route_rejects_plain_user() {
        let engine = engine_with_role("u1", "user").await;
        let decision = engine
            .authorize(RoleSet::SUPERADMIN, "/admin-dashboard", Some(&subject("u1")))
            .await;
        let Decision::Redirect(redirect) = decision else {
            panic!("expected redirect");
        };
        assert_eq!(
            redirect.location(),
            "/login?returnUrl=%2Fadmin-dashboard"
        );
    }

    #[tokio::test]
    async fn test_signed_in_check_rejects_anonymous_profile() {
        // Profile exists but carries no role field; resolves anonymous.
        let store = Arc::new(MemoryStore::new());
        store
            .set("profiles", "u1", json!({"email": "a@b.c"}))
            .await
            .unwrap();
        let engine =
            AuthorizationEngine::new(RoleResolver::new(ProfileRepository::new(store)));
        let decision = engine
            .authorize_signed_in("/shop", Some(&subject("u1")))
            .await;
        assert!(matches!(decision, Decision::Redirect(_)));
    }

    /// Store whose reads always fail.
    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn get(&self, _: &str, _: &str) -> Result<Option<Value>, StoreError> {
            Err(StoreError::Backend("unreachable".into()))
        }
        async fn set(&self, _: &str, _: &str, _: Value) -> Result<(), StoreError> {
            Err(StoreError::Backend("unreachable".into()))
        }
        async fn add(&self, _: &str, _: Value) -> Result<String, StoreError> {
            Err(StoreError::Backend("unreachable".into()))
        }
        async fn update(&self, _: &str, _: &str, _: Value) -> Result<(), StoreError> {
            Err(StoreError::Backend("unreachable".into()))
        }
        async fn list(&self, _: &str) -> Result<Vec<Document>, StoreError> {
            Err(StoreError::Backend("unreachable".into()))
        }
        fn subscribe(&self, _: &str) -> watch::Receiver<u64> {
            watch::channel(0).1
        }
    }

    #[tokio::test]
    async fn test_resolver_failure_denies_never_allows() {
        let engine = AuthorizationEngine::new(RoleResolver::new(ProfileRepository::new(
            Arc::new(FailingStore),
        )));
        let decision = engine
            .authorize(RoleSet::STAFF, "/orders", Some(&subject("u1")))
            .await;
        assert!(matches!(decision, Decision::Redirect(_)));
    }
}
