//! Route guards.
//!
//! A guard wraps a route (or a whole subtree) with an authorization
//! check against a fixed role set. Denial is always a redirect to the
//! login page carrying the originally requested path, never an error
//! page.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use mandap_core::RoleSet;
use tower_sessions::Session;

use crate::services::authz::{AuthorizationEngine, Decision};

use super::session::current_subject;

/// Factory for per-route guard functions.
#[derive(Clone)]
pub struct RouteGuard {
    engine: Arc<AuthorizationEngine>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(engine: Arc<AuthorizationEngine>) -> Self {
        Self { engine }
    }

    /// A guard admitting only subjects whose role is in `roles`.
    #[must_use]
    pub fn with_roles(&self, roles: RoleSet) -> GuardFn {
        GuardFn {
            engine: self.engine.clone(),
            roles,
        }
    }

    /// A guard admitting any signed-in subject.
    #[must_use]
    pub fn signed_in(&self) -> GuardFn {
        self.with_roles(RoleSet::SIGNED_IN)
    }
}

/// State for [`enforce`]: the engine plus the required role set.
#[derive(Clone)]
pub struct GuardFn {
    engine: Arc<AuthorizationEngine>,
    roles: RoleSet,
}

impl GuardFn {
    async fn decide(&self, session: &Session, requested_path: &str) -> Decision {
        let subject = current_subject(session).await;
        self.engine
            .authorize(self.roles, requested_path, subject.as_ref())
            .await
    }
}

/// Middleware body for `axum::middleware::from_fn_with_state` with a
/// [`GuardFn`] as state.
pub async fn enforce(
    State(guard): State<GuardFn>,
    session: Session,
    req: Request,
    next: Next,
) -> Response {
    let requested_path = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_owned(), ToString::to_string);

    match guard.decide(&session, &requested_path).await {
        Decision::Allow => next.run(req).await,
        Decision::Redirect(redirect) => Redirect::to(&redirect.location()).into_response(),
    }
}
