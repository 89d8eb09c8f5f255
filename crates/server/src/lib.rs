//! Mandap rental server library.
//!
//! Provides the storefront and back-office functionality as a library
//! so it can be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::Router;
use mandap_core::Role;
use secrecy::ExposeSecret;
use tower_http::trace::TraceLayer;

use crate::services::auth::AuthError;
use crate::state::AppState;

/// Build the full application router: routes with their guards, the
/// session layer, and request tracing.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    routes::routes(&state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Provision the configured startup superadmin, if any.
///
/// Idempotent across restarts: an already-existing account is left
/// alone.
///
/// # Errors
///
/// Returns [`AuthError`] if provisioning fails for any reason other
/// than the account already existing.
pub async fn seed_superadmin(state: &AppState) -> Result<(), AuthError> {
    let Some(seed) = &state.config().seed_superadmin else {
        return Ok(());
    };

    match state
        .identity()
        .sign_up(
            &seed.email,
            seed.password.expose_secret(),
            Some(Role::Superadmin),
        )
        .await
    {
        Ok(subject) => {
            tracing::info!(subject = %subject.id, "superadmin seeded");
            Ok(())
        }
        Err(AuthError::EmailInUse) => {
            tracing::debug!("superadmin already provisioned");
            Ok(())
        }
        Err(err) => Err(err),
    }
}
