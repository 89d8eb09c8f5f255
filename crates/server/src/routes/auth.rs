//! Authentication route handlers.
//!
//! Handles login, logout and the post-login redirect. The redirect
//! honors a safe `returnUrl` first and otherwise lands the subject on
//! the page for its role.

use axum::{
    Form, Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use mandap_core::Role;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::{clear_current_subject, current_subject, set_current_subject};
use crate::models::CurrentSubject;
use crate::services::authz::LOGIN_PATH;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
    pub return_url: Option<String>,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginQuery {
    pub return_url: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    Json(json!({
        "page": "login",
        "returnUrl": query.return_url,
    }))
}

/// Login action.
///
/// Verifies credentials, stores the subject in the session (extending
/// it when remember-me is set) and redirects. A `returnUrl` wins when
/// it is a safe local path; otherwise the role decides the landing
/// page.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let subject = state
        .identity()
        .sign_in(&form.email, &form.password)
        .await?;
    let current = CurrentSubject::from(&subject);

    set_current_subject(
        &session,
        &current,
        form.remember_me,
        state.config().session_days,
    )
    .await?;

    // A role read failure here must not undo a successful sign-in;
    // fall back to the anonymous landing page.
    let role = state
        .roles()
        .role_of(&current.id)
        .await
        .unwrap_or_default();

    Ok(Redirect::to(&redirect_target(
        form.return_url.as_deref(),
        role,
    )))
}

/// Logout action; clears the session and returns to the login page.
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    if let Some(current) = current_subject(&session).await {
        tracing::info!(subject = %current.id, "sign-out");
    }
    state.identity().sign_out(None);
    clear_current_subject(&session).await?;
    Ok(Redirect::to(LOGIN_PATH))
}

/// Pick the post-login landing page.
///
/// Only local paths are honored as return URLs; anything else (absolute
/// URLs, scheme-relative `//host` forms) is discarded to keep the
/// redirect on this site.
fn redirect_target(return_url: Option<&str>, role: Role) -> String {
    if let Some(url) = return_url
        && url.starts_with('/')
        && !url.starts_with("//")
    {
        return url.to_owned();
    }

    match role {
        Role::Superadmin => "/admin-dashboard".to_owned(),
        Role::Admin => "/orders".to_owned(),
        Role::User | Role::Anonymous => "/shop".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target_prefers_safe_return_url() {
        assert_eq!(
            redirect_target(Some("/orders?name=a"), Role::User),
            "/orders?name=a"
        );
    }

    #[test]
    fn test_redirect_target_rejects_offsite_urls() {
        assert_eq!(
            redirect_target(Some("https://evil.example"), Role::User),
            "/shop"
        );
        assert_eq!(redirect_target(Some("//evil.example"), Role::User), "/shop");
        assert_eq!(redirect_target(Some("evil"), Role::User), "/shop");
    }

    #[test]
    fn test_redirect_target_by_role() {
        assert_eq!(redirect_target(None, Role::Superadmin), "/admin-dashboard");
        assert_eq!(redirect_target(None, Role::Admin), "/orders");
        assert_eq!(redirect_target(None, Role::User), "/shop");
        assert_eq!(redirect_target(None, Role::Anonymous), "/shop");
    }
}
