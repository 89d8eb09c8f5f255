//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session holds
//! the subject's identity only; the role is re-read from the profile
//! store on every authorization check.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::MandapConfig;
use crate::models::{CurrentSubject, session_keys};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "mandap_session";

/// Create the session layer with an in-memory store.
///
/// The default expiry is session-scoped (the cookie dies with the
/// browser); a sign-in with remember-me extends its own session via
/// [`set_current_subject`].
#[must_use]
pub fn create_session_layer(config: &MandapConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Store the signed-in subject in the session.
///
/// With `remember_me` the session switches to an inactivity expiry of
/// `session_days`; without it the session ends when the browser does.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_subject(
    session: &Session,
    subject: &CurrentSubject,
    remember_me: bool,
    session_days: u32,
) -> Result<(), tower_sessions::session::Error> {
    if remember_me {
        session.set_expiry(Some(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::days(i64::from(session_days)),
        )));
    }
    session.insert(session_keys::CURRENT_SUBJECT, subject).await
}

/// Clear the signed-in subject from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_subject(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentSubject>(session_keys::CURRENT_SUBJECT)
        .await?;
    Ok(())
}

/// Read the signed-in subject, if any. A missing or unreadable entry
/// is treated as signed out.
pub async fn current_subject(session: &Session) -> Option<CurrentSubject> {
    session
        .get(session_keys::CURRENT_SUBJECT)
        .await
        .ok()
        .flatten()
}
