//! Middleware: session management and route guards.

pub mod guard;
pub mod session;

pub use guard::{GuardFn, RouteGuard, enforce};
pub use session::{
    SESSION_COOKIE_NAME, clear_current_subject, create_session_layer, current_subject,
    set_current_subject,
};
