//! Shared type definitions.
//!
//! - [`id`] - Newtype ids for store documents
//! - [`role`] - Access roles and explicit role sets
//! - [`status`] - Order lifecycle status
//! - [`email`] - Validated email addresses
//! - [`currency`] - ISO 4217 currency codes

pub mod currency;
pub mod email;
pub mod id;
pub mod role;
pub mod status;

pub use currency::CurrencyCode;
pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, SubjectId};
pub use role::{Role, RoleSet};
pub use status::OrderStatus;
