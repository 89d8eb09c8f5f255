//! Domain models persisted to (or derived from) the document store.

pub mod order;
pub mod product;
pub mod profile;
pub mod session;

pub use order::{Order, OrderItem, OrderTotals, StoredOrder};
pub use product::Product;
pub use profile::{Profile, Subject};
pub use session::{CurrentSubject, session_keys};
