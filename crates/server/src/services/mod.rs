pub mod auth;
pub mod authz;
pub mod catalog;
pub mod orders;
pub mod roles;
