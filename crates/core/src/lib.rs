//! Mandap Core - Shared types library.
//!
//! This crate provides common types used across all Mandap components:
//! - `server` - HTTP service hosting the storefront and order review flows
//! - `integration-tests` - End-to-end test harness
//!
//! # Architecture
//!
//! The core crate contains only types and small pure helpers - no I/O, no
//! store access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and emails, roles and role sets,
//!   order statuses, and currency codes
//! - [`dates`] - Calendar-day arithmetic for booking ranges

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dates;
pub mod types;

pub use types::*;
