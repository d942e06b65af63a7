//! Funky Teens Core - Shared domain types.
//!
//! This crate provides the value types used by the storefront widgets:
//! - `storefront` - Session manager, cart manager and rendering adapter
//! - `integration-tests` - Reload and persistence scenarios
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and usernames

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
