//! Core types for the Funky Teens storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod username;

pub use id::ProductId;
pub use price::{
    AMOUNT_SCALE, AmountOutOfRange, CurrencyCode, MAX_AMOUNT, Price, UnknownCurrency, parse_amount,
    storable_amount,
};
pub use username::{Username, UsernameError};
