//! Widget services.
//!
//! - `auth` - Demo login session behind the login popup
//! - `cart` - Cart lines behind the cart overlay

pub mod auth;
pub mod cart;
