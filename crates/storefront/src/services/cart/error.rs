//! Cart error types.

use funky_teens_core::AmountOutOfRange;
use thiserror::Error;

/// Errors that can occur when changing the cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The add-to-cart control is not inside a product card.
    #[error("no product card found for add-to-cart")]
    NotAProductCard,

    /// The product's price cannot be stored in the cart.
    #[error("unsupported product price: {0}")]
    PriceOutOfRange(#[from] AmountOutOfRange),
}
