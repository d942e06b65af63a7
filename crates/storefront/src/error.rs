//! Unified error handling.
//!
//! Provides a unified `AppError` type aggregating the per-concern errors.
//! Widgets surface errors to the user as notifications; `AppError::notice`
//! decides which ones the user sees and with what wording.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::Notification;
use crate::render::RenderError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::storage::StorageError;

/// Notice shown when the login form is incomplete.
pub const MISSING_FIELDS_NOTICE: &str = "Please fill all fields!";

/// Application-level error type for the storefront widgets.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// The notification to show for this error, if any.
    ///
    /// Internal failures are logged and shown as a generic message; an
    /// add-to-cart click outside a product card is silently ignored.
    #[must_use]
    pub fn notice(&self) -> Option<Notification> {
        match self {
            Self::Auth(AuthError::MissingFields) => {
                Some(Notification::error(MISSING_FIELDS_NOTICE))
            }
            Self::Auth(AuthError::InvalidUsername(e)) => {
                Some(Notification::error(capitalize(&e.to_string())))
            }
            Self::Cart(CartError::NotAProductCard) => None,
            Self::Cart(CartError::PriceOutOfRange(_)) => Some(Notification::error(
                "Sorry, this product can't be added to the cart",
            )),
            Self::Storage(_) | Self::Render(_) | Self::Config(_) => {
                tracing::error!(error = %self, "Widget error");
                Some(Notification::error("Something went wrong, please try again"))
            }
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
