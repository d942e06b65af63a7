//! Integration tests for the Funky Teens storefront widgets.
//!
//! # Test Categories
//!
//! - `session_reload` - Login state across page loads
//! - `cart_persistence` - Cart contents across page loads and stored formats
//!
//! Helpers here build widgets over a temporary [`FileStore`] so a test can
//! "reload the page" by opening a fresh [`AppState`] on the same directory.

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;

use funky_teens_storefront::catalog::ProductCard;
use funky_teens_storefront::storage::{FileStore, KeyValueStore};
use funky_teens_storefront::{AppState, StorefrontConfig, UiEvent};

/// Configuration pointing the file-backed store at `dir`.
#[must_use]
pub fn config_for(dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        storage_dir: Some(dir.to_path_buf()),
        ..StorefrontConfig::default()
    }
}

/// Open the widgets on `dir`, as a fresh page load would.
///
/// # Panics
///
/// Panics if the storage directory cannot be opened.
#[must_use]
#[allow(clippy::expect_used)]
pub fn load_page(dir: &Path) -> AppState {
    AppState::open(config_for(dir)).expect("storage directory should open")
}

/// Raw store over `dir`, for seeding or inspecting stored records.
///
/// # Panics
///
/// Panics if the storage directory cannot be opened.
#[must_use]
#[allow(clippy::expect_used)]
pub fn raw_store(dir: &Path) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::open(dir).expect("storage directory should open"))
}

/// A login form submission.
#[must_use]
pub fn login(username: &str, password: &str) -> UiEvent {
    UiEvent::LoginSubmitted {
        username: username.to_string(),
        password: SecretString::from(password.to_string()),
    }
}

/// A product card carrying all of its details as data attributes.
#[must_use]
pub fn product_card(id: &str, name: &str, price: &str) -> ProductCard {
    ProductCard::new()
        .with_class("product-card")
        .with_data("id", id)
        .with_data("name", name)
        .with_data("price", price)
        .with_data("image", format!("/img/{id}.jpg"))
}
