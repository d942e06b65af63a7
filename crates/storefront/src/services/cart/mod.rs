//! Cart manager behind the shopping-cart overlay.
//!
//! The cart is an ordered list of lines keyed by product ID. Every mutation
//! is written to storage immediately and then announced to the registered
//! change listeners so the overlay and count badges can re-render.

mod error;

pub use error::CartError;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;

use funky_teens_core::{ProductId, storable_amount};

use crate::catalog::{ProductCard, ProductDetails, ProductExtractor};
use crate::models::CartItem;
use crate::storage::{self, KeyValueStore};

/// Callback invoked with the cart lines after every change.
pub type CartListener = Box<dyn FnMut(&[CartItem]) + Send>;

/// Outcome of [`CartManager::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now holds this many units.
    Updated(u32),
    /// The quantity dropped to zero and the line was removed.
    Removed,
    /// No line with that ID exists; nothing changed.
    NotFound,
}

/// Owns the cart lines and keeps them in sync with storage.
pub struct CartManager {
    store: Arc<dyn KeyValueStore>,
    key: String,
    extractor: ProductExtractor,
    items: Vec<CartItem>,
    listeners: Vec<CartListener>,
    revision: u64,
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl CartManager {
    /// Load the cart stored under `key`.
    ///
    /// A missing or malformed record loads as an empty cart. Lines are read
    /// one by one: unreadable lines and lines priced outside the storable
    /// range are dropped, lines sharing an ID are merged and zero-quantity
    /// lines dropped.
    pub fn load(
        store: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        extractor: ProductExtractor,
    ) -> Self {
        let key = key.into();
        let stored: Vec<serde_json::Value> =
            storage::load_json(store.as_ref(), &key).unwrap_or_default();
        let stored_len = stored.len();
        let items = normalize(stored.into_iter().filter_map(decode_line));

        if items.len() != stored_len {
            tracing::debug!(
                key = %key,
                stored = stored_len,
                kept = items.len(),
                "Normalized stored cart lines"
            );
        }
        tracing::debug!(key = %key, lines = items.len(), "Loaded cart");

        Self {
            store,
            key,
            extractor,
            items,
            listeners: Vec::new(),
            revision: 0,
        }
    }

    /// Register a callback fired after every change.
    pub fn on_change(&mut self, listener: impl FnMut(&[CartItem]) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Drop all change callbacks.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Incremented on every change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Add one unit of the product on `card`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotAProductCard` if `card` is not a product card,
    /// or `CartError::PriceOutOfRange` if its price cannot be stored.
    pub fn add_item(&mut self, card: &ProductCard) -> Result<CartItem, CartError> {
        let details = self
            .extractor
            .extract(card)
            .ok_or(CartError::NotAProductCard)?;
        self.add(details)
    }

    /// Add one unit of `product`, merging into an existing line with the
    /// same ID. Returns the resulting line.
    ///
    /// New lines take the price rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns `CartError::PriceOutOfRange` if the price exceeds
    /// [`MAX_AMOUNT`](funky_teens_core::MAX_AMOUNT); the cart is unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: ProductDetails) -> Result<CartItem, CartError> {
        let price = storable_amount(product.price).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected product with unsupported price");
        })?;

        let line = if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            tracing::info!(quantity = item.quantity, "Incremented cart line");
            item.clone()
        } else {
            tracing::info!(name = %product.name, "Added cart line");
            let item = CartItem {
                id: product.id,
                name: product.name,
                price,
                image: product.image,
                quantity: 1,
            };
            self.items.push(item.clone());
            item
        };

        self.commit();
        Ok(line)
    }

    /// Remove the line for `id`.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        tracing::info!("Removed cart line");
        self.commit();
        Some(removed)
    }

    /// Set the quantity of the line for `id`; zero or less removes it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> QuantityUpdate {
        let Some(index) = self.position(id) else {
            return QuantityUpdate::NotFound;
        };

        if quantity <= 0 {
            self.items.remove(index);
            tracing::info!("Removed cart line at zero quantity");
            self.commit();
            return QuantityUpdate::Removed;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        tracing::debug!(quantity, "Updated cart line quantity");
        self.commit();
        QuantityUpdate::Updated(quantity)
    }

    /// One more unit of `id`.
    pub fn increment(&mut self, id: &ProductId) -> QuantityUpdate {
        match self.get(id) {
            Some(item) => {
                let next = i64::from(item.quantity) + 1;
                self.set_quantity(id, next)
            }
            None => QuantityUpdate::NotFound,
        }
    }

    /// One fewer unit of `id`; the line goes away at zero.
    pub fn decrement(&mut self, id: &ProductId) -> QuantityUpdate {
        match self.get(id) {
            Some(item) => {
                let next = i64::from(item.quantity) - 1;
                self.set_quantity(id, next)
            }
            None => QuantityUpdate::NotFound,
        }
    }

    /// Remove every line.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
        tracing::info!("Cleared cart");
        self.commit();
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Persist, then notify listeners. A failed write is logged; the
    /// in-memory cart stays authoritative.
    fn commit(&mut self) {
        self.revision += 1;

        if let Err(e) = storage::save_json(self.store.as_ref(), &self.key, &self.items) {
            tracing::error!(key = %self.key, error = %e, "Failed to persist cart");
        }

        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(&self.items);
        }
        // Listeners registered during the callbacks are kept after the
        // existing ones.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}

/// Read one stored line, rounding its price to cents.
fn decode_line(raw: serde_json::Value) -> Option<CartItem> {
    let mut item = match serde_json::from_value::<CartItem>(raw) {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!(error = %e, "Dropping unreadable cart line");
            return None;
        }
    };

    match storable_amount(item.price) {
        Ok(price) => {
            item.price = price;
            Some(item)
        }
        Err(e) => {
            tracing::warn!(
                product_id = %item.id,
                error = %e,
                "Dropping cart line with unsupported price"
            );
            None
        }
    }
}

/// Merge lines sharing an ID (first position wins) and drop empty lines.
fn normalize(stored: impl IntoIterator<Item = CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::new();
    for item in stored {
        if item.quantity == 0 {
            continue;
        }
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => items.push(item),
        }
    }
    items
}
