//! Product cards and cart-input extraction.
//!
//! A [`ProductCard`] is what the rendering adapter hands over when an
//! add-to-cart control is activated: the surrounding card's classes, its
//! `data-*` attributes, the text of a few known child elements and the first
//! image source. [`ProductExtractor`] turns it into a [`ProductDetails`] with
//! the fallback order the storefront markup relies on.

use std::collections::HashMap;

use rust_decimal::Decimal;

use funky_teens_core::{ProductId, parse_amount};

/// Classes that mark an element as a product card.
pub const PRODUCT_CARD_CLASSES: &[&str] = &["item", "hot-card", "cosmetic-card", "product-card"];

/// Child selectors whose text holds the product name, in priority order.
pub const NAME_SELECTORS: &[&str] = &["h3", ".hot-card-title", ".cosmetic-name"];

/// Child selectors whose text holds the price, in priority order.
pub const PRICE_SELECTORS: &[&str] = &[".price", ".hot-card-price", ".cosmetic-price"];

const DEFAULT_NAME: &str = "Product";
const DEFAULT_PRICE_TEXT: &str = "₹0";

/// Snapshot of a product card element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCard {
    classes: Vec<String>,
    data: HashMap<String, String>,
    texts: HashMap<String, String>,
    image_src: Option<String>,
}

impl ProductCard {
    /// An empty card with no classes or content.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a CSS class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set a data attribute. Accepts either `data-id` or `id`.
    #[must_use]
    pub fn with_data(mut self, name: &str, value: impl Into<String>) -> Self {
        let name = name.strip_prefix("data-").unwrap_or(name);
        self.data.insert(name.to_string(), value.into());
        self
    }

    /// Set the text content of the first child matching `selector`.
    #[must_use]
    pub fn with_text(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(selector.into(), text.into());
        self
    }

    /// Set the `src` of the first child image.
    #[must_use]
    pub fn with_image(mut self, src: impl Into<String>) -> Self {
        self.image_src = Some(src.into());
        self
    }

    /// Whether the card carries one of [`PRODUCT_CARD_CLASSES`].
    #[must_use]
    pub fn is_product_card(&self) -> bool {
        self.classes
            .iter()
            .any(|class| PRODUCT_CARD_CLASSES.contains(&class.as_str()))
    }

    /// Non-blank data attribute.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        non_blank(self.data.get(name))
    }

    /// Non-blank text of the child matching `selector`.
    #[must_use]
    pub fn text(&self, selector: &str) -> Option<&str> {
        non_blank(self.texts.get(selector))
    }

    fn first_text(&self, selectors: &[&str]) -> Option<&str> {
        selectors.iter().find_map(|selector| self.text(selector))
    }

    fn image(&self) -> Option<&str> {
        non_blank(self.image_src.as_ref())
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Cart input extracted from a product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

/// Resolves product details from cards.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    placeholder_image: String,
}

impl ProductExtractor {
    /// Create an extractor that falls back to `placeholder_image`.
    #[must_use]
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        Self {
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Extract product details, or `None` if `card` is not a product card.
    ///
    /// First match wins for each field:
    ///
    /// | Field | Sources |
    /// |-------|---------|
    /// | id    | `data-id`, generated `prod_<uuid>` |
    /// | name  | `data-name`, [`NAME_SELECTORS`], `"Product"` |
    /// | price | `data-price`, [`PRICE_SELECTORS`], zero |
    /// | image | `data-image`, first image, placeholder |
    #[must_use]
    pub fn extract(&self, card: &ProductCard) -> Option<ProductDetails> {
        if !card.is_product_card() {
            tracing::debug!("Ignoring add-to-cart outside a product card");
            return None;
        }

        let id = card
            .data("id")
            .map_or_else(ProductId::generate, ProductId::new);

        let name = card
            .data("name")
            .or_else(|| card.first_text(NAME_SELECTORS))
            .unwrap_or(DEFAULT_NAME)
            .to_string();

        let price_text = card
            .data("price")
            .or_else(|| card.first_text(PRICE_SELECTORS))
            .unwrap_or(DEFAULT_PRICE_TEXT);

        let image = card
            .data("image")
            .or_else(|| card.image())
            .unwrap_or(self.placeholder_image.as_str())
            .to_string();

        Some(ProductDetails {
            id,
            name,
            price: parse_amount(price_text),
            image,
        })
    }
}
