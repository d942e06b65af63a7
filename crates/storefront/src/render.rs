//! HTML rendering adapter.
//!
//! This is the only layer that knows about markup. It turns widget state into
//! askama templates; the host page swaps the resulting fragments into place.

use std::time::Duration;

use askama::Template;
use rust_decimal::Decimal;
use thiserror::Error;

use funky_teens_core::{CurrencyCode, Price};

use crate::models::{CartItem, Notification, Session};
use crate::state::{AppState, Region};

const BRAND: &str = "Funky Teens";

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Total without symbol, two decimals.
    pub total: String,
    pub currency_symbol: &'static str,
    pub item_count: u32,
}

impl CartView {
    /// Build the view for `items` priced in `currency`.
    #[must_use]
    pub fn new(items: &[CartItem], currency: CurrencyCode) -> Self {
        let total = items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()));
        let item_count = items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity));

        Self {
            items: items
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            total: Price::new(total, currency).amount_display(),
            currency_symbol: currency.symbol(),
            item_count,
        }
    }

    /// An empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self::new(&[], currency)
    }
}

impl CartItemView {
    fn new(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: Price::new(item.price, currency).to_string(),
            line_price: Price::new(item.line_total(), currency).to_string(),
        }
    }
}

/// Login popup template.
#[derive(Template)]
#[template(path = "login_popup.html")]
pub struct LoginPopupTemplate {
    pub brand: &'static str,
    pub open: bool,
}

/// Nav bar login/logout control.
#[derive(Template)]
#[template(path = "partials/nav_auth.html")]
pub struct NavAuthTemplate {
    pub username: Option<String>,
}

/// Cart overlay template.
#[derive(Template)]
#[template(path = "cart/overlay.html")]
pub struct CartOverlayTemplate {
    pub cart: CartView,
    pub open: bool,
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Notification toast template.
#[derive(Template)]
#[template(path = "partials/notification.html")]
pub struct NotificationTemplate {
    pub message: String,
    pub icon: &'static str,
    pub css_class: &'static str,
    pub timeout_ms: u128,
}

/// Renders widget state into HTML fragments.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    currency: CurrencyCode,
    notification_timeout: Duration,
}

impl Renderer {
    #[must_use]
    pub const fn new(currency: CurrencyCode, notification_timeout: Duration) -> Self {
        Self {
            currency,
            notification_timeout,
        }
    }

    /// Render one region of the page from the current state.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if a template fails to render.
    pub fn region(&self, state: &AppState, region: Region) -> Result<String, RenderError> {
        match region {
            Region::NavAuth => self.nav_auth(state.sessions().session()),
            Region::LoginPopup => self.login_popup(state.is_login_popup_open()),
            Region::CartOverlay => self.cart_overlay(state.cart().items(), state.is_cart_open()),
            Region::CartCount => self.cart_count(state.cart().count()),
        }
    }

    /// # Errors
    ///
    /// Returns `RenderError` if the template fails to render.
    pub fn login_popup(&self, open: bool) -> Result<String, RenderError> {
        Ok(LoginPopupTemplate { brand: BRAND, open }.render()?)
    }

    /// # Errors
    ///
    /// Returns `RenderError` if the template fails to render.
    pub fn nav_auth(&self, session: &Session) -> Result<String, RenderError> {
        let username = session
            .current_user()
            .map(|user| user.username.to_string());
        Ok(NavAuthTemplate { username }.render()?)
    }

    /// # Errors
    ///
    /// Returns `RenderError` if the template fails to render.
    pub fn cart_overlay(&self, items: &[CartItem], open: bool) -> Result<String, RenderError> {
        let cart = CartView::new(items, self.currency);
        Ok(CartOverlayTemplate { cart, open }.render()?)
    }

    /// # Errors
    ///
    /// Returns `RenderError` if the template fails to render.
    pub fn cart_items(&self, items: &[CartItem]) -> Result<String, RenderError> {
        let cart = CartView::new(items, self.currency);
        Ok(CartItemsTemplate { cart }.render()?)
    }

    /// # Errors
    ///
    /// Returns `RenderError` if the template fails to render.
    pub fn cart_count(&self, count: u32) -> Result<String, RenderError> {
        Ok(CartCountTemplate { count }.render()?)
    }

    /// # Errors
    ///
    /// Returns `RenderError` if the template fails to render.
    pub fn notification(&self, notice: &Notification) -> Result<String, RenderError> {
        Ok(NotificationTemplate {
            message: notice.message.clone(),
            icon: notice.kind.icon(),
            css_class: notice.kind.css_class(),
            timeout_ms: self.notification_timeout.as_millis(),
        }
        .render()?)
    }
}
