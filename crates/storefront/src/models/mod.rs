//! Domain models for the storefront widgets.
//!
//! These are the records the widgets persist and render. They carry their
//! storage wire format via serde attributes so a page written by an older
//! build of the widgets still loads.

pub mod cart;
pub mod notification;
pub mod session;

pub use cart::CartItem;
pub use notification::{NoticeKind, Notification};
pub use session::{CurrentUser, Session};

/// Storage keys for persisted widget state.
pub mod keys {
    /// Key for the login session record.
    pub const SESSION: &str = "funky_auth";

    /// Key for the ordered list of cart items.
    pub const CART: &str = "funky_cart";
}
