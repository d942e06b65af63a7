//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use funky_teens_core::ProductId;

/// One line in the cart.
///
/// Stored as `{"id", "name", "price", "image", "quantity"}` with the price as
/// a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identity; at most one line per ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the configured currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    /// Number of units, at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// `price × quantity`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item() -> CartItem {
        CartItem {
            id: ProductId::new("tee-1"),
            name: "Neon Tee".to_string(),
            price: Decimal::new(49_950, 2),
            image: "/img/tee.jpg".to_string(),
            quantity: 3,
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item().line_total(), Decimal::new(149_850, 2));
    }

    #[test]
    fn test_line_total_saturates() {
        let line = CartItem {
            price: Decimal::MAX,
            quantity: 2,
            ..item()
        };
        assert_eq!(line.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_price_is_a_json_number() {
        let json = serde_json::to_value(item()).unwrap();
        assert!(json["price"].is_number());
        assert_eq!(json["image"], "/img/tee.jpg");
        assert_eq!(json["quantity"], 3);
    }

    #[test]
    fn test_reads_integer_prices() {
        let raw = r#"{"id":"p1","name":"Cap","price":299,"image":"cap.png","quantity":1}"#;
        let parsed: CartItem = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.price, Decimal::new(299, 0));
    }

    #[test]
    fn test_rejects_negative_quantity() {
        let raw = r#"{"id":"p1","name":"Cap","price":299,"image":"cap.png","quantity":-1}"#;
        assert!(serde_json::from_str::<CartItem>(raw).is_err());
    }
}
