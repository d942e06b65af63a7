//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Everything that cannot be part of a number in display text ("₹1,299.00").
static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[^0-9.\-]+").expect("valid regex")
});

/// Leading decimal number of the scrubbed text.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)").expect("valid regex")
});

/// Parse an amount out of free-form price text.
///
/// Currency symbols, thousands separators and whitespace are dropped, then
/// the leading number is read. Text without a number yields zero.
///
/// ```
/// use funky_teens_core::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("₹1,299.50"), Decimal::new(129_950, 2));
/// assert_eq!(parse_amount("free"), Decimal::ZERO);
/// ```
#[must_use]
pub fn parse_amount(text: &str) -> Decimal {
    let scrubbed = NON_NUMERIC.replace_all(text, "");
    LEADING_NUMBER
        .find(&scrubbed)
        .and_then(|m| {
            let number = m.as_str().trim_end_matches('.');
            let number = match number.strip_prefix('-') {
                Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
                _ if number.starts_with('.') => format!("0{number}"),
                _ => number.to_string(),
            };
            Decimal::from_str(&number).ok()
        })
        .unwrap_or(Decimal::ZERO)
}

/// Largest magnitude a stored price may have.
///
/// Prices are stored as JSON numbers. Amounts within this bound with at most
/// [`AMOUNT_SCALE`] decimal places are written and read back exactly.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Decimal places kept on stored prices.
pub const AMOUNT_SCALE: u32 = 2;

/// Error returned when an amount cannot be stored as a price.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("amount {0} is outside the supported price range")]
pub struct AmountOutOfRange(pub Decimal);

/// Round `amount` to [`AMOUNT_SCALE`] places and check it against
/// [`MAX_AMOUNT`].
///
/// # Errors
///
/// Returns `AmountOutOfRange` if the rounded magnitude exceeds [`MAX_AMOUNT`].
///
/// ```
/// use funky_teens_core::storable_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(storable_amount(Decimal::new(12_345, 3)).unwrap(), Decimal::new(1_235, 2));
/// assert!(storable_amount(Decimal::MAX).is_err());
/// ```
pub fn storable_amount(amount: Decimal) -> Result<Decimal, AmountOutOfRange> {
    let rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.abs() <= MAX_AMOUNT {
        Ok(rounded)
    } else {
        Err(AmountOutOfRange(amount))
    }
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Amount with two decimal places, without a symbol (e.g., "499.00").
    #[must_use]
    pub fn amount_display(&self) -> String {
        format!(
            "{:.2}",
            self.amount
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.currency_code.symbol(),
            self.amount_display()
        )
    }
}

/// Error returned when a currency code is not supported.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_symbols() {
        assert_eq!(parse_amount("₹499"), Decimal::new(499, 0));
        assert_eq!(parse_amount(" Rs 1,299.99 "), Decimal::new(129_999, 2));
        assert_eq!(parse_amount("$12.5"), Decimal::new(125, 1));
    }

    #[test]
    fn test_parse_amount_without_number_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("₹"), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_reads_leading_number_only() {
        assert_eq!(parse_amount("1.2.3"), Decimal::new(12, 1));
        assert_eq!(parse_amount("10."), Decimal::new(10, 0));
        assert_eq!(parse_amount(".5"), Decimal::new(5, 1));
    }

    #[test]
    fn test_storable_amount_rounds_to_cents() {
        assert_eq!(
            storable_amount(Decimal::new(499, 0)).unwrap(),
            Decimal::new(499, 0)
        );
        assert_eq!(
            storable_amount(Decimal::new(12_345, 3)).unwrap(),
            Decimal::new(1_235, 2)
        );
    }

    #[test]
    fn test_storable_amount_bounds() {
        assert_eq!(storable_amount(MAX_AMOUNT).unwrap(), MAX_AMOUNT);
        assert_eq!(storable_amount(-MAX_AMOUNT).unwrap(), -MAX_AMOUNT);
        assert!(storable_amount(MAX_AMOUNT + Decimal::new(1, 2)).is_err());
        assert_eq!(
            storable_amount(Decimal::MAX),
            Err(AmountOutOfRange(Decimal::MAX))
        );
        let huge = parse_amount("79228162514264337593543950335");
        assert!(storable_amount(huge).is_err());
    }

    #[test]
    fn test_display_uses_symbol_and_two_decimals() {
        let price = Price::new(Decimal::new(499, 0), CurrencyCode::INR);
        assert_eq!(price.to_string(), "₹499.00");

        let price = Price::new(Decimal::new(12_345, 3), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$12.35");
    }

    #[test]
    fn test_zero_price() {
        assert_eq!(Price::zero(CurrencyCode::INR).amount_display(), "0.00");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("inr".parse::<CurrencyCode>().unwrap(), CurrencyCode::INR);
        assert_eq!(" GBP".parse::<CurrencyCode>().unwrap(), CurrencyCode::GBP);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
