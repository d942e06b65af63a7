//! Product identifiers.
//!
//! Cart lines are keyed by the product ID found on the product card. Cards
//! without an explicit ID get a generated one so that each click still lands
//! in the cart as its own line.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix used for generated product IDs.
pub const GENERATED_PREFIX: &str = "prod_";

/// Identifier of a product in the cart.
///
/// Two cart lines with the same `ProductId` are the same line; adding the
/// product again merges into the existing quantity.
///
/// ```
/// use funky_teens_core::ProductId;
///
/// let id = ProductId::new("tee-042");
/// assert_eq!(id.as_str(), "tee-042");
///
/// let generated = ProductId::generate();
/// assert!(generated.is_generated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from an existing value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, unique product ID (`prod_<uuid>`).
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{GENERATED_PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// Whether this ID was produced by [`ProductId::generate`].
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.0.starts_with(GENERATED_PREFIX)
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
