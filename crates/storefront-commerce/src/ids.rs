//! Newtype IDs for type-safe identifiers.
//!
//! Ids are opaque strings minted by whatever system owns the catalog. The
//! newtypes stop an `OptionId` from being passed where an `AttributeId` is
//! expected, which matters here because both are plain UUID strings on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a product in the catalog.
    ProductId
);
define_id!(
    /// Identifies a purchasable variant of a product.
    VariantId
);
define_id!(
    /// Identifies an axis of variation (e.g. "color") on a product.
    AttributeId
);
define_id!(
    /// Identifies one value of an attribute. Unique within its attribute only.
    OptionId
);
define_id!(
    /// Identifies a line in the cart.
    CartItemId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = OptionId::new("opt-black");
        assert_eq!(id.as_str(), "opt-black");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = AttributeId::new("5cf7d5ab-62d8-4344-b811-d184f4375f0f");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"5cf7d5ab-62d8-4344-b811-d184f4375f0f\"");

        let back: AttributeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_display() {
        let id = VariantId::new("var-789");
        assert_eq!(format!("{}", id), "var-789");
    }
}
