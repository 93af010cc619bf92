//! Commerce error types.

use crate::ids::{AttributeId, CartItemId, OptionId, ProductId, VariantId};
use thiserror::Error;

/// Errors that can occur in catalog and cart operations.
///
/// A selection that matches no variant is not an error; it is represented as
/// an unresolved cart item.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// No cart item with this id.
    #[error("Cart item not found: {0}")]
    ItemNotFound(CartItemId),

    /// The attribute does not exist on the product.
    #[error("Attribute {attribute} not found on product {product}")]
    AttributeNotFound {
        product: ProductId,
        attribute: AttributeId,
    },

    /// The option does not exist on the attribute.
    #[error("Option {option} not found on attribute {attribute}")]
    OptionNotFound {
        attribute: AttributeId,
        option: OptionId,
    },

    /// The variant does not exist on the product.
    #[error("Variant {variant} not found on product {product}")]
    VariantNotFound {
        product: ProductId,
        variant: VariantId,
    },

    /// A selection is missing an option for this attribute.
    #[error("Selection has no option for attribute {0}")]
    IncompleteSelection(AttributeId),

    /// Quantity below 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The same cart item id appeared twice in one batch.
    #[error("Duplicate cart item: {0}")]
    DuplicateCartItem(CartItemId),

    /// Catalog data breaks a product invariant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A hydration source or persistence sink failed.
    #[error("Storage error: {0}")]
    Storage(String),
}
