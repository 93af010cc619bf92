//! Variant resolution and cart mutation engine for the storefront.
//!
//! - **Catalog**: product snapshots, the variant index and option availability
//! - **Cart**: cart items, the cart collection, pricing and the shared handle
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let product = Product::new("p-1", "t-shirt", "T-Shirt")
//!     .with_attribute(Attribute::new("color", "Color").with_option("black", "black").with_option("green", "green"))
//!     .with_attribute(Attribute::new("size", "Size").with_option("L", "L").with_option("XS", "XS"))
//!     .with_variant(Variant::new("v-1", 2500, 3).with_property("color", "black").with_property("size", "XS"))
//!     .with_variant(Variant::new("v-2", 999, 1).with_property("color", "green").with_property("size", "L"));
//!
//! let item = CartItem::from_variant("item-1".into(), product, &"v-1".into(), 1)?;
//! let mut cart = Cart::new(Currency::USD);
//! cart.set_cart_items(vec![item])?;
//!
//! // Green only comes in L, so the size follows the color.
//! let item = cart.set_item_option(&"item-1".into(), &"color".into(), &"green".into())?;
//! assert_eq!(item.selection_label(), "green / L");
//! assert_eq!(cart.total().display(), "$9.99");
//! # Ok::<(), CommerceError>(())
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::CartConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::CartConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        recompute_availability, resolve_variant, Attribute, AttributeAvailability, AttributeOption,
        Availability, OptionAvailability, Product, Property, Selection, Variant,
    };

    // Cart
    pub use crate::cart::{
        Cart, CartItem, CartPricing, CartSink, CartSnapshot, CartSource, LineItemPricing,
        MemoryCartStore, SharedCart,
    };
}
