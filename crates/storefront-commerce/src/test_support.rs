//! Shared fixtures for unit tests.

use crate::cart::CartItem;
use crate::catalog::{Attribute, Product, Property, Selection, Variant};
use crate::ids::CartItemId;

/// T-shirt with colors {black, blue, green} and sizes {L, XL, XS}.
///
/// Variants exist for (black, L), (black, XL), (black, XS), (blue, XL) and
/// (green, L), in that order.
pub fn tshirt() -> Product {
    let variant = |id: &str, price: i64, stock: i64, color: &str, size: &str| {
        Variant::new(id, price, stock)
            .with_property("color", color)
            .with_property("size", size)
    };

    Product::new("p-tshirt", "t-shirt", "T-Shirt")
        .with_attribute(
            Attribute::new("color", "Color")
                .with_option("black", "black")
                .with_option("blue", "blue")
                .with_option("green", "green"),
        )
        .with_attribute(
            Attribute::new("size", "Size")
                .with_option("L", "L")
                .with_option("XL", "XL")
                .with_option("XS", "XS"),
        )
        .with_variant(variant("v-black-l", 2500, 2, "black", "L"))
        .with_variant(variant("v-black-xl", 2500, 5, "black", "XL"))
        .with_variant(variant("v-black-xs", 2700, 3, "black", "XS"))
        .with_variant(variant("v-blue-xl", 2900, 8, "blue", "XL"))
        .with_variant(variant("v-green-l", 999, 1, "green", "L"))
}

pub fn select(pairs: &[(&str, &str)]) -> Selection {
    pairs.iter().map(|(a, o)| Property::new(*a, *o)).collect()
}

/// A t-shirt cart item with the given color/size and quantity.
pub fn tshirt_item(id: &str, color: &str, size: &str, quantity: i64) -> CartItem {
    CartItem::new(
        CartItemId::new(id),
        tshirt(),
        select(&[("color", color), ("size", size)]),
        quantity,
    )
    .unwrap()
}
