//! Product catalog module.
//!
//! Contains the product snapshot types, the variant index and the
//! availability calculator used by attribute pickers.

mod availability;
mod index;
mod product;
mod selection;

pub use availability::{
    is_option_available, recompute_availability, repair_selection, Availability,
    AttributeAvailability, OptionAvailability,
};
pub use index::resolve_variant;
pub use product::{Attribute, AttributeOption, Product, Property, Variant};
pub use selection::Selection;
