//! Variant lookup by selected options.

use crate::catalog::{Selection, Variant};

/// Find the first variant whose properties include every property of
/// `selection`.
///
/// With one property per attribute this is an exact match. With fewer it
/// answers "is anything reachable from here". Returns `None` when nothing
/// matches, which callers treat as an unavailable combination.
pub fn resolve_variant<'a>(variants: &'a [Variant], selection: &Selection) -> Option<&'a Variant> {
    variants.iter().find(|variant| variant.matches(selection))
}
