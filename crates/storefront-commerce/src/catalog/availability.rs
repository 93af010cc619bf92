//! Option availability for attribute pickers.
//!
//! An option is available when swapping it into the current selection, with
//! every other attribute held at its current choice, still matches a variant.
//! This answers "what can I reach from here" one attribute at a time. It is
//! not a constraint solver.

use crate::catalog::{Product, Selection};
use crate::ids::{AttributeId, OptionId, VariantId};
use serde::{Deserialize, Serialize};

/// Picker state for a single option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionAvailability {
    pub id: OptionId,
    pub name: String,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// Picker state for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAvailability {
    pub id: AttributeId,
    pub name: String,
    pub options: Vec<OptionAvailability>,
}

impl AttributeAvailability {
    /// The currently selected option.
    pub fn selected(&self) -> Option<&OptionAvailability> {
        self.options.iter().find(|o| o.is_selected)
    }

    pub fn option(&self, id: &OptionId) -> Option<&OptionAvailability> {
        self.options.iter().find(|o| &o.id == id)
    }
}

/// Flags for every option of a product plus the variant the selection resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub attributes: Vec<AttributeAvailability>,
    pub selected_variant: Option<VariantId>,
}

impl Availability {
    pub fn attribute(&self, id: &AttributeId) -> Option<&AttributeAvailability> {
        self.attributes.iter().find(|a| &a.id == id)
    }

    pub fn option(&self, attribute: &AttributeId, option: &OptionId) -> Option<&OptionAvailability> {
        self.attribute(attribute).and_then(|a| a.option(option))
    }

    pub fn is_resolved(&self) -> bool {
        self.selected_variant.is_some()
    }
}

/// Whether choosing `option` for `attribute` keeps the rest of `selection` reachable.
pub fn is_option_available(
    product: &Product,
    selection: &Selection,
    attribute: &AttributeId,
    option: &OptionId,
) -> bool {
    product
        .resolve_variant(&selection.with(attribute, option))
        .is_some()
}

/// Compute selected/disabled flags for every option of `product`.
pub fn recompute_availability(product: &Product, selection: &Selection) -> Availability {
    let attributes = product
        .attributes
        .iter()
        .map(|attribute| {
            let chosen = selection.get(&attribute.id);
            let options = attribute
                .options
                .iter()
                .map(|option| OptionAvailability {
                    id: option.id.clone(),
                    name: option.name.clone(),
                    is_selected: chosen == Some(&option.id),
                    is_disabled: !is_option_available(product, selection, &attribute.id, &option.id),
                })
                .collect();

            AttributeAvailability {
                id: attribute.id.clone(),
                name: attribute.name.clone(),
                options,
            }
        })
        .collect();

    Availability {
        attributes,
        selected_variant: product.resolve_selection(selection).map(|v| v.id.clone()),
    }
}

/// Move dead-end choices on other attributes to a reachable option.
///
/// Runs after the shopper changed `changed`. If the selection still resolves it
/// is returned as-is. Otherwise each other attribute, in product order, whose
/// current option is disabled switches to its first enabled option. The
/// attribute the shopper just picked is never touched, and an attribute with
/// no enabled option keeps its choice.
pub fn repair_selection(product: &Product, mut selection: Selection, changed: &AttributeId) -> Selection {
    if product.resolve_selection(&selection).is_some() {
        return selection;
    }

    for attribute in product.attributes.iter().filter(|a| &a.id != changed) {
        let Some(current) = selection.get(&attribute.id).cloned() else {
            continue;
        };
        if is_option_available(product, &selection, &attribute.id, &current) {
            continue;
        }

        let replacement = attribute
            .options
            .iter()
            .find(|o| is_option_available(product, &selection, &attribute.id, &o.id))
            .map(|o| o.id.clone());

        if let Some(option) = replacement {
            tracing::debug!(
                product = %product.id,
                attribute = %attribute.id,
                from = %current,
                to = %option,
                "moved unreachable option"
            );
            selection.set(attribute.id.clone(), option);
        }
    }

    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Attribute, Variant};
    use crate::test_support::{select, tshirt};

    fn disabled(availability: &Availability, attribute: &str, option: &str) -> bool {
        availability
            .option(&attribute.into(), &option.into())
            .map(|o| o.is_disabled)
            .unwrap()
    }

    #[test]
    fn test_flags_relative_to_other_attributes() {
        let product = tshirt();
        let availability = recompute_availability(&product, &select(&[("color", "black"), ("size", "XS")]));

        // Black comes in every size.
        assert!(!disabled(&availability, "size", "L"));
        assert!(!disabled(&availability, "size", "XL"));
        assert!(!disabled(&availability, "size", "XS"));
        // Only black comes in XS.
        assert!(!disabled(&availability, "color", "black"));
        assert!(disabled(&availability, "color", "blue"));
        assert!(disabled(&availability, "color", "green"));

        assert_eq!(availability.selected_variant, Some("v-black-xs".into()));
    }

    #[test]
    fn test_exactly_one_selected_per_attribute() {
        let product = tshirt();
        let availability = recompute_availability(&product, &select(&[("color", "blue"), ("size", "XL")]));

        for attribute in &availability.attributes {
            assert_eq!(attribute.options.iter().filter(|o| o.is_selected).count(), 1);
        }
        assert_eq!(
            availability.attribute(&"color".into()).unwrap().selected().unwrap().name,
            "blue"
        );
    }

    #[test]
    fn test_unresolved_selection_keeps_flags() {
        let product = tshirt();
        let availability = recompute_availability(&product, &select(&[("color", "green"), ("size", "XS")]));

        assert!(!availability.is_resolved());
        assert!(!disabled(&availability, "size", "L"));
        assert!(disabled(&availability, "size", "XL"));
        assert!(disabled(&availability, "size", "XS"));
    }

    #[test]
    fn test_partial_selection_never_resolves() {
        let product = tshirt();
        let availability = recompute_availability(&product, &select(&[("color", "black")]));

        assert!(!availability.is_resolved());
        assert!(availability
            .attribute(&"size".into())
            .unwrap()
            .selected()
            .is_none());
        assert!(recompute_availability(&product, &Selection::new()).selected_variant.is_none());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let product = tshirt();
        let selection = select(&[("color", "green"), ("size", "L")]);
        assert_eq!(
            recompute_availability(&product, &selection),
            recompute_availability(&product, &selection)
        );
    }

    #[test]
    fn test_repair_moves_other_attribute() {
        let product = tshirt();
        let repaired = repair_selection(&product, select(&[("color", "green"), ("size", "XS")]), &"color".into());
        assert_eq!(repaired, select(&[("color", "green"), ("size", "L")]));
    }

    #[test]
    fn test_repair_never_touches_changed_attribute() {
        let product = tshirt();
        let repaired = repair_selection(&product, select(&[("color", "green"), ("size", "XS")]), &"size".into());
        // XS only exists in black, so color is the one that moves.
        assert_eq!(repaired, select(&[("color", "black"), ("size", "XS")]));
    }

    #[test]
    fn test_repair_leaves_dead_end_alone() {
        let product = tshirt()
            .with_attribute(Attribute::new("fit", "Fit").with_option("slim", "Slim"));
        // No variant mentions `fit`, so nothing is reachable with it selected.
        let selection = select(&[("color", "black"), ("size", "L"), ("fit", "slim")]);
        let repaired = repair_selection(&product, selection.clone(), &"color".into());
        assert_eq!(repaired, selection);
    }

    #[test]
    fn test_repair_with_three_attributes() {
        let mut product = tshirt()
            .with_attribute(Attribute::new("fit", "Fit").with_option("slim", "Slim").with_option("loose", "Loose"));
        product.variants = vec![
            Variant::new("a", 100, 1)
                .with_property("color", "black")
                .with_property("size", "L")
                .with_property("fit", "slim"),
            Variant::new("b", 100, 1)
                .with_property("color", "green")
                .with_property("size", "L")
                .with_property("fit", "loose"),
        ];

        let repaired = repair_selection(
            &product,
            select(&[("color", "green"), ("size", "L"), ("fit", "slim")]),
            &"color".into(),
        );
        assert_eq!(repaired, select(&[("color", "green"), ("size", "L"), ("fit", "loose")]));
        assert_eq!(product.resolve_variant(&repaired).unwrap().id.as_str(), "b");
    }
}
