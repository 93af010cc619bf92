//! The shopper's attribute → option choices for one item.

use std::collections::BTreeMap;

use crate::catalog::Property;
use crate::ids::{AttributeId, OptionId};
use serde::{Deserialize, Serialize};

/// A set of properties with at most one option per attribute.
///
/// This is the stored truth for a cart item. Selected/disabled flags shown to
/// the shopper are always computed from it. On the wire it is a plain list of
/// properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Property>", into = "Vec<Property>")]
pub struct Selection {
    choices: BTreeMap<AttributeId, OptionId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The option chosen for `attribute`, if any.
    pub fn get(&self, attribute: &AttributeId) -> Option<&OptionId> {
        self.choices.get(attribute)
    }

    /// Choose `option` for `attribute`, returning the option it replaces.
    pub fn set(&mut self, attribute: AttributeId, option: OptionId) -> Option<OptionId> {
        self.choices.insert(attribute, option)
    }

    /// Copy of this selection with `attribute` set to `option`.
    pub fn with(&self, attribute: &AttributeId, option: &OptionId) -> Self {
        let mut next = self.clone();
        next.set(attribute.clone(), option.clone());
        next
    }

    pub fn remove(&mut self, attribute: &AttributeId) -> Option<OptionId> {
        self.choices.remove(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttributeId, &OptionId)> {
        self.choices.iter()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// Later properties for the same attribute overwrite earlier ones.
impl FromIterator<Property> for Selection {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for property in iter {
            selection.set(property.attribute_id, property.option_id);
        }
        selection
    }
}

impl From<Vec<Property>> for Selection {
    fn from(properties: Vec<Property>) -> Self {
        properties.into_iter().collect()
    }
}

impl From<Selection> for Vec<Property> {
    fn from(selection: Selection) -> Self {
        selection
            .choices
            .into_iter()
            .map(|(attribute_id, option_id)| Property {
                attribute_id,
                option_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_previous_choice() {
        let mut selection = Selection::new();
        assert!(selection.set("color".into(), "black".into()).is_none());
        let previous = selection.set("color".into(), "green".into());

        assert_eq!(previous, Some(OptionId::new("black")));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get(&"color".into()), Some(&OptionId::new("green")));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let base: Selection = vec![Property::new("color", "black"), Property::new("size", "XS")].into();
        let trial = base.with(&"size".into(), &"L".into());

        assert_eq!(base.get(&"size".into()), Some(&OptionId::new("XS")));
        assert_eq!(trial.get(&"size".into()), Some(&OptionId::new("L")));
        assert_eq!(trial.get(&"color".into()), Some(&OptionId::new("black")));
    }

    #[test]
    fn test_serializes_as_property_list() {
        let selection: Selection = vec![Property::new("size", "L"), Property::new("color", "green")].into();
        let json = serde_json::to_value(&selection).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "attributeId": "color", "optionId": "green" },
                { "attributeId": "size", "optionId": "L" }
            ])
        );

        let back: Selection = serde_json::from_value(json).unwrap();
        assert_eq!(back, selection);
    }
}
