//! Product, attribute and variant types.

use std::collections::HashSet;

use crate::catalog::{resolve_variant, Selection};
use crate::error::CommerceError;
use crate::ids::{AttributeId, OptionId, ProductId, VariantId};
use serde::{Deserialize, Serialize};

/// A product snapshot with its axes of variation and concrete variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly slug.
    pub slug: String,
    /// Product name.
    pub name: String,
    /// Long description, if the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URLs, first one is the thumbnail.
    #[serde(default)]
    pub images: Vec<String>,
    /// Axes of variation. Order is only used for display and tie-breaking.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Purchasable variants.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slug: slug.into(),
            name: name.into(),
            description: None,
            images: Vec::new(),
            attributes: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Look up an attribute by id.
    pub fn attribute(&self, id: &AttributeId) -> Option<&Attribute> {
        self.attributes.iter().find(|a| &a.id == id)
    }

    /// Look up a variant by id. Duplicated ids resolve to the first entry.
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// First variant matching every property of `selection`.
    pub fn resolve_variant(&self, selection: &Selection) -> Option<&Variant> {
        resolve_variant(&self.variants, selection)
    }

    /// Whether `selection` names a choice for every attribute.
    pub fn is_complete_selection(&self, selection: &Selection) -> bool {
        self.attributes
            .iter()
            .all(|attribute| selection.get(&attribute.id).is_some())
    }

    /// Definitive lookup: only a selection covering every attribute resolves.
    pub fn resolve_selection(&self, selection: &Selection) -> Option<&Variant> {
        if self.is_complete_selection(selection) {
            self.resolve_variant(selection)
        } else {
            None
        }
    }

    /// Fill every attribute without a valid choice with its first option.
    ///
    /// Choices naming an unknown attribute or option are dropped first.
    pub fn complete_selection(&self, selection: &Selection) -> Selection {
        let mut completed = Selection::new();
        for (attribute, option) in selection.iter() {
            if self.require_option(attribute, option).is_ok() {
                completed.set(attribute.clone(), option.clone());
            }
        }

        for attribute in &self.attributes {
            if completed.get(&attribute.id).is_none() {
                if let Some(first) = attribute.options.first() {
                    completed.set(attribute.id.clone(), first.id.clone());
                }
            }
        }
        completed
    }

    /// Check that `option` is an option of `attribute` on this product.
    pub fn require_option(
        &self,
        attribute: &AttributeId,
        option: &OptionId,
    ) -> Result<&AttributeOption, CommerceError> {
        let found = self
            .attribute(attribute)
            .ok_or_else(|| CommerceError::AttributeNotFound {
                product: self.id.clone(),
                attribute: attribute.clone(),
            })?;

        found
            .option(option)
            .ok_or_else(|| CommerceError::OptionNotFound {
                attribute: attribute.clone(),
                option: option.clone(),
            })
    }

    /// Variants whose property set repeats one seen earlier in the list.
    ///
    /// Such duplicates never win a lookup, so they are harmless but usually
    /// point at a bad catalog export.
    pub fn duplicate_variants(&self) -> Vec<&Variant> {
        let mut seen = HashSet::new();
        self.variants
            .iter()
            .filter(|v| !seen.insert(v.selection()))
            .collect()
    }

    /// Check the catalog invariants for this snapshot.
    ///
    /// Returns the first violation found. Duplicate variants are not a
    /// violation.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut attribute_ids = HashSet::new();
        for attribute in &self.attributes {
            if !attribute_ids.insert(&attribute.id) {
                return Err(CommerceError::Validation(format!(
                    "product {}: attribute {} is listed twice",
                    self.id, attribute.id
                )));
            }
            if attribute.options.is_empty() {
                return Err(CommerceError::Validation(format!(
                    "product {}: attribute {} has no options",
                    self.id, attribute.id
                )));
            }
            let mut option_ids = HashSet::new();
            for option in &attribute.options {
                if !option_ids.insert(&option.id) {
                    return Err(CommerceError::Validation(format!(
                        "product {}: option {} repeats on attribute {}",
                        self.id, option.id, attribute.id
                    )));
                }
            }
        }

        for variant in &self.variants {
            if variant.price_in_cents < 0 {
                return Err(CommerceError::Validation(format!(
                    "variant {}: negative price {}",
                    variant.id, variant.price_in_cents
                )));
            }
            if variant.stock_cnt < 0 {
                return Err(CommerceError::Validation(format!(
                    "variant {}: negative stock {}",
                    variant.id, variant.stock_cnt
                )));
            }

            let mut covered = HashSet::new();
            for property in &variant.properties {
                self.require_option(&property.attribute_id, &property.option_id)
                    .map_err(|e| {
                        CommerceError::Validation(format!("variant {}: {}", variant.id, e))
                    })?;
                if !covered.insert(&property.attribute_id) {
                    return Err(CommerceError::Validation(format!(
                        "variant {}: attribute {} chosen twice",
                        variant.id, property.attribute_id
                    )));
                }
            }
            if let Some(missing) = self
                .attributes
                .iter()
                .find(|a| !covered.contains(&a.id))
            {
                return Err(CommerceError::Validation(format!(
                    "variant {}: no option for attribute {}",
                    variant.id, missing.id
                )));
            }
        }

        Ok(())
    }
}

/// An axis of variation (e.g. color) and its mutually exclusive options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    pub options: Vec<AttributeOption>,
}

impl Attribute {
    pub fn new(id: impl Into<AttributeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        self.options.push(AttributeOption {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn option(&self, id: &OptionId) -> Option<&AttributeOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Case-insensitive lookup by display name.
    pub fn option_by_name(&self, name: &str) -> Option<&AttributeOption> {
        self.options
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
    }
}

/// One value of an attribute (e.g. "black").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AttributeOption {
    pub id: OptionId,
    pub name: String,
}

/// One concrete choice: an option for an attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub attribute_id: AttributeId,
    #[serde(alias = "attributeOptionId")]
    pub option_id: OptionId,
}

impl Property {
    pub fn new(attribute_id: impl Into<AttributeId>, option_id: impl Into<OptionId>) -> Self {
        Self {
            attribute_id: attribute_id.into(),
            option_id: option_id.into(),
        }
    }
}

/// A purchasable SKU: one option per attribute, with its own price and stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Price in minor currency units.
    pub price_in_cents: i64,
    /// Stock snapshot taken when the product was loaded.
    #[serde(alias = "amountInStock")]
    pub stock_cnt: i64,
    #[serde(default)]
    pub images: Vec<String>,
    pub properties: Vec<Property>,
}

impl Variant {
    pub fn new(id: impl Into<VariantId>, price_in_cents: i64, stock_cnt: i64) -> Self {
        Self {
            id: id.into(),
            slug: None,
            price_in_cents,
            stock_cnt,
            images: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(
        mut self,
        attribute_id: impl Into<AttributeId>,
        option_id: impl Into<OptionId>,
    ) -> Self {
        self.properties.push(Property::new(attribute_id, option_id));
        self
    }

    /// True when every property of `selection` is also a property of this variant.
    pub fn matches(&self, selection: &Selection) -> bool {
        selection.iter().all(|(attribute, option)| {
            self.properties
                .iter()
                .any(|p| &p.attribute_id == attribute && &p.option_id == option)
        })
    }

    /// The selection this variant stands for.
    pub fn selection(&self) -> Selection {
        self.properties.iter().cloned().collect()
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock_cnt > 0
    }
}
