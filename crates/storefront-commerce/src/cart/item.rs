//! A cart line bound to a product snapshot and a selection.

use crate::catalog::{recompute_availability, repair_selection, Availability, Product, Selection, Variant};
use crate::error::CommerceError;
use crate::ids::{AttributeId, CartItemId, OptionId, VariantId};
use serde::{Deserialize, Serialize};

/// One line in the cart.
///
/// The item carries a full product snapshot so option availability can be
/// recomputed without going back to the catalog. `selected_variant` always
/// names a variant of that snapshot, or is `None` when the selection matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CartItemRecord")]
pub struct CartItem {
    id: CartItemId,
    product: Product,
    selection: Selection,
    selected_variant: Option<VariantId>,
    quantity: i64,
}

impl CartItem {
    /// Create an item from an explicit selection.
    ///
    /// The selection must name one existing option for every attribute of the
    /// product. The quantity is clamped to the resolved variant's stock, but
    /// never below 1.
    pub fn new(
        id: CartItemId,
        product: Product,
        selection: Selection,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        for (attribute, option) in selection.iter() {
            product.require_option(attribute, option)?;
        }
        if let Some(missing) = product
            .attributes
            .iter()
            .find(|a| selection.get(&a.id).is_none())
        {
            return Err(CommerceError::IncompleteSelection(missing.id.clone()));
        }

        let variant = product.resolve_selection(&selection);
        let quantity = clamp_quantity(quantity, variant);
        let selected_variant = variant.map(|v| v.id.clone());

        Ok(Self {
            id,
            product,
            selection,
            selected_variant,
            quantity,
        })
    }

    /// Create an item for a known variant, taking the selection from its properties.
    pub fn from_variant(
        id: CartItemId,
        product: Product,
        variant_id: &VariantId,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        let selection = product
            .variant(variant_id)
            .map(Variant::selection)
            .ok_or_else(|| CommerceError::VariantNotFound {
                product: product.id.clone(),
                variant: variant_id.clone(),
            })?;
        Self::new(id, product, selection, quantity)
    }

    pub fn id(&self) -> &CartItemId {
        &self.id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn selected_variant_id(&self) -> Option<&VariantId> {
        self.selected_variant.as_ref()
    }

    pub fn selected_variant(&self) -> Option<&Variant> {
        self.selected_variant
            .as_ref()
            .and_then(|id| self.product.variant(id))
    }

    /// Whether the current selection matches a variant.
    pub fn is_resolved(&self) -> bool {
        self.selected_variant().is_some()
    }

    /// Picker flags for every attribute of the embedded product.
    pub fn availability(&self) -> Availability {
        recompute_availability(&self.product, &self.selection)
    }

    /// Stock of the selected variant; `None` when unresolved.
    pub fn stock_limit(&self) -> Option<i64> {
        self.selected_variant().map(|v| v.stock_cnt)
    }

    pub fn can_increment(&self) -> bool {
        self.stock_limit().map_or(true, |stock| self.quantity < stock)
    }

    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    pub fn unit_price_in_cents(&self) -> Option<i64> {
        self.selected_variant().map(|v| v.price_in_cents)
    }

    /// Price times quantity; 0 when unresolved.
    pub fn line_total_in_cents(&self) -> i64 {
        self.unit_price_in_cents()
            .map_or(0, |price| price.saturating_mul(self.quantity))
    }

    /// Short label for the current selection, e.g. "black / L".
    pub fn selection_label(&self) -> String {
        self.product
            .attributes
            .iter()
            .filter_map(|attribute| {
                self.selection
                    .get(&attribute.id)
                    .and_then(|option| attribute.option(option))
                    .map(|option| option.name.as_str())
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub(crate) fn increment(&mut self) {
        let next = self.quantity.saturating_add(1);
        self.quantity = clamp_quantity(next, self.selected_variant());
    }

    pub(crate) fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// The item as it would be after choosing `option` for `attribute`.
    ///
    /// Fails without building anything if either id is not on the product.
    /// Other attributes left on an unreachable option are moved to a reachable
    /// one when possible. Quantity can only go down, to the new variant's stock.
    pub fn with_option(&self, attribute: &AttributeId, option: &OptionId) -> Result<Self, CommerceError> {
        self.product.require_option(attribute, option)?;

        let selection = repair_selection(
            &self.product,
            self.selection.with(attribute, option),
            attribute,
        );
        let variant = self.product.resolve_selection(&selection);
        let quantity = match variant {
            Some(_) => clamp_quantity(self.quantity, variant),
            None => self.quantity,
        };

        Ok(Self {
            id: self.id.clone(),
            product: self.product.clone(),
            selected_variant: variant.map(|v| v.id.clone()),
            selection,
            quantity,
        })
    }
}

/// Cap at stock when a variant is known, floor at 1 either way.
fn clamp_quantity(quantity: i64, variant: Option<&Variant>) -> i64 {
    match variant {
        Some(variant) => quantity.min(variant.stock_cnt).max(1),
        None => quantity.max(1),
    }
}

/// Wire form of a cart item.
///
/// The selection is the stored truth and `selectedVariant` is derived from it.
/// Records written before selections were stored only carry `selectedVariant`;
/// their selection is taken from that variant's properties. Any attribute left
/// without a valid choice falls back to its first option.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartItemRecord {
    id: CartItemId,
    product: Product,
    #[serde(default)]
    selection: Selection,
    #[serde(default)]
    selected_variant: Option<VariantId>,
    quantity: i64,
}

impl From<CartItemRecord> for CartItem {
    fn from(record: CartItemRecord) -> Self {
        let selection = if record.selection.is_empty() {
            record
                .selected_variant
                .as_ref()
                .and_then(|id| record.product.variant(id))
                .map(Variant::selection)
                .unwrap_or_default()
        } else {
            record.selection
        };

        let selection = {
            let completed = record.product.complete_selection(&selection);
            if completed != selection {
                tracing::debug!(
                    item = %record.id,
                    product = %record.product.id,
                    "filled incomplete selection"
                );
            }
            completed
        };
        let selected_variant = record
            .product
            .resolve_selection(&selection)
            .map(|v| v.id.clone());
        if record.selected_variant.is_some() && record.selected_variant != selected_variant {
            tracing::debug!(item = %record.id, "stored variant disagrees with selection");
        }

        Self {
            id: record.id,
            product: record.product,
            selection,
            selected_variant,
            quantity: record.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::test_support::{select, tshirt, tshirt_item};

    fn record(
        selected_variant: serde_json::Value,
        selection: Option<serde_json::Value>,
        quantity: i64,
    ) -> serde_json::Value {
        let mut json = serde_json::json!({
            "id": "i-1",
            "product": tshirt(),
            "selectedVariant": selected_variant,
            "quantity": quantity,
        });
        if let Some(selection) = selection {
            json["selection"] = selection;
        }
        json
    }

    fn selected_count(item: &CartItem, attribute: &str) -> usize {
        item.availability()
            .attribute(&attribute.into())
            .unwrap()
            .options
            .iter()
            .filter(|o| o.is_selected)
            .count()
    }

    #[test]
    fn test_new_resolves_and_clamps() {
        let item = tshirt_item("i-1", "black", "L", 5);
        assert_eq!(item.selected_variant_id().unwrap().as_str(), "v-black-l");
        // v-black-l has 2 in stock.
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.selection_label(), "black / L");
    }

    #[test]
    fn test_new_unresolved_keeps_quantity() {
        let item = tshirt_item("i-1", "green", "XS", 7);
        assert!(!item.is_resolved());
        assert_eq!(item.quantity(), 7);
        assert_eq!(item.line_total_in_cents(), 0);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        let err = CartItem::new("i".into(), tshirt(), select(&[("color", "black")]), 1).unwrap_err();
        assert!(matches!(err, CommerceError::IncompleteSelection(ref a) if a.as_str() == "size"));

        let err = CartItem::new(
            "i".into(),
            tshirt(),
            select(&[("color", "black"), ("size", "XXL")]),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, CommerceError::OptionNotFound { .. }));

        let err = CartItem::new(
            "i".into(),
            tshirt(),
            select(&[("color", "black"), ("size", "L")]),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(0)));
    }

    #[test]
    fn test_from_variant() {
        let item = CartItem::from_variant("i".into(), tshirt(), &"v-blue-xl".into(), 3).unwrap();
        assert_eq!(item.selection(), &select(&[("color", "blue"), ("size", "XL")]));
        assert_eq!(item.quantity(), 3);

        let err = CartItem::from_variant("i".into(), tshirt(), &"v-nope".into(), 1).unwrap_err();
        assert!(matches!(err, CommerceError::VariantNotFound { .. }));
    }

    #[test]
    fn test_increment_capped_at_stock() {
        let mut item = tshirt_item("i-1", "black", "L", 2);
        assert!(!item.can_increment());
        item.increment();
        assert_eq!(item.quantity(), 2);
    }

    #[test]
    fn test_zero_stock_floors_at_one() {
        let mut product = tshirt();
        product.variants[0].stock_cnt = 0;
        let mut item = CartItem::new("i".into(), product, select(&[("color", "black"), ("size", "L")]), 4).unwrap();

        assert_eq!(item.stock_limit(), Some(0));
        assert_eq!(item.quantity(), 1);
        assert!(!item.can_increment());
        item.increment();
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_increment_unbounded_when_unresolved() {
        let mut item = tshirt_item("i-1", "green", "XS", 40);
        assert!(item.can_increment());
        item.increment();
        assert_eq!(item.quantity(), 41);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut item = tshirt_item("i-1", "black", "XL", 2);
        item.decrement();
        assert_eq!(item.quantity(), 1);
        assert!(!item.can_decrement());
        item.decrement();
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_decrement_saturates_on_extreme_quantity() {
        let json = record(serde_json::json!("v-blue-xl"), None, i64::MIN);
        let mut item: CartItem = serde_json::from_value(json).unwrap();

        item.decrement();
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_with_option_lowers_quantity_to_new_stock() {
        let item = tshirt_item("i-1", "blue", "XL", 6);
        let next = item.with_option(&"color".into(), &"black".into()).unwrap();

        assert_eq!(next.selected_variant_id().unwrap().as_str(), "v-black-xl");
        assert_eq!(next.quantity(), 5);
        // The original is untouched.
        assert_eq!(item.quantity(), 6);
    }

    #[test]
    fn test_with_option_never_raises_quantity() {
        let item = tshirt_item("i-1", "black", "L", 1);
        let next = item.with_option(&"size".into(), &"XL".into()).unwrap();
        assert_eq!(next.quantity(), 1);
    }

    #[test]
    fn test_with_option_unknown_ids() {
        let item = tshirt_item("i-1", "black", "L", 1);
        assert!(matches!(
            item.with_option(&"fabric".into(), &"black".into()),
            Err(CommerceError::AttributeNotFound { .. })
        ));
        assert!(matches!(
            item.with_option(&"color".into(), &"red".into()),
            Err(CommerceError::OptionNotFound { .. })
        ));
    }

    #[test]
    fn test_legacy_record_derives_selection() {
        let item = tshirt_item("i-1", "blue", "XL", 1);
        let mut json = serde_json::to_value(&item).unwrap();
        json.as_object_mut().unwrap().remove("selection");

        let back: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_record_without_variant_or_selection_is_completed() {
        let item: CartItem = serde_json::from_value(record(serde_json::Value::Null, None, 1)).unwrap();

        // First option of each attribute.
        assert_eq!(item.selection(), &select(&[("color", "black"), ("size", "L")]));
        assert_eq!(item.selected_variant_id().unwrap().as_str(), "v-black-l");
        assert_eq!(
            item.availability().selected_variant.as_ref(),
            item.selected_variant_id()
        );
        assert_eq!(selected_count(&item, "color"), 1);
        assert_eq!(selected_count(&item, "size"), 1);

        let mut cart = Cart::default();
        cart.set_cart_items(vec![item]).unwrap();
        cart.set_item_option(&"i-1".into(), &"color".into(), &"green".into())
            .unwrap();

        let item = &cart.items()[0];
        assert_eq!(selected_count(item, "color"), 1);
        assert_eq!(selected_count(item, "size"), 1);
        assert_eq!(item.selected_variant_id().unwrap().as_str(), "v-green-l");
        assert_eq!(cart.total_in_cents(), 999);
    }

    #[test]
    fn test_record_with_partial_selection_is_completed() {
        let json = record(
            serde_json::Value::Null,
            Some(serde_json::json!([
                { "attributeId": "size", "optionId": "XL" },
                { "attributeId": "fabric", "optionId": "cotton" },
            ])),
            1,
        );
        let item: CartItem = serde_json::from_value(json).unwrap();

        assert_eq!(item.selection(), &select(&[("color", "black"), ("size", "XL")]));
        assert_eq!(item.selected_variant_id().unwrap().as_str(), "v-black-xl");
    }

    #[test]
    fn test_stale_variant_follows_selection() {
        let json = record(
            serde_json::json!("v-blue-xl"),
            Some(serde_json::json!([
                { "attributeId": "color", "optionId": "black" },
                { "attributeId": "size", "optionId": "XL" },
            ])),
            2,
        );
        let item: CartItem = serde_json::from_value(json).unwrap();

        assert_eq!(item.selected_variant_id().unwrap().as_str(), "v-black-xl");
        assert_eq!(item.stock_limit(), Some(5));
        assert_eq!(item.line_total_in_cents(), 5000);

        let mut cart = Cart::default();
        cart.set_cart_items(vec![item]).unwrap();
        assert_eq!(cart.total_in_cents(), 5000);
    }

    #[test]
    fn test_record_with_unmatched_selection_is_unresolved() {
        let json = record(
            serde_json::json!("v-green-l"),
            Some(serde_json::json!([
                { "attributeId": "color", "optionId": "green" },
                { "attributeId": "size", "optionId": "XS" },
            ])),
            3,
        );
        let item: CartItem = serde_json::from_value(json).unwrap();

        assert!(!item.is_resolved());
        assert_eq!(item.line_total_in_cents(), 0);
        assert_eq!(item.quantity(), 3);
    }

    #[test]
    fn test_with_option_on_partial_selection_does_not_resolve() {
        let item = CartItem {
            id: "i-1".into(),
            product: tshirt(),
            selection: Selection::new(),
            selected_variant: None,
            quantity: 1,
        };
        let next = item.with_option(&"color".into(), &"black".into()).unwrap();

        assert_eq!(next.selection(), &select(&[("color", "black")]));
        assert!(!next.is_resolved());
        assert_eq!(next.line_total_in_cents(), 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let item = tshirt_item("i-1", "blue", "XL", 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["selectedVariant"], "v-blue-xl");
        assert_eq!(json["product"]["variants"][0]["priceInCents"], 2500);
        assert_eq!(json["product"]["variants"][0]["stockCnt"], 2);
    }
}
