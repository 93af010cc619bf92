//! The cart collection.

use std::collections::HashSet;

use crate::cart::{CartItem, CartPricing, CartSnapshot, LineItemPricing};
use crate::config::CartConfig;
use crate::error::CommerceError;
use crate::ids::{AttributeId, CartItemId, OptionId};
use crate::money::{Currency, Money};

/// A shopping cart: cart items in display order, unique by id.
///
/// Every mutating method either applies completely or returns an error and
/// leaves the cart as it was. `version` goes up by one for each mutation that
/// changed something.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
    version: u64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
            version: 0,
        }
    }

    pub fn with_config(config: &CartConfig) -> Self {
        Self::new(config.currency)
    }

    /// Rebuild a cart from a persisted snapshot, keeping its version.
    pub fn from_snapshot(snapshot: CartSnapshot) -> Result<Self, CommerceError> {
        ensure_unique(&snapshot.items)?;
        Ok(Self {
            items: snapshot.items,
            currency: snapshot.currency,
            version: snapshot.version,
        })
    }

    /// Copy of the current state for persistence.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            version: self.version,
            currency: self.currency,
            items: self.items.clone(),
        }
    }

    /// Replace the whole contents of the cart.
    ///
    /// Items are kept exactly as given and in the given order; two items for
    /// the same product stay separate lines. A batch that repeats an item id
    /// is rejected.
    pub fn set_cart_items(&mut self, items: Vec<CartItem>) -> Result<(), CommerceError> {
        ensure_unique(&items)?;

        for item in &items {
            let duplicates = item.product().duplicate_variants();
            if !duplicates.is_empty() {
                tracing::warn!(
                    item_id = %item.id(),
                    product = %item.product().id,
                    count = duplicates.len(),
                    "product snapshot has duplicate variants"
                );
            }
        }

        tracing::debug!(count = items.len(), "replacing cart items");
        self.items = items;
        self.version += 1;
        Ok(())
    }

    /// Add one to an item's quantity, up to the selected variant's stock.
    pub fn increment_quantity(&mut self, item_id: &CartItemId) -> Result<&CartItem, CommerceError> {
        let index = self.position(item_id)?;
        let before = self.items[index].quantity();
        self.items[index].increment();
        self.finish_quantity_change(index, before)
    }

    /// Take one from an item's quantity, never below 1.
    pub fn decrement_quantity(&mut self, item_id: &CartItemId) -> Result<&CartItem, CommerceError> {
        let index = self.position(item_id)?;
        let before = self.items[index].quantity();
        self.items[index].decrement();
        self.finish_quantity_change(index, before)
    }

    /// Choose `option_id` for `attribute_id` on one item.
    ///
    /// The new item state is built first and swapped in whole, so a bad id
    /// leaves the item untouched.
    pub fn set_item_option(
        &mut self,
        item_id: &CartItemId,
        attribute_id: &AttributeId,
        option_id: &OptionId,
    ) -> Result<&CartItem, CommerceError> {
        let index = self.position(item_id)?;
        let next = self.items[index].with_option(attribute_id, option_id)?;

        tracing::debug!(
            item_id = %item_id,
            attribute = %attribute_id,
            option = %option_id,
            variant = ?next.selected_variant_id(),
            quantity = next.quantity(),
            "item option changed"
        );

        if next != self.items[index] {
            self.items[index] = next;
            self.version += 1;
        }
        Ok(&self.items[index])
    }

    /// Sum of price × quantity over items with a selected variant.
    pub fn total_in_cents(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |total, item| total.saturating_add(item.line_total_in_cents()))
    }

    /// The cart total in the cart currency.
    pub fn total(&self) -> Money {
        Money::new(self.total_in_cents(), self.currency)
    }

    /// Per-line price breakdown.
    pub fn calculate_pricing(&self) -> CartPricing {
        let line_items = self
            .items
            .iter()
            .map(|item| LineItemPricing {
                cart_item_id: item.id().clone(),
                variant_id: item.selected_variant_id().cloned(),
                unit_price: item
                    .unit_price_in_cents()
                    .map(|cents| Money::new(cents, self.currency)),
                quantity: item.quantity(),
                total: Money::new(item.line_total_in_cents(), self.currency),
            })
            .collect();

        CartPricing {
            total: self.total(),
            line_items,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get_item(&self, item_id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == item_id)
    }

    /// Total number of units (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(CartItem::quantity).sum()
    }

    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn position(&self, item_id: &CartItemId) -> Result<usize, CommerceError> {
        self.items
            .iter()
            .position(|i| i.id() == item_id)
            .ok_or_else(|| CommerceError::ItemNotFound(item_id.clone()))
    }

    fn finish_quantity_change(&mut self, index: usize, before: i64) -> Result<&CartItem, CommerceError> {
        let item = &self.items[index];
        if item.quantity() != before {
            tracing::debug!(item_id = %item.id(), from = before, to = item.quantity(), "quantity changed");
            self.version += 1;
        }
        Ok(&self.items[index])
    }
}

fn ensure_unique(items: &[CartItem]) -> Result<(), CommerceError> {
    let mut seen = HashSet::new();
    match items.iter().find(|item| !seen.insert(item.id())) {
        Some(item) => Err(CommerceError::DuplicateCartItem(item.id().clone())),
        None => Ok(()),
    }
}
