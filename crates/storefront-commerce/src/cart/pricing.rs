//! Cart pricing breakdown.

use crate::ids::{CartItemId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Totals for a cart, line by line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartPricing {
    /// Sum of all line totals.
    pub total: Money,
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Lines that contribute nothing because no variant matches.
    pub fn unresolved_count(&self) -> usize {
        self.line_items.iter().filter(|l| l.variant_id.is_none()).count()
    }
}

/// Pricing for a single cart item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPricing {
    pub cart_item_id: CartItemId,
    pub variant_id: Option<VariantId>,
    /// Unit price of the selected variant.
    pub unit_price: Option<Money>,
    pub quantity: i64,
    /// Unit price × quantity, zero when unresolved.
    pub total: Money,
}
