//! Validation of the product snapshots held by cart items.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::prelude::*;

use super::CheckArgs;
use crate::context::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Finding {
    item_id: CartItemId,
    severity: Severity,
    message: String,
}

/// Item fields as written in the cart file, before hydration fills them in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem {
    id: CartItemId,
    #[serde(default)]
    selection: Selection,
    #[serde(default)]
    selected_variant: Option<VariantId>,
}

#[derive(Debug, Default, Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<StoredItem>,
}

fn read_stored(ctx: &Context) -> Result<HashMap<CartItemId, StoredItem>> {
    let stored: StoredCart = match fs::read_to_string(&ctx.cart_path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", ctx.cart_path.display()))?,
        Err(e) if e.kind() == ErrorKind::NotFound => StoredCart::default(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", ctx.cart_path.display()))
        }
    };
    Ok(stored.items.into_iter().map(|item| (item.id.clone(), item)).collect())
}

/// Run the check command.
pub fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let (cart, _) = ctx.open_cart()?;
    let stored = read_stored(ctx)?;
    let findings = cart.read(|cart| {
        cart.items()
            .iter()
            .flat_map(|item| check_item(item, stored.get(item.id()), args.strict))
            .collect::<Vec<_>>()
    });
    let errors = findings.iter().filter(|f| f.severity == Severity::Error).count();

    if ctx.output.is_json() {
        ctx.output.json(&findings);
    } else {
        ctx.output.header("Checking cart");
        for finding in &findings {
            let msg = format!("{}: {}", finding.item_id, finding.message);
            match finding.severity {
                Severity::Error => ctx.output.error(&msg),
                Severity::Warning => ctx.output.warn(&msg),
            }
        }
    }

    if errors > 0 {
        bail!("Cart has {} error(s)", errors);
    }
    if findings.is_empty() {
        ctx.output.success("Cart is valid");
    } else {
        ctx.output.success("Cart is valid (with warnings)");
    }
    Ok(())
}

fn check_item(item: &CartItem, stored: Option<&StoredItem>, strict: bool) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut push = |severity, message: String| {
        findings.push(Finding {
            item_id: item.id().clone(),
            severity,
            message,
        })
    };
    let product = item.product();

    if let Err(e) = product.validate() {
        push(Severity::Error, e.to_string());
    }

    let duplicates = product.duplicate_variants();
    if !duplicates.is_empty() {
        let severity = if strict { Severity::Error } else { Severity::Warning };
        let ids: Vec<&str> = duplicates.iter().map(|v| v.id.as_str()).collect();
        push(
            severity,
            format!("{} has duplicate variants: {}", product.name, ids.join(", ")),
        );
    }

    for (attribute, option) in item.selection().iter() {
        if let Err(e) = product.require_option(attribute, option) {
            push(Severity::Error, format!("selection: {}", e));
        }
    }
    if let Some(missing) = product
        .attributes
        .iter()
        .find(|a| item.selection().get(&a.id).is_none())
    {
        push(Severity::Error, format!("no option selected for {}", missing.name));
    }

    if let Some(stored) = stored {
        check_stored(item, stored, &mut push);
    }

    if let Some(variant) = item.selected_variant() {
        if !variant.is_in_stock() {
            push(Severity::Warning, format!("selected variant {} is out of stock", variant.id));
        }
    }

    if item.quantity() < 1 {
        push(Severity::Error, format!("quantity {} is below 1", item.quantity()));
    }
    if let Some(stock) = item.stock_limit() {
        if stock >= 1 && item.quantity() > stock {
            push(
                Severity::Warning,
                format!("quantity {} is above the {} in stock", item.quantity(), stock),
            );
        }
    }

    findings
}

/// Compare the file's fields with what hydration made of them.
fn check_stored(item: &CartItem, stored: &StoredItem, push: &mut impl FnMut(Severity, String)) {
    let product = item.product();
    let written = if stored.selection.is_empty() {
        stored
            .selected_variant
            .as_ref()
            .and_then(|id| product.variant(id))
            .map(Variant::selection)
            .unwrap_or_default()
    } else {
        stored.selection.clone()
    };
    if &written != item.selection() {
        push(
            Severity::Warning,
            format!(
                "stored selection is incomplete or names unknown options, using {}",
                item.selection_label()
            ),
        );
    }

    if stored.selected_variant.is_some() && stored.selected_variant.as_ref() != item.selected_variant_id() {
        push(
            Severity::Warning,
            format!(
                "stored variant {} does not match the selection ({})",
                stored.selected_variant.as_ref().map_or("none", |v| v.as_str()),
                item.selected_variant_id().map_or("none", |v| v.as_str())
            ),
        );
    }
}
