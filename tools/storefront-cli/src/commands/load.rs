//! Replace the cart contents from a file.

use std::fs;

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use storefront_commerce::prelude::*;

use super::LoadArgs;
use crate::context::Context;

/// Run the load command.
pub fn run(args: LoadArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let items = parse_items(&content)
        .with_context(|| format!("Failed to parse cart items from {}", path.display()))?;

    let (cart, store) = ctx.open_cart()?;
    let existing = cart.read(Cart::unique_item_count);

    if existing > 0 && !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Replace the {} item(s) in the cart?", existing))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Load cancelled");
            return Ok(());
        }
    }

    let count = items.len();
    cart.set_cart_items(items)?;
    ctx.save_cart(&cart, &store)?;

    if ctx.output.is_json() {
        ctx.output.json(&cart.snapshot());
    } else {
        ctx.output.success(&format!(
            "Loaded {} item(s), total {}",
            count,
            cart.read(Cart::total).display()
        ));
    }
    Ok(())
}

/// Accept a full cart snapshot or a bare list of cart items.
fn parse_items(content: &str) -> Result<Vec<CartItem>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let items = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        serde_json::from_value::<CartSnapshot>(value)?.items
    };
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_CART: &str = include_str!("../../../../demos/cart.json");

    #[test]
    fn test_parse_snapshot_or_list() {
        let items = parse_items(DEMO_CART).unwrap();
        assert_eq!(items.len(), 3);

        let list = serde_json::to_string(&items).unwrap();
        assert_eq!(parse_items(&list).unwrap(), items);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_items("[{\"id\": 1}]").is_err());
        assert!(parse_items("nope").is_err());
    }
}
