//! Quantity stepper commands.

use anyhow::Result;
use storefront_commerce::prelude::*;

use super::{find_item, ItemArgs};
use crate::context::Context;
use super::show::ItemView;

/// Run the inc command.
pub fn increment(args: ItemArgs, ctx: &Context) -> Result<()> {
    step(args, ctx, SharedCart::increment_quantity, |item| {
        format!("only {} in stock", item.stock_limit().unwrap_or(item.quantity()))
    })
}

/// Run the dec command.
pub fn decrement(args: ItemArgs, ctx: &Context) -> Result<()> {
    step(args, ctx, SharedCart::decrement_quantity, |_| {
        "quantity can't go below 1".to_string()
    })
}

fn step(
    args: ItemArgs,
    ctx: &Context,
    apply: fn(&SharedCart, &CartItemId) -> Result<CartItem, CommerceError>,
    unchanged_reason: fn(&CartItem) -> String,
) -> Result<()> {
    let (cart, store) = ctx.open_cart()?;
    let (id, before) = cart.read(|cart| {
        find_item(cart, &args.item).map(|item| (item.id().clone(), item.quantity()))
    })?;

    let item = apply(&cart, &id)?;
    ctx.save_cart(&cart, &store)?;

    if ctx.output.is_json() {
        ctx.output.json(&ItemView::new(&item, cart.read(Cart::currency)));
        return Ok(());
    }

    if item.quantity() == before {
        ctx.output.warn(&format!(
            "{} {} stays at {} ({})",
            item.product().name,
            item.selection_label(),
            before,
            unchanged_reason(&item)
        ));
    } else {
        ctx.output.success(&format!(
            "{} {}: {} → {}",
            item.product().name,
            item.selection_label(),
            before,
            item.quantity()
        ));
    }
    Ok(())
}
