//! Cart listing and totals.

use anyhow::Result;
use console::style;
use serde::Serialize;
use storefront_commerce::prelude::*;

use super::{find_item, ShowArgs};
use crate::context::Context;
use crate::output::{picker_row, quantity_stepper};

/// One cart line as printed in JSON mode.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: CartItemId,
    pub product: String,
    pub selection: String,
    pub quantity: i64,
    pub selected_variant: Option<VariantId>,
    pub unit_price: Option<Money>,
    pub line_total: Money,
    pub can_increment: bool,
    pub can_decrement: bool,
    pub availability: Availability,
}

impl ItemView {
    pub fn new(item: &CartItem, currency: Currency) -> Self {
        Self {
            id: item.id().clone(),
            product: item.product().name.clone(),
            selection: item.selection_label(),
            quantity: item.quantity(),
            selected_variant: item.selected_variant_id().cloned(),
            unit_price: item.unit_price_in_cents().map(|c| Money::new(c, currency)),
            line_total: Money::new(item.line_total_in_cents(), currency),
            can_increment: item.can_increment(),
            can_decrement: item.can_decrement(),
            availability: item.availability(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView {
    version: u64,
    items: Vec<ItemView>,
    total: Money,
}

/// Run the show command.
pub fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let (cart, _) = ctx.open_cart()?;

    cart.read(|cart| -> Result<()> {
        let items: Vec<&CartItem> = match &args.item {
            Some(query) => vec![find_item(cart, query)?],
            None => cart.items().iter().collect(),
        };

        if ctx.output.is_json() {
            ctx.output.json(&CartView {
                version: cart.version(),
                items: items.iter().map(|i| ItemView::new(i, cart.currency())).collect(),
                total: cart.total(),
            });
            return Ok(());
        }

        ctx.output.header(&format!("Cart ({} items)", cart.item_count()));
        if items.is_empty() {
            ctx.output.info("Cart is empty.");
            return Ok(());
        }

        let show_options = args.options || args.item.is_some();
        for item in items {
            print_item(item, cart.currency(), show_options);
        }

        println!();
        println!("  {} {}", style("Total:").bold(), style(cart.total().display()).bold());
        Ok(())
    })
}

/// Run the total command.
pub fn total(ctx: &Context) -> Result<()> {
    let (cart, _) = ctx.open_cart()?;
    let (pricing, currency) = cart.read(|cart| (cart.calculate_pricing(), cart.currency()));

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "totalInCents": pricing.total.amount_cents,
            "currency": currency.code(),
            "display": pricing.total.display(),
            "unresolved": pricing.unresolved_count(),
        }));
        return Ok(());
    }

    println!("{}", pricing.total.display());
    let unresolved = pricing.unresolved_count();
    if unresolved > 0 {
        ctx.output
            .warn(&format!("{} item(s) not available and left out of the total", unresolved));
    }
    Ok(())
}

pub(crate) fn print_item(item: &CartItem, currency: Currency, show_options: bool) {
    println!();
    println!(
        "  {} {} {}",
        style(item.product().name.as_str()).bold(),
        item.selection_label(),
        style(format!("({})", item.id())).dim()
    );

    match item.unit_price_in_cents() {
        Some(price) => println!(
            "    {}  × {}  = {}",
            quantity_stepper(item),
            Money::new(price, currency).display(),
            Money::new(item.line_total_in_cents(), currency).display()
        ),
        None => println!(
            "    {}  {}",
            quantity_stepper(item),
            style("This variant isn't available").red()
        ),
    }

    if show_options {
        for attribute in &item.availability().attributes {
            println!("    {}", picker_row(attribute));
        }
    }
}
