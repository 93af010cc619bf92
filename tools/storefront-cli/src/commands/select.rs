//! Option selection commands.

use anyhow::Result;
use dialoguer::Select;
use storefront_commerce::prelude::*;

use super::show::{print_item, ItemView};
use super::{find_item, ItemArgs, SelectArgs};
use crate::context::Context;

/// Run the select command.
pub fn run(args: SelectArgs, ctx: &Context) -> Result<()> {
    let (cart, store) = ctx.open_cart()?;
    let (item_id, attribute_id, option_id) = cart.read(|cart| {
        let item = find_item(cart, &args.item)?;
        let (attribute_id, option_id) = resolve_names(item.product(), &args.attribute, &args.option);
        Ok::<_, anyhow::Error>((item.id().clone(), attribute_id, option_id))
    })?;

    let item = cart.set_item_option(&item_id, &attribute_id, &option_id)?;
    ctx.save_cart(&cart, &store)?;
    report(&item, &cart, ctx);
    Ok(())
}

/// Run the pick command.
pub fn pick(args: ItemArgs, ctx: &Context) -> Result<()> {
    let (cart, store) = ctx.open_cart()?;
    let mut item = cart.read(|cart| find_item(cart, &args.item).cloned())?;

    let attribute_ids: Vec<AttributeId> = item
        .product()
        .attributes
        .iter()
        .map(|a| a.id.clone())
        .collect();

    for attribute_id in &attribute_ids {
        let availability = item.availability();
        let Some(attribute) = availability.attribute(attribute_id) else {
            continue;
        };

        let labels: Vec<String> = attribute
            .options
            .iter()
            .map(|o| {
                if o.is_disabled {
                    format!("{} (unavailable)", o.name)
                } else {
                    o.name.clone()
                }
            })
            .collect();
        let current = attribute.options.iter().position(|o| o.is_selected).unwrap_or(0);

        let chosen = Select::new()
            .with_prompt(format!("{} {}", item.product().name, attribute.name))
            .items(&labels)
            .default(current)
            .interact()?;

        if chosen != current {
            let option_id = attribute.options[chosen].id.clone();
            item = cart.set_item_option(item.id(), attribute_id, &option_id)?;
        }
    }

    ctx.save_cart(&cart, &store)?;
    report(&item, &cart, ctx);
    Ok(())
}

/// Map attribute and option arguments to ids: an exact id first, then a
/// case-insensitive name. Unknown values pass through so the cart reports them.
fn resolve_names(product: &Product, attribute: &str, option: &str) -> (AttributeId, OptionId) {
    let found = product
        .attribute(&attribute.into())
        .or_else(|| {
            product
                .attributes
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(attribute))
        });

    let Some(found) = found else {
        return (attribute.into(), option.into());
    };

    let option_id = found
        .option(&option.into())
        .or_else(|| found.option_by_name(option))
        .map(|o| o.id.clone())
        .unwrap_or_else(|| option.into());

    (found.id.clone(), option_id)
}

fn report(item: &CartItem, cart: &SharedCart, ctx: &Context) {
    let currency = cart.read(Cart::currency);
    if ctx.output.is_json() {
        ctx.output.json(&ItemView::new(item, currency));
        return;
    }

    print_item(item, currency, true);
    if !item.is_resolved() {
        ctx.output
            .warn("No variant matches this selection; the item is left out of the total");
    }
}
