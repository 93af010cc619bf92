//! CLI command implementations.

pub mod check;
pub mod config;
pub mod load;
pub mod quantity;
pub mod select;
pub mod show;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use storefront_commerce::prelude::*;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Show only this item.
    pub item: Option<String>,

    /// Include option pickers for every item.
    #[arg(short, long)]
    pub options: bool,
}

/// Arguments for commands acting on one cart item.
#[derive(Args)]
pub struct ItemArgs {
    /// Cart item id (a unique prefix is enough).
    pub item: String,
}

/// Arguments for the select command.
#[derive(Args)]
pub struct SelectArgs {
    /// Cart item id (a unique prefix is enough).
    pub item: String,

    /// Attribute id or name.
    pub attribute: String,

    /// Option id or name.
    pub option: String,
}

/// Arguments for the load command.
#[derive(Args)]
pub struct LoadArgs {
    /// JSON file holding a cart snapshot or a list of cart items.
    pub file: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Treat duplicate variants as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Currency code for new carts.
        #[arg(long, default_value = "USD")]
        currency: String,
    },
}

/// Find the item `query` names: an exact id, else the only id starting with it.
pub(crate) fn find_item<'a>(cart: &'a Cart, query: &str) -> Result<&'a CartItem> {
    if let Some(item) = cart.get_item(&query.into()) {
        return Ok(item);
    }

    let mut matches = cart.items().iter().filter(|i| i.id().as_str().starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (Some(_), Some(_)) => Err(anyhow!("Item id '{}' is ambiguous", query)),
        (None, _) => Err(CommerceError::ItemNotFound(query.into()).into()),
    }
}
