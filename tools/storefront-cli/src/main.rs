//! Cart CLI - inspect and edit a persisted storefront cart.
//!
//! Commands:
//! - `cart show` - List items with their option pickers
//! - `cart total` - Print the cart total
//! - `cart inc` / `cart dec` - Change an item's quantity
//! - `cart select` - Choose an option for one attribute of an item
//! - `cart pick` - Choose options interactively
//! - `cart load` - Replace the cart contents from a file
//! - `cart check` - Validate the product snapshots in the cart
//! - `cart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod store;
mod telemetry;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CheckArgs, ConfigArgs, ItemArgs, LoadArgs, SelectArgs, ShowArgs};

/// Cart CLI - inspect and edit storefront carts
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Cart file path (overrides `cart.path` from the config)
    #[arg(long, global = true)]
    cart: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the items in the cart
    Show(ShowArgs),

    /// Print the cart total
    Total,

    /// Add one to an item's quantity
    Inc(ItemArgs),

    /// Take one from an item's quantity
    Dec(ItemArgs),

    /// Choose an option for one attribute of an item
    Select(SelectArgs),

    /// Choose an item's options interactively
    Pick(ItemArgs),

    /// Replace the cart contents with the items from a file
    Load(LoadArgs),

    /// Validate the product snapshots in the cart
    Check(CheckArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.cart.as_deref(), output)?;
    telemetry::init(&ctx.config.log, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args, &ctx),
        Commands::Total => commands::show::total(&ctx),
        Commands::Inc(args) => commands::quantity::increment(args, &ctx),
        Commands::Dec(args) => commands::quantity::decrement(args, &ctx),
        Commands::Select(args) => commands::select::run(args, &ctx),
        Commands::Pick(args) => commands::select::pick(args, &ctx),
        Commands::Load(args) => commands::load::run(args, &ctx),
        Commands::Check(args) => commands::check::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
