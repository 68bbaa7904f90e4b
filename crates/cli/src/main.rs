//! Food Menu CLI - Browse the menu, price a cart, and simulate an order.
//!
//! # Usage
//!
//! ```bash
//! # Show the category chips
//! food-menu categories
//!
//! # List pizzas matching "cheese"
//! food-menu list --category Pizzas --search cheese
//!
//! # Price a cart (repeat an ID to add it twice)
//! food-menu quote 1 1 7
//!
//! # Place an order and wait for the confirmation to close
//! food-menu order 1 1 7 --wait
//! ```
//!
//! # Environment Variables
//!
//! See `food_menu_session::config` for the full list. `--catalog` overrides
//! `MENU_CATALOG_SOURCE`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use food_menu_core::{CategoryFilter, ProductId};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "food-menu")]
#[command(author, version, about = "Food menu ordering tools")]
struct Cli {
    /// Catalog URL or file path (overrides `MENU_CATALOG_SOURCE`)
    #[arg(long, global = true)]
    catalog: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the menu categories
    Categories,
    /// List products, optionally filtered
    List {
        /// Category to show (`All` for every category)
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,

        /// Case-insensitive search over names and descriptions
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add products to a cart and show the order summary
    Quote {
        /// Product IDs to add, one unit per occurrence
        #[arg(required = true)]
        ids: Vec<ProductId>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add products to a cart and place the order
    Order {
        /// Product IDs to add, one unit per occurrence
        #[arg(required = true)]
        ids: Vec<ProductId>,

        /// Wait for the confirmation to close and show the cleared cart
        #[arg(long)]
        wait: bool,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so JSON output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "food_menu_cli=info,food_menu_session=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Categories => commands::menu::categories(),
        Commands::List {
            category,
            search,
            json,
        } => commands::menu::list(cli.catalog.as_deref(), category, search, json).await?,
        Commands::Quote { ids, json } => {
            commands::cart::quote(cli.catalog.as_deref(), &ids, json).await?;
        }
        Commands::Order { ids, wait } => {
            commands::cart::order(cli.catalog.as_deref(), &ids, wait).await?;
        }
    }
    Ok(())
}
