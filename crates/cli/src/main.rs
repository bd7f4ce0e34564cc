//! Shopstand CLI - drive the storefront engine from the terminal.
//!
//! State persists under the configured data directory between invocations,
//! so a session can be spread across commands:
//!
//! ```bash
//! # Browse the catalog
//! shopstand catalog
//!
//! # Build up a cart
//! shopstand cart add 1
//! shopstand cart add 1
//! shopstand cart show
//!
//! # Check out
//! shopstand checkout --name "Jane Doe" --email jane@example.com \
//!     --address "1 Main St" --city Springfield --zip 12345 \
//!     --card-number 4242424242424242 --card-name "Jane Doe" \
//!     --expiry 12/29 --cvv 123
//!
//! # Administer orders
//! shopstand orders list
//! shopstand orders set-status ORD-1700000000123 Shipped --secret "$SHOPSTAND_ADMIN_SECRET"
//! ```
//!
//! # Environment
//!
//! - `SHOPSTAND_ADMIN_SECRET` - required; gates `orders set-status`
//! - `SHOPSTAND_DATA_DIR` - record directory (default `.shopstand`)
//! - `SHOPSTAND_ANALYTICS` - `on`/`off` (default `on`; events go to the log)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use shopstand_storefront::analytics::{AnalyticsSink, LogSink, NoopSink};
use shopstand_storefront::catalog::Catalog;
use shopstand_storefront::config::StoreConfig;
use shopstand_storefront::shop::Shop;
use shopstand_storefront::storage::JsonFileStore;

mod commands;

#[derive(Parser)]
#[command(name = "shopstand")]
#[command(author, version, about = "Shopstand storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Catalog,
    /// Inspect and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Convert the cart into an order
    Checkout(commands::checkout::CheckoutArgs),
    /// Browse and administer orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with line totals
    Show,
    /// Add one unit of a product
    Add { product_id: i32 },
    /// Increment a line's quantity
    Increment { product_id: i32 },
    /// Decrement a line's quantity (removes the line at zero)
    Decrement { product_id: i32 },
    /// Remove a line entirely
    Remove { product_id: i32 },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List all orders, oldest first
    List,
    /// Show one order with its line items
    Show { order_id: String },
    /// Change an order's status (requires the admin secret)
    SetStatus {
        order_id: String,
        /// One of: Processing, Shipped, Delivered, Cancelled
        status: String,
        /// Admin shared secret attempt (checked against SHOPSTAND_ADMIN_SECRET)
        #[arg(short, long)]
        secret: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopstand=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;

    let kv = JsonFileStore::open(&config.data_dir)?;
    let analytics: Box<dyn AnalyticsSink> = if config.analytics_enabled {
        Box::new(LogSink)
    } else {
        Box::new(NoopSink)
    };
    let mut shop = Shop::open_headless(Catalog::seed(), Box::new(kv), analytics);

    match cli.command {
        Commands::Catalog => commands::catalog::list(&mut shop),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&mut shop),
            CartAction::Add { product_id } => commands::cart::add(&mut shop, product_id)?,
            CartAction::Increment { product_id } => {
                commands::cart::increment(&mut shop, product_id);
            }
            CartAction::Decrement { product_id } => {
                commands::cart::decrement(&mut shop, product_id);
            }
            CartAction::Remove { product_id } => commands::cart::remove(&mut shop, product_id),
        },
        Commands::Checkout(args) => commands::checkout::run(&mut shop, &args)?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&mut shop),
            OrdersAction::Show { order_id } => commands::orders::show(&mut shop, &order_id)?,
            OrdersAction::SetStatus {
                order_id,
                status,
                secret,
            } => commands::orders::set_status(&mut shop, &config, &order_id, &status, &secret)?,
        },
    }
    Ok(())
}
