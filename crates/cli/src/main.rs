//! Cartwheel CLI - shop from the terminal.
//!
//! Every command runs against the same session slot the storefront server
//! uses (`CARTWHEEL_DATA_DIR`/`CARTWHEEL_STORAGE_SLOT`), so a cart filled
//! here shows up over HTTP and the other way around.
//!
//! # Usage
//!
//! ```bash
//! cartwheel login --name "Ada Lovelace" --email ada@example.com
//! cartwheel products search phone
//! cartwheel cart add 121
//! cartwheel cart update 121 inc
//! cartwheel shop --category smartphones --sort low-high
//! cartwheel checkout --name "Ada Lovelace" --email ada@example.com \
//!     --phone 555-0100 --address "12 Analytical Row"
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use cartwheel_core::{Direction, ProductId};
use cartwheel_storefront::checkout::ShippingDetails;
use cartwheel_storefront::shop::{ShopFilters, ShopSort};
use clap::{Parser, Subcommand};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel shopping CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in locally (no password)
    Login {
        /// Display name; blank becomes "User"
        #[arg(short, long, default_value = "")]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Log out, clearing cart and wishlist
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect or change the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Filtered shop listing
    Shop {
        /// Exact category, or "All"
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,

        /// Price sort: low-high or high-low
        #[arg(long, value_parser = parse_sort, default_value = "default")]
        sort: ShopSort,
    },
    /// Place a simulated order for the current cart
    Checkout {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and totals
    Show,
    /// Add one unit of a catalog product
    Add { id: ProductId },
    /// Remove a line
    Remove { id: ProductId },
    /// Step a line's quantity: inc or dec (dec stops at 1)
    Update { id: ProductId, direction: Direction },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List wishlist entries
    Show,
    /// Add or remove a catalog product
    Toggle { id: ProductId },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List a page of products
    List {
        #[arg(short, long, default_value_t = 30)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        skip: u32,
    },
    /// Show one product
    Show { id: ProductId },
    /// Navbar-style search (at least 2 characters)
    Search { query: String },
    /// List categories
    Categories,
}

/// Log filter used when `RUST_LOG` is unset. Command output is logged at
/// info. Library chatter such as slot loading stays at warn, except for
/// checkout progress. Targets match by prefix, so the library crates need
/// their own entries.
const DEFAULT_LOG_FILTER: &str = "warn,cartwheel=info,cartwheel_core=warn,\
cartwheel_storefront=warn,cartwheel_storefront::checkout=info";

#[allow(clippy::unnecessary_wraps)]
fn parse_sort(s: &str) -> Result<ShopSort, String> {
    Ok(ShopSort::parse(s))
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::from_env()?;

    match cli.command {
        Commands::Login { name, email } => {
            commands::auth::login(&mut ctx.store, &name, &email)?;
        }
        Commands::Logout => commands::auth::logout(&mut ctx.store),
        Commands::Whoami => {
            commands::auth::whoami(&ctx.store);
        }
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(&ctx.store);
            }
            CartAction::Add { id } => {
                require_login(&ctx)?;
                let product = ctx.catalog.product(id).await?;
                commands::cart::add(&mut ctx.store, product.to_cart_product())?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut ctx.store, id),
            CartAction::Update { id, direction } => {
                commands::cart::step(&mut ctx.store, id, direction);
            }
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => {
                commands::wishlist::show(&ctx.store);
            }
            WishlistAction::Toggle { id } => {
                require_login(&ctx)?;
                let product = ctx.catalog.product(id).await?;
                commands::wishlist::toggle(&mut ctx.store, product.to_cart_product())?;
            }
        },
        Commands::Products { action } => match action {
            ProductsAction::List { limit, skip } => {
                commands::catalog::list(&ctx.catalog, limit, skip).await?;
            }
            ProductsAction::Show { id } => {
                commands::catalog::show(&ctx.catalog, id).await?;
            }
            ProductsAction::Search { query } => {
                commands::catalog::search(&ctx.catalog, &query).await?;
            }
            ProductsAction::Categories => commands::catalog::categories(&ctx.catalog).await?,
        },
        Commands::Shop {
            category,
            search,
            sort,
        } => {
            let filters = ShopFilters {
                category,
                search,
                sort,
            };
            commands::catalog::shop(&ctx.catalog, &filters).await?;
        }
        Commands::Checkout {
            name,
            email,
            phone,
            address,
        } => {
            let details = ShippingDetails {
                full_name: name,
                email,
                phone,
                address,
            };
            commands::checkout::place(&ctx.store, &details, ctx.config.checkout_delay).await?;
        }
    }
    Ok(())
}

/// Fail before any catalog request when nobody is logged in.
fn require_login(ctx: &Context) -> Result<(), commands::CommandError> {
    if ctx.store.state().is_logged_in() {
        Ok(())
    } else {
        Err(commands::CommandError::NotLoggedIn)
    }
}
