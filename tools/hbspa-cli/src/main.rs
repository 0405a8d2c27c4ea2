//! hbspa CLI - the storefront from a terminal.
//!
//! Commands:
//! - `hbspa catalog` - List products and refresh the local catalog snapshot
//! - `hbspa cart` - Show or change the local cart
//! - `hbspa preview` - Render the cart preview widget
//! - `hbspa services` / `hbspa book` - Spa bookings
//! - `hbspa login` / `hbspa logout` / `hbspa profile` - Shopper account
//! - `hbspa admin` - Product administration
//! - `hbspa contact` - Validate the contact form
//! - `hbspa config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AdminArgs, BookArgs, CartArgs, CatalogArgs, ConfigArgs, ContactArgs, LoginArgs, LogoutArgs,
    PreviewArgs,
};

/// hbspa - Browse the spa catalog, manage your cart and book services
#[derive(Parser)]
#[command(name = "hbspa")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Catalog(CatalogArgs),

    /// List product categories
    Categories,

    /// Show or change the cart
    Cart(CartArgs),

    /// Render the cart preview
    Preview(PreviewArgs),

    /// List bookable spa services
    Services,

    /// Book a spa service
    Book(BookArgs),

    /// Show your profile, reservations and orders
    Profile,

    /// Store a token issued by the backend
    Login(LoginArgs),

    /// Remove stored credentials
    Logout(LogoutArgs),

    /// Manage products (admin token required)
    Admin(AdminArgs),

    /// Validate a contact form submission
    Contact(ContactArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Categories => commands::catalog::run_categories(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Preview(args) => commands::preview::run(args, &ctx).await,
        Commands::Services => commands::booking::run_services(&ctx).await,
        Commands::Book(args) => commands::booking::run(args, &ctx).await,
        Commands::Profile => commands::account::run_profile(&ctx).await,
        Commands::Login(args) => commands::account::run_login(args, &ctx).await,
        Commands::Logout(args) => commands::account::run_logout(args, &ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Contact(args) => commands::contact::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
