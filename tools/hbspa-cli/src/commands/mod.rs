//! CLI command implementations.

pub mod account;
pub mod admin;
pub mod booking;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod preview;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only list products in this category (the local snapshot is not updated).
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and total.
    Show,
    /// Add one unit and notify the backend.
    Add {
        /// Product ID.
        id: String,
    },
    /// Increase a quantity locally.
    Inc {
        /// Product ID.
        id: String,
        /// Amount to add (negative values subtract).
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        qty: i64,
    },
    /// Decrease a quantity by one.
    Dec {
        /// Product ID.
        id: String,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// Render the widget opened.
    #[arg(long)]
    pub open: bool,

    /// Widget variant: bubble, bar or badge.
    #[arg(long)]
    pub variant: Option<String>,

    /// Print the rendered HTML instead of a summary.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the book command.
#[derive(Args)]
pub struct BookArgs {
    /// Spa service ID (see `hbspa services`).
    #[arg(short, long)]
    pub service: Option<String>,

    /// Contact email.
    #[arg(short, long)]
    pub email: String,

    /// Date, YYYY-MM-DD.
    #[arg(short, long)]
    pub date: String,

    /// Time, HH:MM.
    #[arg(short, long)]
    pub time: String,

    /// Phone number.
    #[arg(short, long, default_value = "")]
    pub phone: String,

    /// Free-form note.
    #[arg(short, long, default_value = "")]
    pub note: String,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Bearer token issued by the backend.
    #[arg(long)]
    pub token: String,

    /// Store the token for the admin panel.
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for the logout command.
#[derive(Args)]
pub struct LogoutArgs {
    /// Sign out of the admin panel instead.
    #[arg(long)]
    pub admin: bool,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List products and categories.
    List,
    /// Create a product.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "0")]
        stock: i64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        contenido: String,
        #[arg(long, default_value = "")]
        image_url: String,
        /// Category ID.
        #[arg(long)]
        category: String,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub subject: String,
    #[arg(long, default_value = "")]
    pub message: String,
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
    },
}
