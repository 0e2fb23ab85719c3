//! AV Store CLI - Storage migrations and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the key/value table (PostgreSQL storage only)
//! av-cli migrate
//!
//! # Replace the admin password
//! av-cli password set 'new-password'
//!
//! # Restore the default admin password
//! av-cli password reset
//!
//! # Inspect and change products
//! av-cli products list
//! av-cli products export > products.json
//! av-cli products publish 1714564800000
//! av-cli products unpublish 1714564800000
//! av-cli products delete 1714564800000
//! ```
//!
//! # Environment Variables
//!
//! - `AV_STORAGE_URL` - Storage location (default: `data/av-store.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "av-cli")]
#[command(author, version, about = "AV Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the key/value table in PostgreSQL storage
    Migrate,
    /// Manage the admin password
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
    /// Inspect and change products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Replace the admin password
    Set {
        /// New password
        password: String,
    },
    /// Restore the default password
    Reset,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products, newest first
    List,
    /// Print the stored collection exactly as persisted
    Export,
    /// Show a product on the public catalog
    Publish {
        /// Product id
        id: String,
    },
    /// Hide a product from the public catalog
    Unpublish {
        /// Product id
        id: String,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let storage = commands::open_storage().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&storage).await?,
        Commands::Password { action } => match action {
            PasswordAction::Set { password } => {
                commands::password::set(storage, password).await?;
            }
            PasswordAction::Reset => commands::password::reset(storage).await?,
        },
        Commands::Products { action } => {
            let products = av_store_core::ProductStore::new(storage);
            match action {
                ProductsAction::List => commands::products::list(&products).await?,
                ProductsAction::Export => commands::products::export(&products).await?,
                ProductsAction::Publish { id } => {
                    commands::products::set_published(&products, &id, true).await?;
                }
                ProductsAction::Unpublish { id } => {
                    commands::products::set_published(&products, &id, false).await?;
                }
                ProductsAction::Delete { id } => commands::products::delete(&products, &id).await?,
            }
        }
    }
    Ok(())
}
