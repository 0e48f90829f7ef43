//! Hotel Favorites CLI - favorites from the terminal.
//!
//! Plays the part of a hotel page: renders favorite controls, runs the page
//! load sequence and toggles favorites as a guest, customer or owner.
//!
//! # Usage
//!
//! ```bash
//! # Favorite a hotel as a guest (stored on this device)
//! favorites toggle grand-plaza
//!
//! # Remove it from the guest favorites listing
//! favorites toggle grand-plaza --page /guest_favorites/
//!
//! # Sign in and carry the guest wishlist over to the account
//! FAVORITES_COOKIE="sessionid=...; csrftoken=..." favorites --actor customer sync
//!
//! # Inspect the local wishlist
//! favorites list
//! favorites restore grand-plaza harbour-inn
//! favorites clear
//! ```
//!
//! # Configuration
//!
//! Read from the environment (or `.env`), see
//! [`ClientConfig`](hotel_favorites_client::ClientConfig).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use hotel_favorites_client::ClientConfig;
use hotel_favorites_core::IdentityContext;

mod commands;

#[derive(Parser)]
#[command(name = "favorites")]
#[command(author, version, about = "Hotel favorites from the terminal")]
struct Cli {
    /// Who is using the page (`guest`, `customer`, `owner`)
    #[arg(long, global = true, default_value_t = IdentityContext::Guest)]
    actor: IdentityContext,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the local wishlist
    List,
    /// Toggle a hotel from a rendered page
    Toggle {
        /// Hotel slug
        slug: String,

        /// Path of the page the control is on
        #[arg(long, default_value = "/hotels/")]
        page: String,
    },
    /// Run the page load sequence (syncs the wishlist for customers)
    Sync,
    /// Clear the local wishlist
    Clear,
    /// Show which controls the local wishlist marks as favorited
    Restore {
        /// Hotel slugs rendered on the page
        #[arg(required = true)]
        slugs: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hotel_favorites_cli=info,hotel_favorites_client=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::List => commands::wishlist::list(&config),
        Commands::Clear => commands::wishlist::clear(&config)?,
        Commands::Restore { slugs } => {
            commands::wishlist::restore(&config, &slugs)?;
        }
        Commands::Toggle { slug, page } => {
            commands::favorites::toggle(&config, cli.actor, &slug, &page).await?;
        }
        Commands::Sync => {
            commands::favorites::sync(&config, cli.actor).await?;
        }
    }
    Ok(())
}
