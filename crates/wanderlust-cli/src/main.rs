// SPDX-License-Identifier: AGPL-3.0
// Wanderlust CLI - Terminal frontend

mod commands;
mod state;

use clap::{Parser, Subcommand};
use state::AppState;
use std::path::PathBuf;
use std::process::ExitCode;
use wanderlust_core::{Category, DestinationId};

#[derive(Parser)]
#[command(name = "wanderlust", version, about = "Browse destinations and keep the ones you like")]
struct Cli {
    /// Key-value storage file (defaults to the user config directory)
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the home feed
    Home {
        /// Only show destinations in this category
        #[arg(long)]
        category: Option<Category>,
        /// Filter by title or location
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one destination
    Show { id: String },
    /// Like a destination
    Like { id: String },
    /// Remove a like
    Unlike { id: String },
    /// Flip the like state of a destination
    Toggle { id: String },
    /// List liked destinations
    Likes,
    /// Remove every like
    ClearLikes,
    /// Play the onboarding slides
    Slides {
        /// Number of slide changes to wait for
        #[arg(long, default_value_t = 3)]
        ticks: usize,
    },
    /// Print current settings
    Settings,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wanderlust=info".parse().unwrap())
                .add_directive("wanderlust_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!("Starting Wanderlust CLI v{}", env!("CARGO_PKG_VERSION"));

    let state = match AppState::new(cli.storage).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to initialize: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Home { category, search } => commands::home(&state, category, search).await,
        Command::Show { id } => commands::show(&state, DestinationId::from(id)).await,
        Command::Like { id } => commands::like(&state, DestinationId::from(id)).await,
        Command::Unlike { id } => commands::unlike(&state, DestinationId::from(id)).await,
        Command::Toggle { id } => commands::toggle(&state, DestinationId::from(id)).await,
        Command::Likes => commands::list_likes(&state).await,
        Command::ClearLikes => commands::clear_likes(&state).await,
        Command::Slides { ticks } => commands::slides(&state, ticks).await,
        Command::Settings => commands::settings(&state),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
