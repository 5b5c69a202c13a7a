//! Wardrobe CLI - your closet in the terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{analyze, auth, config, items, outfits, try_on, weather};

/// Environment variable holding the log filter (e.g. `wardrobe_core=debug`)
const LOG_ENV: &str = "WARDROBE_LOG";

/// Wardrobe - manage clothes and outfits from the terminal
#[derive(Parser)]
#[command(name = "wd", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the wardrobe backend
    Login {
        #[arg(long, short)]
        username: Option<String>,
        /// Read from stdin or prompted when omitted
        #[arg(long, short)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account and log in
    Register {
        #[arg(long, short)]
        username: Option<String>,
        #[arg(long, short)]
        email: Option<String>,
        #[arg(long, short)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the stored session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage clothing items
    Items {
        #[command(subcommand)]
        command: items::ItemsCommands,
    },

    /// Manage outfits
    Outfits {
        #[command(subcommand)]
        command: outfits::OutfitsCommands,
    },

    /// Current weather for a city
    Weather {
        /// City name (defaults to the configured city)
        city: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect body type from a photo and get style advice
    Analyze {
        photo: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Preview an outfit or item on a photo
    TryOn {
        #[command(subcommand)]
        command: try_on::TryOnCommands,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let category = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<wardrobe_core::Error>())
                .map(|err| err.category());
            output::notify_failure(category, &format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Settings must stay editable even when they break context creation
    if let Commands::Config { command } = cli.command {
        return config::run(&commands::get_wardrobe_dir()?, command);
    }

    let ctx = commands::get_context()?;

    match cli.command {
        Commands::Login {
            username,
            password,
            json,
        } => auth::login(&ctx, username, password, json),
        Commands::Register {
            username,
            email,
            password,
            json,
        } => auth::register(&ctx, username, email, password, json),
        Commands::Logout { json } => auth::logout(&ctx, json),
        Commands::Whoami { json } => auth::whoami(&ctx, json),
        Commands::Items { command } => items::run(&ctx, command),
        Commands::Outfits { command } => outfits::run(&ctx, command),
        Commands::Weather { city, json } => weather::run(&ctx, city, json),
        Commands::Analyze { photo, json } => analyze::run(&ctx, &photo, json),
        Commands::TryOn { command } => try_on::run(&ctx, command),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
