//! Kinship CLI - Command-line interface for Kinship
//!
//! This is the entry point for managing a social network workspace: creating
//! profiles and friendships, checking connectivity, and asking for friend
//! suggestions.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::VizFormat;
use config::{Backend, DEFAULT_CAPACITY};

#[derive(Parser)]
#[command(name = "kinship")]
#[command(author = "Kinship Contributors")]
#[command(version)]
#[command(about = "Social connectivity and friend suggestions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Workspace directory (defaults to current directory)
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Kinship in the workspace directory
    Init {
        /// Persistence backend
        #[arg(long, value_enum, default_value = "json")]
        backend: Backend,

        /// Number of profiles the connectivity index can hold
        #[arg(long, default_value_t = DEFAULT_CAPACITY, conflicts_with = "growable")]
        capacity: usize,

        /// Let the connectivity index grow without a fixed capacity
        #[arg(long)]
        growable: bool,
    },

    /// Create a profile
    Create {
        /// Unique profile id
        id: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Age in years (1-120)
        #[arg(short, long)]
        age: u8,

        /// Gender (free text)
        #[arg(short, long)]
        gender: String,
    },

    /// Create a friendship between two profiles
    Befriend {
        a: String,
        b: String,

        /// Friendship quality (1-5)
        #[arg(short, long)]
        quality: u8,
    },

    /// Check whether two profiles are in the same component
    Connected { a: String, b: String },

    /// Suggest friends of friends for a profile
    Suggest {
        id: String,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List all profiles
    List {
        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Export the friendship graph for visualization
    Viz {
        #[arg(short, long, value_enum, default_value = "json")]
        format: VizFormat,

        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show workspace status and statistics
    Status,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let dir = cli.dir.as_path();
    let result = match cli.command {
        Commands::Init {
            backend,
            capacity,
            growable,
        } => commands::init(dir, backend, capacity, growable),
        Commands::Create {
            id,
            name,
            age,
            gender,
        } => commands::create(dir, &id, &name, age, &gender),
        Commands::Befriend { a, b, quality } => commands::befriend(dir, &a, &b, quality),
        Commands::Connected { a, b } => commands::connected(dir, &a, &b),
        Commands::Suggest { id, json } => commands::suggest(dir, &id, json),
        Commands::List { json } => commands::list(dir, json),
        Commands::Viz { format, output } => commands::viz(dir, format, output.as_deref()),
        Commands::Status => commands::status(dir),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
