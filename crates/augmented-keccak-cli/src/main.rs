//! akeccak - canonical Keccak-256 digests of JSON structs.

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod commands;
mod input;
mod output;

use commands::{hash, preimage};

#[derive(Parser)]
#[command(name = "akeccak")]
#[command(about = "Canonical Keccak-256 digests of loosely-typed JSON structs")]
struct Cli {
    /// Profile file (JSON) with the tags used for untyped leaves
    #[arg(long, global = true)]
    profile: Option<String>,
    /// Tag for untyped numbers, e.g. `uint64` (overrides the profile)
    #[arg(long, global = true)]
    number_type: Option<String>,
    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the digest of a JSON value
    Hash {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// JSON file with type hints shaped like the input
        #[arg(long)]
        types: Option<String>,
        /// Output as JSON (`{"alg": ..., "hex": ...}`)
        #[arg(long, conflicts_with = "bytes")]
        json: bool,
        /// Output the digest as a JSON array of bytes
        #[arg(long)]
        bytes: bool,
    },
    /// Print the canonical pre-image of a JSON value as hex
    Preimage {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// JSON file with type hints shaped like the input
        #[arg(long)]
        types: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let profile = input::load_profile(cli.profile.as_deref(), cli.number_type.as_deref())?;

    match cli.command {
        Commands::Hash {
            input,
            types,
            json,
            bytes,
        } => hash::run(input, types, profile, json, bytes),
        Commands::Preimage { input, types } => preimage::run(input, types, profile),
    }
}
