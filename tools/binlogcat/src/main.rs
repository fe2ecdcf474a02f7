mod column;
mod commands;
mod format;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{decode::DecodeArgs, types::TypesArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "binlogcat", about = "Decode typed change-log columns from raw bytes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode rows of typed column values
    Decode(DecodeArgs),
    /// Print the column type code table
    Types(TypesArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode(args) => args.run(),
        Commands::Types(args) => args.run(),
    }
}
