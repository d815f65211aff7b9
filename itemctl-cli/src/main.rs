//! itemctl CLI - item service and pattern printer
//!
//! - `serve`: run the HTTP item service over a SQLite database
//! - `pattern`: print a square of marker characters

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "itemctl",
    author,
    version,
    about = "Item service and pattern printer",
    long_about = "Serve create/list operations over a SQLite-backed item table, \
                  or print a square pattern of marker characters."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP item service
    Serve(commands::serve::ServeArgs),
    /// Print a size x size pattern of marker characters
    Pattern(commands::pattern::PatternArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Variables already in the environment win over .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Pattern(args) => commands::run_pattern(args)?,
    }
    Ok(())
}
