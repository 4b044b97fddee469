//! a11yscan CLI - Main Entry Point
//!
//! Command-line driver for the accessibility harness: run suites of page
//! specs, scan a single URL ad hoc, list discovered specs, and clean the
//! report directory.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{clean, list, run, scan};

/// a11yscan - Playwright + axe-core accessibility scanner
#[derive(Parser)]
#[command(name = "a11yscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the accessibility suite from page specs
    Run(run::RunArgs),

    /// Scan a single URL
    Scan(scan::ScanArgs),

    /// List discovered page specs
    List(list::ListArgs),

    /// Delete prior reports and screenshots
    Clean(clean::CleanArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let ok = match cli.command {
        Commands::Run(args) => run::execute(args, cli.format).await?,
        Commands::Scan(args) => scan::execute(args, cli.format).await?,
        Commands::List(args) => list::execute(args, cli.format)?,
        Commands::Clean(args) => clean::execute(args)?,
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
