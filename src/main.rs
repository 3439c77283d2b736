// Copyright 2026 Propscout Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use propscout::cli::{self, SearchArgs};
use propscout::model::Source;

#[derive(Parser)]
#[command(
    name = "propscout",
    about = "Propscout — property meta-search across 99.co and PropertyGuru",
    version,
    after_help = "Run 'propscout <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search both sources and print the merged, price-sorted report
    Search(SearchArgs),
    /// Query a single source, failing loudly on upstream errors
    Fetch {
        /// Which source to query
        #[arg(value_enum)]
        source: Source,
        #[command(flatten)]
        args: SearchArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Search(args) => cli::search_cmd::run(args, cli.json, cli.quiet).await,
        Commands::Fetch { source, args } => cli::fetch_cmd::run(*source, args, cli.json).await,
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli.quiet {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "propscout=debug"
    } else if quiet {
        "propscout=error"
    } else {
        "propscout=info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
