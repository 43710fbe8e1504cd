//! verdict CLI - caller-context resolution from the command line
//!
//! `verdict explain` answers "what would a failed check on this line be
//! called?", which is handy when a failure message comes out without its
//! context line.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use verdict_cli::{explain, ExplainRequest};
use verdict_core::config::Config;

#[derive(Parser)]
#[command(name = "verdict")]
#[command(about = "Name the expression behind a failed fluent assertion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the asserted expression for a validation call
    Explain {
        /// Source file containing the call
        #[arg(long, value_name = "FILE")]
        file: PathBuf,

        /// 1-based line of the call
        #[arg(long)]
        line: usize,

        /// Validation method name, e.g. `be`
        #[arg(long)]
        method: String,

        /// Expected value(s) the check was given; repeat for sequences
        #[arg(long = "expected", value_name = "VALUE")]
        expected: Vec<String>,

        /// Treat a single expected value as a one-element sequence
        #[arg(long)]
        sequence: bool,

        /// Test method name, for log output only
        #[arg(long)]
        test: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Explain {
            file,
            line,
            method,
            expected,
            sequence,
            test,
            json,
        }) => {
            let request = ExplainRequest {
                file,
                line,
                method,
                expected,
                sequence,
                test,
            };
            let report = explain(&request, &config);
            if json {
                println!("{}", report.render_json()?);
            } else {
                println!("{}", report.render_text());
            }
            Ok(())
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        None => {
            info!("No command given");
            println!("Run 'verdict explain --help' to resolve a call site, or --help for more options");
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "verdict_core={level},verdict_resolver={level},{}={level}",
            env!("CARGO_CRATE_NAME")
        ))
        .init();

    Ok(())
}
