mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::Level;

use commands::loan::{BalanceArgs, FormatArgs, SimulateArgs};

/// Constant-annuity loan simulator
#[derive(Parser)]
#[command(
    name = "annuity",
    version,
    about = "Constant-annuity loan simulator",
    long_about = "Computes the constant-annuity (French) amortisation schedule of a loan \
                  with decimal precision: the fixed instalment, the interest/principal \
                  split of every period and the totals paid."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the amortisation schedule (defaults to 10,000 at 5% over 5 periods)
    #[command(alias = "calculate")]
    Simulate(SimulateArgs),
    /// Outstanding principal after a given number of instalments
    Balance(BalanceArgs),
    /// Format an amount the way the schedule displays it
    Format(FormatArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::loan::run_simulate(args),
        Commands::Balance(args) => commands::loan::run_balance(args),
        Commands::Format(args) => commands::loan::run_format(args),
        Commands::Version => {
            println!("annuity {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
