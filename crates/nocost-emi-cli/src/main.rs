mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::banks::BanksArgs;
use commands::emi::{CalculateArgs, ScheduleArgs};
use commands::sensitivity::SensitivityArgs;

/// Reveal the hidden cost of No Cost EMI offers
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Reveal the hidden cost of No Cost EMI offers",
    long_about = "Works out the interest a seller folds into a \"No Cost\" EMI discount, \
                  the GST charged on that interest and on the processing fee, and the \
                  month-by-month repayment schedule, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON or YAML file replacing the built-in card issuer presets
    #[arg(long, global = true)]
    bank_data: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full hidden-cost report with schedule
    Calculate(CalculateArgs),
    /// Month-by-month repayment schedule only
    Schedule(ScheduleArgs),
    /// List card issuer EMI presets
    Banks(BanksArgs),
    /// Sweep interest rate or tenure and compare hidden costs
    Sensitivity(SensitivityArgs),
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

fn main() {
    let cli = Cli::parse();
    let bank_data = cli.bank_data.as_deref();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::emi::run_calculate(args, bank_data),
        Commands::Schedule(args) => commands::emi::run_schedule(args, bank_data),
        Commands::Banks(args) => commands::banks::run_banks(args, bank_data),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args, bank_data),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
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
