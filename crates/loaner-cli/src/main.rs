mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::present_value::PresentValueArgs;
use commands::schedule::ScheduleArgs;
use commands::summary::SummaryArgs;

/// Fixed-payment loan amortization schedules
#[derive(Parser)]
#[command(
    name = "loaner",
    version,
    about = "Fixed-payment loan amortization schedules",
    long_about = "Generates month-by-month amortization schedules for fixed-payment \
                  loans with decimal precision: opening balance, accrued interest, \
                  contribution and closing balance per month, aggregate totals, and \
                  an optional present-value view discounted by inflation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the month-by-month repayment schedule
    Schedule(ScheduleArgs),
    /// Print the headline loan summary (period count, totals, end date)
    Summary(SummaryArgs),
    /// Discount the schedule to present value with an inflation rate
    PresentValue(PresentValueArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Summary(args) => commands::summary::run_summary(args),
        Commands::PresentValue(args) => commands::present_value::run_present_value(args),
        Commands::Version => {
            println!("loaner {}", env!("CARGO_PKG_VERSION"));
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
