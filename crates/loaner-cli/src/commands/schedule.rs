use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loaner_core::schedule::{analyze_loan, LoanAnalysisInput};
use loaner_core::{parse_start_date, LoanTerms};

use crate::input;

/// Loan terms, from flags, a JSON file, or piped stdin
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to a JSON file holding the loan terms (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a fraction (e.g. 0.06 for 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Fixed monthly payment
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// First repayment date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let output = analyze_loan(&LoanAnalysisInput::Schedule(terms))?;
    Ok(serde_json::to_value(&output)?)
}

/// Resolve loan terms from the three input sources, in priority order:
/// --input file, piped stdin, individual flags.
pub(crate) fn resolve_terms(args: &ScheduleArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let principal = args
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let annual_rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let payment = args
            .payment
            .ok_or("--payment is required (or provide --input)")?;
        match args.start {
            Some(ref start) => {
                LoanTerms::new(principal, annual_rate, payment, parse_start_date(start)?)?
            }
            None => LoanTerms::starting_today(principal, annual_rate, payment)?,
        }
    };

    // File and stdin input bypass the constructor, so re-check here for a
    // clean error before any generation runs.
    terms.validate()?;
    Ok(terms)
}
