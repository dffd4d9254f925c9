use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loaner_core::present_value::{PresentValueInput, DEFAULT_ANNUAL_INFLATION};
use loaner_core::schedule::{analyze_loan, LoanAnalysisInput};

use crate::commands::schedule::{resolve_terms, ScheduleArgs};

/// Arguments for the present-value view
#[derive(Args)]
pub struct PresentValueArgs {
    #[command(flatten)]
    pub terms: ScheduleArgs,

    /// Annual inflation (discount) rate as a fraction [default: 0.015]
    #[arg(long)]
    pub inflation: Option<Decimal>,
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.terms)?;
    let annual_inflation = args.inflation.unwrap_or(DEFAULT_ANNUAL_INFLATION);
    let output = analyze_loan(&LoanAnalysisInput::PresentValue(PresentValueInput {
        terms,
        annual_inflation,
    }))?;
    Ok(serde_json::to_value(&output)?)
}
