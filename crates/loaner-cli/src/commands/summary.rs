use clap::Args;
use serde_json::Value;

use loaner_core::schedule::{analyze_loan, LoanAnalysisInput};

use crate::commands::schedule::{resolve_terms, ScheduleArgs};

/// Arguments for the loan summary
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub terms: ScheduleArgs,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.terms)?;
    let output = analyze_loan(&LoanAnalysisInput::Summary(terms))?;
    Ok(serde_json::to_value(&output)?)
}
