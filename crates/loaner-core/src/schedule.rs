//! Fixed-payment amortization schedule generation.
//!
//! Rolls a loan balance forward month by month under monthly compounding:
//! interest accrues on the opening balance, the fixed payment is applied
//! (clamped in the final month so the balance never goes negative), and the
//! loop stops the first time the closing balance reaches zero. All math in
//! `rust_decimal::Decimal`.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanError;
use crate::types::{with_metadata, ComputationOutput, LoanTerms, Money, Rate};
use crate::LoanResult;

#[cfg(feature = "present_value")]
use crate::present_value::{discount_schedule, PresentValueInput, PresentValueSchedule};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Months per year.
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Currency rounding, in decimal places.
const CENTS: u32 = 2;

/// Hard cap on schedule length (500 years of monthly periods). The
/// non-amortizing guard fires long before this; the cap exists so no input
/// can loop unbounded.
pub const MAX_SCHEDULE_PERIODS: u32 = 6_000;

/// Schedules at least this long trigger a warning in [`analyze_loan`].
const LONG_SCHEDULE_MONTHS: usize = 480;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Period index (0-based, chronological).
    pub period: u32,
    /// Date the payment falls due.
    pub payment_date: NaiveDate,
    /// Balance at the start of the month.
    pub opening_balance: Money,
    /// Interest accrued on the opening balance.
    pub accrued_interest: Money,
    /// Payment actually applied (clamped in the final month).
    pub contribution: Money,
    /// Balance carried into the next month.
    pub closing_balance: Money,
}

/// A complete repayment schedule plus derived aggregates.
///
/// Built once by [`Schedule::generate`], immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Period records in chronological order, ending at the first period
    /// whose closing balance is zero.
    pub periods: Vec<PeriodRecord>,
    /// Sum of accrued interest across all periods, rounded to cents.
    pub total_interest: Money,
    /// Sum of contributions across all periods, rounded to cents.
    pub total_paid: Money,
    /// Date of the final payment.
    pub end_date: NaiveDate,
}

/// Headline view of a loan: terms, repayment length and totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub principal: Money,
    pub annual_rate: Rate,
    pub payment: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Repayment period in months.
    pub periods: u32,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl LoanSummary {
    pub fn new(terms: &LoanTerms, schedule: &Schedule) -> Self {
        LoanSummary {
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            payment: terms.payment,
            start_date: terms.start_date,
            end_date: schedule.end_date,
            periods: schedule.len() as u32,
            total_interest: schedule.total_interest,
            total_paid: schedule.total_paid,
        }
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

impl Schedule {
    /// Generate the repayment schedule for `terms`.
    ///
    /// Pure function of its inputs: identical terms yield identical
    /// schedules. Fails before producing any periods when the terms are
    /// invalid or the payment does not exceed first-month interest.
    pub fn generate(terms: &LoanTerms) -> LoanResult<Schedule> {
        terms.validate()?;

        let monthly_rate = terms.annual_rate / MONTHS_PER_YEAR;
        let first_interest = (terms.principal * monthly_rate).round_dp(CENTS);

        // The balance only shrinks while the payment beats the accrued
        // interest, and interest falls with the balance, so the first month
        // decides whether the loan amortizes at all.
        if terms.payment <= first_interest {
            return Err(LoanError::NonAmortizing {
                payment: terms.payment,
                first_interest,
            });
        }

        let mut periods: Vec<PeriodRecord> = Vec::new();
        let mut payment_date = terms.start_date;
        let mut opening = terms.principal;

        loop {
            let interest = (opening * monthly_rate).round_dp(CENTS);
            let amount_due = opening + interest;
            // Clamp so the final payment never overshoots the balance.
            let contribution = if terms.payment < amount_due {
                terms.payment
            } else {
                amount_due
            };
            let closing = amount_due - contribution;

            periods.push(PeriodRecord {
                period: periods.len() as u32,
                payment_date,
                opening_balance: opening,
                accrued_interest: interest,
                contribution,
                closing_balance: closing,
            });

            if closing <= Decimal::ZERO {
                break;
            }
            if periods.len() as u32 >= MAX_SCHEDULE_PERIODS {
                return Err(LoanError::ScheduleOverflow(MAX_SCHEDULE_PERIODS));
            }

            // Calendar-month step, clamping at month end (Jan 31 -> Feb 28/29).
            payment_date = payment_date
                .checked_add_months(Months::new(1))
                .ok_or_else(|| {
                    LoanError::DateError(format!("cannot advance {payment_date} by one month"))
                })?;
            opening = closing;
        }

        // Aggregates are summed over the finished records rather than
        // accumulated inside the loop.
        let total_interest = periods
            .iter()
            .map(|p| p.accrued_interest)
            .sum::<Decimal>()
            .round_dp(CENTS);
        let total_paid = periods
            .iter()
            .map(|p| p.contribution)
            .sum::<Decimal>()
            .round_dp(CENTS);
        let end_date = periods
            .last()
            .map(|p| p.payment_date)
            .unwrap_or(terms.start_date);

        Ok(Schedule {
            periods,
            total_interest,
            total_paid,
            end_date,
        })
    }

    /// Number of monthly periods in the schedule.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Iterate over the period records in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, PeriodRecord> {
        self.periods.iter()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Top-level analysis input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoanAnalysisInput {
    Schedule(LoanTerms),
    Summary(LoanTerms),
    #[cfg(feature = "present_value")]
    PresentValue(PresentValueInput),
}

/// Unified analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LoanAnalysisOutput {
    Schedule(Schedule),
    Summary(LoanSummary),
    #[cfg(feature = "present_value")]
    PresentValue(PresentValueSchedule),
}

/// Analyse a loan using the specified view.
pub fn analyze_loan(
    input: &LoanAnalysisInput,
) -> LoanResult<ComputationOutput<LoanAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (output, methodology) = match input {
        LoanAnalysisInput::Schedule(terms) => {
            let schedule = Schedule::generate(terms)?;
            push_length_warning(&schedule, &mut warnings);
            (
                LoanAnalysisOutput::Schedule(schedule),
                "Fixed-Payment Amortization Schedule (Monthly Compounding)",
            )
        }
        LoanAnalysisInput::Summary(terms) => {
            let schedule = Schedule::generate(terms)?;
            push_length_warning(&schedule, &mut warnings);
            (
                LoanAnalysisOutput::Summary(LoanSummary::new(terms, &schedule)),
                "Loan Repayment Summary",
            )
        }
        #[cfg(feature = "present_value")]
        LoanAnalysisInput::PresentValue(pv) => {
            let schedule = Schedule::generate(&pv.terms)?;
            push_length_warning(&schedule, &mut warnings);
            let discounted = discount_schedule(&schedule, pv.annual_inflation)?;
            (
                LoanAnalysisOutput::PresentValue(discounted),
                "Present-Value Schedule (Monthly-Compounded Inflation Discount)",
            )
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

fn push_length_warning(schedule: &Schedule, warnings: &mut Vec<String>) {
    if schedule.len() >= LONG_SCHEDULE_MONTHS {
        warnings.push(format!(
            "Repayment runs {} months; the payment only just outpaces accrued interest",
            schedule.len()
        ));
    }
}
