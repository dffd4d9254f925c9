//! Present-value view of a repayment schedule.
//!
//! Discounts each period's cash flows back to loan inception with a
//! monthly-compounded annual inflation rate: period index `i` carries the
//! factor `(1 + infl)^(-(i + 1) / 12)`. Purely derived; the underlying
//! [`Schedule`] is never mutated.

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::schedule::Schedule;
use crate::types::{LoanTerms, Money, Rate};
use crate::LoanResult;

/// Annual inflation rate assumed when none is supplied.
pub const DEFAULT_ANNUAL_INFLATION: Decimal = dec!(0.015);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const CENTS: u32 = 2;

/// Input for the present-value view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentValueInput {
    pub terms: LoanTerms,
    /// Annual inflation (discount) rate.
    #[serde(default = "default_inflation")]
    pub annual_inflation: Rate,
}

fn default_inflation() -> Rate {
    DEFAULT_ANNUAL_INFLATION
}

/// One period with its cash flows discounted to inception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentValueRow {
    /// Period index (0-based, chronological).
    pub period: u32,
    pub payment_date: NaiveDate,
    /// Nominal interest accrued in the period.
    pub accrued_interest: Money,
    /// Nominal payment applied in the period.
    pub contribution: Money,
    /// `(1 + infl)^(-(period + 1) / 12)`.
    pub discount_factor: Decimal,
    pub pv_interest: Money,
    pub pv_contribution: Money,
}

/// Discounted schedule plus totals as of loan inception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentValueSchedule {
    pub rows: Vec<PresentValueRow>,
    pub annual_inflation: Rate,
    /// Discounted interest total, rounded to cents.
    pub pv_interest_total: Money,
    /// Discounted contribution total, rounded to cents.
    pub pv_contribution_total: Money,
}

/// Discount every period of `schedule` back to inception.
///
/// Row values are left unrounded; only the totals round to cents.
pub fn discount_schedule(
    schedule: &Schedule,
    annual_inflation: Rate,
) -> LoanResult<PresentValueSchedule> {
    if annual_inflation <= dec!(-1) {
        return Err(LoanError::InvalidInflationRate(annual_inflation));
    }

    let base = Decimal::ONE + annual_inflation;
    let mut rows = Vec::with_capacity(schedule.periods.len());

    for record in &schedule.periods {
        let exponent = -(Decimal::from(record.period) + Decimal::ONE) / MONTHS_PER_YEAR;
        let discount_factor = base.powd(exponent);
        rows.push(PresentValueRow {
            period: record.period,
            payment_date: record.payment_date,
            accrued_interest: record.accrued_interest,
            contribution: record.contribution,
            discount_factor,
            pv_interest: discount_factor * record.accrued_interest,
            pv_contribution: discount_factor * record.contribution,
        });
    }

    let pv_interest_total = rows
        .iter()
        .map(|r| r.pv_interest)
        .sum::<Decimal>()
        .round_dp(CENTS);
    let pv_contribution_total = rows
        .iter()
        .map(|r| r.pv_contribution)
        .sum::<Decimal>()
        .round_dp(CENTS);

    Ok(PresentValueSchedule {
        rows,
        annual_inflation,
        pv_interest_total,
        pv_contribution_total,
    })
}
