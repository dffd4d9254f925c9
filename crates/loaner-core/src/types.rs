use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::LoanResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.06 = 6% annual). Never as percentages.
pub type Rate = Decimal;

/// Immutable terms of a fixed-payment loan.
///
/// Numeric fields are validated before any schedule is generated: the
/// constructor rejects bad values, and the generator re-validates so that
/// terms arriving through deserialization go through the same gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate, strictly between 0 and 1.
    pub annual_rate: Rate,
    /// Fixed monthly payment.
    pub payment: Money,
    /// Date of the first repayment.
    #[serde(default = "today")]
    pub start_date: NaiveDate,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl LoanTerms {
    /// Build validated terms. Fails before any schedule maths run.
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        payment: Money,
        start_date: NaiveDate,
    ) -> LoanResult<Self> {
        let terms = LoanTerms {
            principal,
            annual_rate,
            payment,
            start_date,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Terms whose first repayment falls today.
    pub fn starting_today(principal: Money, annual_rate: Rate, payment: Money) -> LoanResult<Self> {
        Self::new(principal, annual_rate, payment, today())
    }

    /// Check the field invariants, one distinct error per field.
    pub fn validate(&self) -> LoanResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanError::InvalidPrincipal(self.principal));
        }
        if self.annual_rate <= Decimal::ZERO || self.annual_rate >= Decimal::ONE {
            return Err(LoanError::InvalidInterestRate(self.annual_rate));
        }
        if self.payment <= Decimal::ZERO {
            return Err(LoanError::InvalidPayment(self.payment));
        }
        Ok(())
    }
}

/// Parse a start date given as `YYYY-MM-DD`.
pub fn parse_start_date(input: &str) -> LoanResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| LoanError::InvalidStartDate(format!("'{input}' is not a valid YYYY-MM-DD date")))
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_rejects_each_bad_field() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        let principal = LoanTerms::new(dec!(0), dec!(0.06), dec!(200), start);
        assert!(matches!(principal, Err(LoanError::InvalidPrincipal(_))));

        let rate = LoanTerms::new(dec!(10_000), dec!(1), dec!(200), start);
        assert!(matches!(rate, Err(LoanError::InvalidInterestRate(_))));

        let payment = LoanTerms::new(dec!(10_000), dec!(0.06), dec!(-0.01), start);
        assert!(matches!(payment, Err(LoanError::InvalidPayment(_))));
    }

    #[test]
    fn test_parse_start_date() {
        let parsed = parse_start_date("2020-01-01").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());

        assert!(matches!(
            parse_start_date("2020-13-01"),
            Err(LoanError::InvalidStartDate(_))
        ));
        assert!(matches!(
            parse_start_date("01-01-2020"),
            Err(LoanError::InvalidStartDate(_))
        ));
    }

    #[test]
    fn test_terms_deserialize_with_default_start_date() {
        let terms: LoanTerms = serde_json::from_str(
            r#"{"principal": "10000", "annual_rate": "0.06", "payment": "193.33"}"#,
        )
        .unwrap();
        assert_eq!(terms.principal, dec!(10_000));
        assert_eq!(terms.start_date, Local::now().date_naive());
    }
}
