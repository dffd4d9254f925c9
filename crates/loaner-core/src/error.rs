use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanError {
    #[error("Invalid principal: {0} — must be greater than zero")]
    InvalidPrincipal(Decimal),

    #[error("Invalid interest rate: {0} — must be strictly between 0 and 1")]
    InvalidInterestRate(Decimal),

    #[error("Invalid payment: {0} — must be greater than zero")]
    InvalidPayment(Decimal),

    #[error("Invalid start date: {0}")]
    InvalidStartDate(String),

    #[error("Invalid inflation rate: {0} — must be greater than -100%")]
    InvalidInflationRate(Decimal),

    #[error(
        "Non-amortizing loan: payment {payment} does not exceed first-month interest {first_interest}"
    )]
    NonAmortizing {
        payment: Decimal,
        first_interest: Decimal,
    },

    #[error("Schedule did not terminate within {0} periods")]
    ScheduleOverflow(u32),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::SerializationError(e.to_string())
    }
}
