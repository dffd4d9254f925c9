pub mod error;
pub mod schedule;
pub mod types;

#[cfg(feature = "present_value")]
pub mod present_value;

pub use error::LoanError;
pub use types::*;

/// Standard result type for all loaner operations
pub type LoanResult<T> = Result<T, LoanError>;
