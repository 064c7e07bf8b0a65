//! Reading errors

use thiserror::Error;

/// Errors raised while validating or evaluating a reading
///
/// Every variant is recoverable: a rejected submission leaves the session untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadingError {
    /// Wall clock is not a strict 24-hour "HH:MM"
    #[error("Invalid time '{0}': expected 24-hour HH:MM")]
    InvalidFormat(String),

    /// Concentration is empty, non-numeric, fractional or not positive
    #[error("Invalid concentration '{0}': expected a positive whole number of ppm")]
    InvalidNumber(String),

    /// Two readings have the same elapsed minute
    #[error("Two readings share elapsed minute {elapsed_minutes}, rate cannot be estimated")]
    DegenerateInterval {
        /// The shared elapsed minute
        elapsed_minutes: u32,
    },
}
