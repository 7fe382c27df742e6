use thiserror::Error;

/// Errors raised by the hours engine and its boundary constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HoursError {
    /// A weekday's opening times cannot be paired one-to-one with its
    /// closing times. Fatal for the whole schedule; the caller decides
    /// whether to fall back to a cached result.
    #[error("cannot pair hours for {weekday}: {open_count} opening times, {close_count} closing times")]
    ScheduleMismatch {
        weekday: &'static str,
        open_count: usize,
        close_count: usize,
    },

    #[error("invalid time digits: {0:?}")]
    InvalidTimeDigits(String),

    #[error("invalid weekday digit: {0}")]
    InvalidWeekdayDigit(u8),
}
