use thiserror::Error;

/// Errors raised outside the decode path (decoding itself never fails).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TafError {
    #[error("Invalid minima: {0}")]
    InvalidMinima(String),

    #[error("Unknown output format '{0}'. Supported formats: text, json.")]
    UnknownFormat(String),

    #[error("Invalid month '{0}', expected YYYY-MM (e.g. 2026-10).")]
    InvalidMonth(String),
}
