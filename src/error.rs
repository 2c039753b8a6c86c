//! Error types for translation estimation.

use thiserror::Error;

/// Alignment error type.
///
/// A trivial (size-1) consensus is not an error; it is reported through
/// [`TranslationEstimate::support`](crate::aggregate::TranslationEstimate::support).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// Rejected before any search starts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An estimator name that this crate does not provide.
    #[error("unknown estimation strategy: {0}")]
    UnknownStrategy(String),

    /// A key present in only one of the microscope/biosensor collections.
    #[error("no matching point set for key {0}")]
    MissingPair(String),
}

pub type Result<T> = std::result::Result<T, AlignmentError>;
