//! Error type for the differencer.

use thiserror::Error;

/// Errors raised at the boundary of the differencer.
///
/// The differencing algorithms themselves are total; the only failure is
/// constructing a value from untrusted raw data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A numeric change kind outside the known range `0..=5`.
    #[error("invalid range difference kind: {0}")]
    InvalidKind(u8),
}
