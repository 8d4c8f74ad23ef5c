use std::io;

use thiserror::Error;

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// A classified reason for a run to stop.
///
/// A run stops at the first error raised by any stage; errors are never
/// aggregated. Variants that concern a specific file carry its name for the
/// diagnostic, the rest describe conditions of the run as a whole.
#[derive(Debug, Error)]
pub enum Error {
    /// A required definition file is absent from the working directory.
    #[error("{0} does not exist")]
    MissingFile(String),
    /// A definition or record file violates its line or field shape.
    #[error("{0} has an invalid format")]
    InvalidFormat(String),
    /// Record file sequence numbers do not form a contiguous run.
    #[error("sales record file names are not consecutive")]
    NonConsecutiveSequence,
    #[error("{0} refers to an unknown branch code")]
    UnknownBranchCode(String),
    #[error("{0} refers to an unknown commodity code")]
    UnknownCommodityCode(String),
    /// An amount field is not a plain non-negative integer string.
    #[error("sales amount is not a plain non-negative integer")]
    MalformedAmount,
    /// An accumulated total would no longer fit in ten decimal digits.
    #[error("total amount exceeded ten digits")]
    AmountOverflow,
    #[error("cannot write {file}: {source}")]
    WriteFailure { file: String, source: csv::Error },
    /// Any otherwise unclassified I/O failure.
    #[error("unexpected error: {0}")]
    Unexpected(#[from] io::Error),
}
