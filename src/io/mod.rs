//! CSV ingestion and export at the crate boundary.

pub mod export;
pub mod frequency;
pub mod price;

use std::path::PathBuf;

use thiserror::Error;

/// Failures at the data-loading boundary.
///
/// These are all terminal for the run: the inputs are static files, so
/// there is no transient variant worth retrying.
#[derive(Debug, Error)]
pub enum DataError {
    /// No price file exists for the requested year.
    #[error("price data not found for {year} (expected \"{}\")", path.display())]
    PriceDataNotFound { year: i32, path: PathBuf },

    /// A frequency file was required by the configuration but not supplied.
    #[error("frequency data file required but not supplied")]
    MissingFrequencyData,

    /// A row failed to parse into the expected shape.
    #[error("malformed record in \"{}\": {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
