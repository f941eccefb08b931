use thiserror::Error;

/// Errors from the table component. Input-contract violations, reported
/// synchronously to the caller; nothing here is transient or retried.
#[derive(Debug, Error)]
pub enum TableError {
    /// A row's length does not match the column count.
    #[error("malformed dataset: row {row} has {found} values, expected {expected}")]
    MalformedDataset {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Sort requested on a column the current dataset does not have.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

/// Errors from forecast extraction.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A feed entry's `dt_txt` did not parse as `YYYY-MM-DD HH:MM:SS`.
    #[error("invalid forecast timestamp {text:?}: {source}")]
    InvalidTimestamp {
        text: String,
        source: chrono::ParseError,
    },

    /// The caller required all five day slots but the feed held fewer
    /// midday samples.
    #[error("forecast contains {found} midday day(s), 5 required")]
    NoMiddayData { found: usize },
}
