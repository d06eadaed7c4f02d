//! Feed archive error types.

/// Errors from opening or scanning a schedule archive.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A required table is absent from the archive
    #[error("archive is missing table: {table}")]
    MissingTable { table: &'static str },

    /// The zip container is unreadable
    #[error("unreadable archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Reading the backing file failed
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A table could not be parsed as CSV
    #[error("failed to parse {table}: {source}")]
    Csv {
        table: &'static str,
        source: csv::Error,
    },

    /// A row has fewer columns than the feed contract requires
    #[error("malformed row in {table}: expected at least {expected} columns, found {found}")]
    MalformedRow {
        table: &'static str,
        expected: usize,
        found: usize,
    },
}
