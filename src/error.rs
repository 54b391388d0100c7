use thiserror::Error;

/// Failure to advance a cursor or to read a column from its current row.
#[derive(Debug, Error)]
pub enum CursorReadError {
    #[error("Cursor failed to advance: {0}")]
    Advance(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Cursor is not positioned on a row")]
    NoCurrentRow,

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{column}' holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Column '{column}' value {value} does not fit in {target}")]
    OutOfRange {
        column: String,
        value: i64,
        target: &'static str,
    },

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl CursorReadError {
    /// Wrap an arbitrary driver failure raised while advancing.
    pub fn advance<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CursorReadError::Advance(Box::new(err))
    }
}

#[derive(Debug, Error)]
pub enum RowCollectorError {
    #[error(transparent)]
    CursorRead(#[from] CursorReadError),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "sqlite")]
    #[error("Batch parameter set {index} failed: {source}")]
    BatchItem {
        index: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Other error: {0}")]
    Other(String),
}
