//! Statement execution seam and its configuration.

use serde::{Deserialize, Serialize};

use crate::error::RowCollectorError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Something that can run SQL statements and queries with bound parameters.
pub trait StatementExecutor {
    /// Execute a statement that returns no rows (INSERT/UPDATE/DELETE/DDL).
    ///
    /// # Errors
    ///
    /// Returns `RowCollectorError` if preparing or executing the statement fails.
    fn execute_statement(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<usize, RowCollectorError>;

    /// Execute a query and materialize its rows.
    ///
    /// # Errors
    ///
    /// Returns `RowCollectorError` if the query fails or a value cannot be read.
    fn execute_query(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, RowCollectorError>;
}

pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Options for batched statement execution.
///
/// ```rust
/// use row_collector::executor::BatchConfig;
///
/// let config = BatchConfig::from_json(r#"{ "batch_size": 25 }"#)?;
/// assert_eq!(config.batch_size, 25);
/// # Ok::<(), row_collector::RowCollectorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Parameter sets executed per transaction; must be at least 1.
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl BatchConfig {
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Parse a JSON object; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `RowCollectorError::ConfigError` for malformed JSON or an invalid value.
    pub fn from_json(json: &str) -> Result<Self, RowCollectorError> {
        let config: BatchConfig = serde_json::from_str(json)
            .map_err(|e| RowCollectorError::ConfigError(format!("invalid batch config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `RowCollectorError::ConfigError` if `batch_size` is zero.
    pub fn validate(&self) -> Result<(), RowCollectorError> {
        if self.batch_size == 0 {
            return Err(RowCollectorError::ConfigError(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
