use rusqlite::Connection;

use super::cursor::SqliteCursor;
use super::params::Params;
use super::query::{build_result_set, query_with};
use crate::error::RowCollectorError;
use crate::executor::{BatchConfig, StatementExecutor};
use crate::results::ResultSet;
use crate::types::RowValues;

/// Runs one statement over many parameter sets, `batch_size` sets per transaction.
///
/// A failing parameter set rolls back its own chunk only; chunks committed
/// before it stay committed.
#[derive(Debug)]
pub struct BatchStatementExecutor<'c> {
    conn: &'c mut Connection,
    config: BatchConfig,
}

impl<'c> BatchStatementExecutor<'c> {
    /// # Errors
    ///
    /// Returns `RowCollectorError::ConfigError` if `config` is invalid.
    pub fn new(conn: &'c mut Connection, config: BatchConfig) -> Result<Self, RowCollectorError> {
        config.validate()?;
        Ok(Self { conn, config })
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Execute `sql` once per parameter set and return the total rows affected.
    ///
    /// # Errors
    ///
    /// Returns `RowCollectorError::BatchItem` naming the index of the failing
    /// parameter set, or `RowCollectorError::SqliteError` if a transaction
    /// cannot be opened or committed.
    pub fn execute_batch(
        &mut self,
        sql: &str,
        param_sets: &[Vec<RowValues>],
    ) -> Result<usize, RowCollectorError> {
        let batch_size = self.config.batch_size;
        let mut total = 0usize;

        for (chunk_idx, chunk) in param_sets.chunks(batch_size).enumerate() {
            let tx = self.conn.transaction()?;
            let affected = {
                let mut stmt = tx.prepare_cached(sql)?;
                let mut affected = 0usize;
                for (offset, params) in chunk.iter().enumerate() {
                    let params = Params::convert(params);
                    match stmt.execute(&params.as_refs()[..]) {
                        Ok(n) => affected += n,
                        Err(source) => {
                            let index = chunk_idx * batch_size + offset;
                            tracing::warn!(
                                chunk = chunk_idx,
                                index,
                                error = %source,
                                "rolling back batch chunk"
                            );
                            return Err(RowCollectorError::BatchItem { index, source });
                        }
                    }
                }
                affected
            };
            tx.commit()?;
            tracing::debug!(chunk = chunk_idx, rows = affected, "committed batch chunk");
            total += affected;
        }

        Ok(total)
    }

    /// Stream the rows of `sql` through `f`; see [`query_with`].
    ///
    /// # Errors
    ///
    /// Returns `RowCollectorError` if preparing the statement fails, or whatever `f` returns.
    pub fn query_with<T, F>(
        &mut self,
        sql: &str,
        params: &[RowValues],
        f: F,
    ) -> Result<T, RowCollectorError>
    where
        F: FnOnce(&mut SqliteCursor<'_>) -> Result<T, RowCollectorError>,
    {
        query_with(&*self.conn, sql, params, f)
    }
}

impl StatementExecutor for BatchStatementExecutor<'_> {
    fn execute_statement(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<usize, RowCollectorError> {
        let params = Params::convert(params);
        let mut stmt = self.conn.prepare_cached(sql)?;
        Ok(stmt.execute(&params.as_refs()[..])?)
    }

    fn execute_query(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, RowCollectorError> {
        let params = Params::convert(params);
        let mut stmt = self.conn.prepare(sql)?;
        build_result_set(&mut stmt, params.as_values())
    }
}
