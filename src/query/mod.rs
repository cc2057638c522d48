//! Query execution base.
//!
//! Concrete data-source kinds implement [`Query::fetch`] to produce a
//! [`NativeResult`] (the JSON-shaped wire format of raw records). The
//! provided [`Query::execute`] wraps that with the engine-side guarantees:
//! the maximum-row guard is enforced before any row is materialized, and
//! each native record is mapped to a [`QueryRow`] by iterating the query's
//! declared columns and converting where the declared and native types
//! differ.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::param::ParameterValues;
use crate::row::{QueryCell, QueryRow};
use crate::schema::{DataTableSchema, ValidationError};
use crate::value::{convert, ConversionError, TargetType, Value};

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised during query execution.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The underlying result exceeded the configured row cap.
    #[error("query '{query}' returned {actual} rows, exceeding the limit of {limit}")]
    RowLimitExceeded {
        query: String,
        actual: usize,
        limit: usize,
    },

    /// A named table is absent from the data source schema.
    #[error("table '{0}' not found in data source schema")]
    TableNotFound(String),

    /// A declared column is absent from the fetched records.
    #[error("query '{query}' declares column '{column}' missing from the result")]
    ColumnMissing { query: String, column: String },

    /// The concrete data source failed to produce records.
    #[error("query '{query}' failed: {message}")]
    ExecutionFailed { query: String, message: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A data source consumed through its schema.
pub trait DataSource: Send + Sync {
    fn schema(&self) -> &[DataTableSchema];

    /// Find a table by name, failing when absent.
    fn schema_table(&self, name: &str) -> QueryResult<&DataTableSchema> {
        self.schema()
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| QueryError::TableNotFound(name.to_string()))
    }
}

/// A column the query declares it will produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryColumnInfo {
    pub name: String,
    pub data_type: TargetType,
}

impl QueryColumnInfo {
    pub fn new(name: impl Into<String>, data_type: TargetType) -> Self {
        QueryColumnInfo {
            name: name.into(),
            data_type,
        }
    }
}

/// Raw records as a concrete data source hands them over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl NativeResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Materialized query output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    rows: Vec<QueryRow>,
}

impl ResultSet {
    pub fn new(rows: Vec<QueryRow>) -> Self {
        ResultSet { rows }
    }

    pub fn all_rows(&self) -> &[QueryRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<QueryRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One executable query against a data source.
///
/// Implementors supply the name, the declared columns, and `fetch`; the
/// row-cap guard and row materialization are provided.
#[async_trait]
pub trait Query: Send + Sync {
    fn name(&self) -> &str;

    fn columns(&self) -> &[QueryColumnInfo];

    /// Row cap; `None` disables the guard.
    fn maximum_rows(&self) -> Option<usize> {
        None
    }

    /// Produce raw records for the given parameter values.
    async fn fetch(&self, parameters: &ParameterValues) -> QueryResult<NativeResult>;

    /// Declared columns joined against the data source schema: where the
    /// schema knows the column, its type wins over the declared one.
    fn resolved_columns(
        &self,
        source: &dyn DataSource,
        table: &str,
    ) -> QueryResult<Vec<QueryColumnInfo>> {
        let table = source.schema_table(table)?;
        Ok(self
            .columns()
            .iter()
            .map(|declared| match table.column(&declared.name) {
                Some(schema_column) => {
                    QueryColumnInfo::new(&declared.name, schema_column.data_type.clone())
                }
                None => declared.clone(),
            })
            .collect())
    }

    /// Fetch, guard, and materialize.
    async fn execute(&self, parameters: &ParameterValues) -> QueryResult<ResultSet> {
        self.execute_with_cap(parameters, None).await
    }

    /// Like [`Query::execute`], but applies `fallback_cap` when the query
    /// declares no row cap of its own. Call sites holding the engine
    /// settings pass `Settings::default_maximum_rows` here.
    async fn execute_with_cap(
        &self,
        parameters: &ParameterValues,
        fallback_cap: Option<usize>,
    ) -> QueryResult<ResultSet> {
        let native = self.fetch(parameters).await?;

        // The cap is checked before materialization so oversized results
        // are rejected without paying the conversion cost.
        if let Some(limit) = self.maximum_rows().or(fallback_cap) {
            if native.row_count() > limit {
                return Err(QueryError::RowLimitExceeded {
                    query: self.name().to_string(),
                    actual: native.row_count(),
                    limit,
                });
            }
        }

        debug!(query = self.name(), rows = native.row_count(), "materializing query result");

        let mut rows = Vec::with_capacity(native.rows.len());
        for record in &native.rows {
            rows.push(materialize_row(self.name(), self.columns(), &native.columns, record)?);
        }
        Ok(ResultSet::new(rows))
    }
}

fn materialize_row(
    query: &str,
    declared: &[QueryColumnInfo],
    native_columns: &[String],
    record: &[serde_json::Value],
) -> QueryResult<QueryRow> {
    let mut cells = Vec::with_capacity(declared.len());
    for column in declared {
        let index = native_columns
            .iter()
            .position(|name| name == &column.name)
            .ok_or_else(|| QueryError::ColumnMissing {
                query: query.to_string(),
                column: column.name.clone(),
            })?;
        let raw = record
            .get(index)
            .map(Value::from_json)
            .unwrap_or(Value::Null);
        let value = if column.data_type.accepts(&raw) || raw.is_null() {
            raw
        } else {
            convert(&raw, &column.data_type)?
        };
        cells.push(QueryCell::new(&column.name, value));
    }
    Ok(QueryRow::new(cells)?)
}
