//! Query row model.
//!
//! A [`QueryRow`] is the immutable, column-indexed record every query
//! execution produces, regardless of the underlying data source. Rows are
//! what bindings resolve against.

use serde::{Deserialize, Serialize};

use crate::schema::ValidationError;
use crate::value::Value;

/// One (column, value) pair of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCell {
    pub column: String,
    pub value: Value,
}

impl QueryCell {
    pub fn new(column: impl Into<String>, value: Value) -> Self {
        QueryCell {
            column: column.into(),
            value,
        }
    }
}

/// An ordered, uniquely-named set of cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryRow {
    cells: Vec<QueryCell>,
}

impl QueryRow {
    /// Build a row from cells. Duplicate column names are a construction
    /// error, not a silent overwrite.
    pub fn new(cells: Vec<QueryCell>) -> Result<Self, ValidationError> {
        let mut seen = std::collections::HashSet::new();
        for cell in &cells {
            if !seen.insert(cell.column.as_str()) {
                return Err(ValidationError::DuplicateColumn {
                    owner: "row".to_string(),
                    column: cell.column.clone(),
                });
            }
        }
        Ok(QueryRow { cells })
    }

    /// Convenience constructor from (name, value) pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        QueryRow::new(
            pairs
                .into_iter()
                .map(|(name, value)| QueryCell::new(name, value))
                .collect(),
        )
    }

    pub fn cells(&self) -> &[QueryCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, column: &str) -> Option<&QueryCell> {
        self.cells.iter().find(|c| c.column == column)
    }

    /// The value stored under `column`, if the row has that column.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.cell(column).map(|c| &c.value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.column.as_str())
    }
}
