//! Data source schema descriptions.
//!
//! Schemas describe what a data source exposes (tables, columns, keys) so
//! that bindings and queries can be validated ahead of execution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::TargetType;

/// Result type for schema validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised by malformed definitions and schemas.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Two columns share a name within one table or row.
    #[error("duplicate column '{column}' in '{owner}'")]
    DuplicateColumn { owner: String, column: String },

    /// A primary key names a column the table does not have.
    #[error("table '{table}' primary key references unknown column '{column}'")]
    UnknownPrimaryKeyColumn { table: String, column: String },

    /// A foreign key names a column the table does not have.
    #[error("table '{table}' foreign key references unknown column '{column}'")]
    UnknownForeignKeyColumn { table: String, column: String },

    /// A foreign key's local and referenced column lists differ in length.
    #[error("table '{table}' foreign key to '{referenced_table}' has mismatched column counts")]
    ForeignKeyArityMismatch {
        table: String,
        referenced_table: String,
    },
}

/// One column of a data source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataColumnSchema {
    pub name: String,
    pub data_type: TargetType,
}

impl DataColumnSchema {
    pub fn new(name: impl Into<String>, data_type: TargetType) -> Self {
        DataColumnSchema {
            name: name.into(),
            data_type,
        }
    }
}

/// A foreign key relationship between two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataForeignKey {
    pub columns: Vec<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
}

/// One table of a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTableSchema {
    pub name: String,
    pub columns: Vec<DataColumnSchema>,
    pub primary_key: Option<Vec<String>>,
    pub foreign_keys: Vec<DataForeignKey>,
}

impl DataTableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<DataColumnSchema>) -> Self {
        DataTableSchema {
            name: name.into(),
            columns,
            primary_key: None,
            foreign_keys: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&DataColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Validate the table in isolation, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let mut seen = std::collections::HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                errors.push(ValidationError::DuplicateColumn {
                    owner: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        if let Some(key) = &self.primary_key {
            for column in key {
                if self.column(column).is_none() {
                    errors.push(ValidationError::UnknownPrimaryKeyColumn {
                        table: self.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        for fk in &self.foreign_keys {
            if fk.columns.len() != fk.referenced_columns.len() {
                errors.push(ValidationError::ForeignKeyArityMismatch {
                    table: self.name.clone(),
                    referenced_table: fk.referenced_table.clone(),
                });
            }
            for column in &fk.columns {
                if self.column(column).is_none() {
                    errors.push(ValidationError::UnknownForeignKeyColumn {
                        table: self.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
