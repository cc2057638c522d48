//! Data binding resolution.
//!
//! A [`DataBinding`] pairs an expression with a resolution strategy and
//! yields a value from a [`QueryRow`]:
//!
//! - `QueryPath`: a dot-delimited `Column[.Property]*` path into the row,
//!   with property segments traversing object values.
//! - `TemplateContent`: template markup handed to the configured
//!   [`TemplateRenderer`] with the row as the model.
//! - `MathExpression`: rendered as template content first (so column values
//!   can be interpolated into the expression text), then handed to the
//!   configured [`MathEvaluator`].
//!
//! Resolution is pure per call; nothing is cached between rows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::row::QueryRow;
use crate::value::{convert, ConversionError, TargetType, Value};

/// Result type for binding resolution.
pub type BindingResult<T> = Result<T, BindingError>;

/// Error type collaborators are free to fill with their own failures.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Renders template markup against a row model.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, row: &QueryRow) -> Result<String, CollaboratorError>;
}

/// Evaluates a math expression to a value.
pub trait MathEvaluator: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<Value, CollaboratorError>;
}

/// The collaborators binding resolution may call out to.
#[derive(Clone, Default)]
pub struct ResolverContext {
    pub renderer: Option<Arc<dyn TemplateRenderer>>,
    pub evaluator: Option<Arc<dyn MathEvaluator>>,
}

impl ResolverContext {
    pub fn with_renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn MathEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }
}

/// Errors raised while resolving a binding against a row.
#[derive(Debug, Error)]
pub enum BindingError {
    /// The path's first segment names a column the row does not have.
    #[error("column '{column}' not found in row")]
    ColumnNotFound { column: String },

    /// A path segment was applied to a null value.
    #[error("null reference in path '{path}' before segment '{segment}'")]
    NullReferenceInPath { path: String, segment: String },

    /// A path segment names a property the current value does not expose.
    #[error("property '{segment}' not found on {value_type} value in path '{path}'")]
    PropertyNotFound {
        path: String,
        segment: String,
        value_type: &'static str,
    },

    /// A template binding was resolved with no renderer registered.
    #[error("no template renderer is configured")]
    RendererNotConfigured,

    /// A math binding was resolved with no evaluator registered.
    #[error("no math expression evaluator is configured")]
    EvaluatorNotConfigured,

    #[error("template rendering failed: {0}")]
    RenderFailed(#[source] CollaboratorError),

    #[error("expression evaluation failed: {0}")]
    EvaluationFailed(#[source] CollaboratorError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// How a binding's expression is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingKind {
    /// Dot-delimited column/property path.
    QueryPath,
    /// Template markup rendered with the row as model.
    TemplateContent,
    /// Template-rendered text evaluated as a math expression.
    MathExpression,
}

/// An expression plus a resolution strategy. Pure value object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBinding {
    pub expression: String,
    pub kind: BindingKind,
}

impl DataBinding {
    pub fn query_path(expression: impl Into<String>) -> Self {
        DataBinding {
            expression: expression.into(),
            kind: BindingKind::QueryPath,
        }
    }

    pub fn template(expression: impl Into<String>) -> Self {
        DataBinding {
            expression: expression.into(),
            kind: BindingKind::TemplateContent,
        }
    }

    pub fn math(expression: impl Into<String>) -> Self {
        DataBinding {
            expression: expression.into(),
            kind: BindingKind::MathExpression,
        }
    }

    /// Resolve the binding against a row.
    pub fn resolve(&self, row: &QueryRow, ctx: &ResolverContext) -> BindingResult<Value> {
        match self.kind {
            BindingKind::QueryPath => self.resolve_path(row),
            BindingKind::TemplateContent => self.render(row, ctx).map(Value::Text),
            BindingKind::MathExpression => {
                let rendered = self.render(row, ctx)?;
                let evaluator = ctx
                    .evaluator
                    .as_deref()
                    .ok_or(BindingError::EvaluatorNotConfigured)?;
                evaluator
                    .evaluate(&rendered)
                    .map_err(BindingError::EvaluationFailed)
            }
        }
    }

    /// Resolve and coerce the result to `target`.
    pub fn resolve_as(
        &self,
        row: &QueryRow,
        ctx: &ResolverContext,
        target: &TargetType,
    ) -> BindingResult<Value> {
        let value = self.resolve(row, ctx)?;
        Ok(convert(&value, target)?)
    }

    fn resolve_path(&self, row: &QueryRow) -> BindingResult<Value> {
        let mut segments = self.expression.split('.');
        let column = segments.next().unwrap_or_default();

        let mut current = row
            .value(column)
            .ok_or_else(|| BindingError::ColumnNotFound {
                column: column.to_string(),
            })?;

        for segment in segments {
            if current.is_null() {
                return Err(BindingError::NullReferenceInPath {
                    path: self.expression.clone(),
                    segment: segment.to_string(),
                });
            }
            current = resolve_property(current, segment).ok_or_else(|| {
                BindingError::PropertyNotFound {
                    path: self.expression.clone(),
                    segment: segment.to_string(),
                    value_type: current.type_name(),
                }
            })?;
        }

        Ok(current.clone())
    }

    fn render(&self, row: &QueryRow, ctx: &ResolverContext) -> BindingResult<String> {
        let renderer = ctx
            .renderer
            .as_deref()
            .ok_or(BindingError::RendererNotConfigured)?;
        renderer
            .render(&self.expression, row)
            .map_err(BindingError::RenderFailed)
    }
}

/// Dynamic property lookup on a value.
///
/// Kept as a free function so alternate traversal strategies can replace it
/// without touching binding callers.
pub fn resolve_property<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => fields.get(name),
        _ => None,
    }
}
