//! Aggregate statistics over query rows.
//!
//! An [`Aggregate`] resolves a data binding per row to a number and reduces
//! the resulting list with a variant-specific function. Any row that fails
//! to resolve or convert fails the whole computation; an empty row set
//! reduces to zero, never an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::binding::{BindingError, DataBinding, ResolverContext};
use crate::param::ParameterValues;
use crate::query::{Query, QueryError};
use crate::row::QueryRow;
use crate::value::TargetType;

/// Result type for aggregate computations.
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Errors raised while computing an aggregate.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// The reduction applied over the per-row numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateFunction {
    Sum,
    Average,
    Min,
    Max,
    Count,
}

/// A binding plus a reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub function: AggregateFunction,
    pub binding: DataBinding,
    /// Round the result to two decimal places.
    pub auto_round: bool,
}

impl Aggregate {
    pub fn new(function: AggregateFunction, binding: DataBinding) -> Self {
        Aggregate {
            function,
            binding,
            auto_round: false,
        }
    }

    pub fn auto_rounded(mut self) -> Self {
        self.auto_round = true;
        self
    }

    /// Resolve the binding per row and reduce.
    pub fn reduce(&self, rows: &[QueryRow], ctx: &ResolverContext) -> AggregateResult<f64> {
        let mut numbers = Vec::with_capacity(rows.len());
        for row in rows {
            let value = self.binding.resolve_as(row, ctx, &TargetType::Float)?;
            numbers.push(value.as_f64().unwrap_or(0.0));
        }

        let result = match self.function {
            AggregateFunction::Sum => numbers.iter().sum(),
            AggregateFunction::Average => {
                if numbers.is_empty() {
                    0.0
                } else {
                    numbers.iter().sum::<f64>() / numbers.len() as f64
                }
            }
            AggregateFunction::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateFunction::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggregateFunction::Count => numbers.len() as f64,
        };

        // Empty sets reduce to the numeric default.
        let result = if numbers.is_empty() { 0.0 } else { result };

        Ok(if self.auto_round {
            round_to_two(result)
        } else {
            result
        })
    }

    /// Convenience path: execute the query first, then reduce over all of
    /// its rows.
    pub async fn execute(
        &self,
        query: &dyn Query,
        parameters: &ParameterValues,
        ctx: &ResolverContext,
    ) -> AggregateResult<f64> {
        let result_set = query.execute(parameters).await?;
        self.reduce(result_set.all_rows(), ctx)
    }
}

fn round_to_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
