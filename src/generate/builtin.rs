//! Built-in component generators.
//!
//! Separator and statistic components are generated in-crate; the other
//! variants (tables, charts, graphics) are supplied by rendering-side
//! collaborators through the same [`ComponentGenerator`] contract.

use async_trait::async_trait;

use crate::aggregate::{Aggregate, AggregateFunction};
use crate::binding::DataBinding;
use crate::context::GenerationContext;
use crate::report::{ComponentDefinition, ComponentOutput, ReportFilter, SectionType};
use crate::value::Value;

use super::{ComponentGenerator, GenerateError, GenerateResult};

/// Emits a separator, unconditionally.
pub struct SeparatorGenerator;

#[async_trait]
impl ComponentGenerator for SeparatorGenerator {
    async fn generate(
        &self,
        _definition: &ComponentDefinition,
        _section_type: SectionType,
        _filter: &ReportFilter,
        _ctx: &GenerationContext,
    ) -> GenerateResult<ComponentOutput> {
        Ok(ComponentOutput::Separator)
    }
}

/// Computes a single aggregate statistic from the component's query.
///
/// Recognized definition fields:
/// - `binding` (required): the expression resolved per row.
/// - `binding_kind`: `query_path` (default), `template`, or `math`.
/// - `function`: `sum` (default), `average`, `min`, `max`, or `count`.
/// - `auto_round`: overrides the engine-wide rounding default.
/// - `caption`: display caption; falls back to the translated component
///   name.
pub struct StatisticGenerator;

#[async_trait]
impl ComponentGenerator for StatisticGenerator {
    async fn generate(
        &self,
        definition: &ComponentDefinition,
        _section_type: SectionType,
        filter: &ReportFilter,
        ctx: &GenerationContext,
    ) -> GenerateResult<ComponentOutput> {
        let query_name = definition.queries.first().ok_or_else(|| misconfigured(
            definition,
            "a statistic component needs a query to read from",
        ))?;

        let expression = definition
            .field("binding")
            .and_then(Value::as_str)
            .ok_or_else(|| misconfigured(definition, "missing 'binding' field"))?;

        let binding = match definition.field("binding_kind").and_then(Value::as_str) {
            None | Some("query_path") => DataBinding::query_path(expression),
            Some("template") => DataBinding::template(expression),
            Some("math") => DataBinding::math(expression),
            Some(other) => {
                return Err(misconfigured(
                    definition,
                    &format!("unknown binding kind '{}'", other),
                ))
            }
        };

        let function = match definition.field("function").and_then(Value::as_str) {
            None | Some("sum") => AggregateFunction::Sum,
            Some("average") => AggregateFunction::Average,
            Some("min") => AggregateFunction::Min,
            Some("max") => AggregateFunction::Max,
            Some("count") => AggregateFunction::Count,
            Some(other) => {
                return Err(misconfigured(
                    definition,
                    &format!("unknown aggregate function '{}'", other),
                ))
            }
        };

        let auto_round = match definition.field("auto_round") {
            Some(Value::Bool(b)) => *b,
            _ => ctx.settings().auto_round_statistics,
        };

        let query = ctx.query(query_name)?;
        let result_set = query
            .execute_with_cap(&filter.values(), ctx.settings().default_maximum_rows)
            .await?;

        if result_set.is_empty() {
            if let Some(message) = &definition.no_data_message {
                return Ok(ComponentOutput::NoData {
                    message: message.clone(),
                });
            }
        }

        let mut aggregate = Aggregate::new(function, binding);
        aggregate.auto_round = auto_round;
        let value = aggregate.reduce(result_set.all_rows(), ctx.resolver())?;

        let caption = definition
            .field("caption")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| ctx.translations().translate(&definition.name));

        Ok(ComponentOutput::Statistic {
            value: Value::Float(value),
            caption,
        })
    }
}

fn misconfigured(definition: &ComponentDefinition, message: &str) -> GenerateError {
    GenerateError::Misconfigured {
        component: definition.name.clone(),
        message: message.to_string(),
    }
}
