//! Report parameters and lookup lists.
//!
//! A [`ParameterInfo`] is the static description of a parameter (name,
//! expected type, required flag, lookup configuration). A
//! [`ParameterValue`] carries one resolved value for it, validated on
//! assignment, plus a lazily-materialized cache of the selectable lookup
//! items.
//!
//! Lookups must never abort report generation: a failing lookup query
//! degrades to a single descriptive entry instead of propagating.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::binding::DataBinding;
use crate::context::GenerationContext;
use crate::value::{convert, EnumType, TargetType, Value};

/// Plain parameter name -> value map handed to query execution.
pub type ParameterValues = HashMap<String, Value>;

/// Result type for parameter operations.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Errors raised by parameter value assignment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// Null was assigned to a required parameter.
    #[error("parameter '{0}' is required and cannot be null")]
    Required(String),

    /// The assigned value is neither of the expected type nor convertible
    /// to it.
    #[error("parameter '{name}' expects {expected}, but '{value}' ({actual}) is not convertible")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: &'static str,
        value: String,
    },
}

/// Where a parameter's lookup list comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LookupSource {
    /// Execute a registered query and bind (value, text) per row.
    Query {
        query: String,
        value_binding: DataBinding,
        text_binding: DataBinding,
    },
    /// Enumerate the members of a runtime-described enum.
    Enumeration(EnumType),
}

/// Lookup configuration of a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    pub source: LookupSource,
    /// Prepend a blank ("", "") choice. `None` defers to the engine-wide
    /// `Settings::insert_blank_lookup_item` default.
    pub insert_blank_item: Option<bool>,
}

/// Static metadata describing one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub data_type: TargetType,
    pub required: bool,
    pub lookup: Option<LookupConfig>,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, data_type: TargetType) -> Self {
        ParameterInfo {
            name: name.into(),
            data_type,
            required: false,
            lookup: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_lookup(mut self, lookup: LookupConfig) -> Self {
        self.lookup = Some(lookup);
        self
    }
}

/// One selectable (value, display text) choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupItem {
    pub value: Value,
    pub text: String,
}

impl LookupItem {
    pub fn new(value: Value, text: impl Into<String>) -> Self {
        LookupItem {
            value,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        LookupItem::new(Value::Text(String::new()), "")
    }
}

/// One resolved value for a [`ParameterInfo`].
///
/// The lookup item list is computed on first access and cached until the
/// lookup-dependent parameter values change. The cache belongs to this one
/// instance; it is not meant for concurrent mutation.
#[derive(Debug, Clone)]
pub struct ParameterValue {
    info: ParameterInfo,
    value: Value,
    lookup_parameter_values: ParameterValues,
    lookup_items: Option<Vec<LookupItem>>,
}

impl ParameterValue {
    pub fn new(info: ParameterInfo) -> Self {
        ParameterValue {
            info,
            value: Value::Null,
            lookup_parameter_values: ParameterValues::new(),
            lookup_items: None,
        }
    }

    /// Construct with an initial value, applying assignment validation.
    pub fn with_value(info: ParameterInfo, value: Value) -> ParameterResult<Self> {
        let mut parameter = ParameterValue::new(info);
        parameter.set_value(value)?;
        Ok(parameter)
    }

    pub fn info(&self) -> &ParameterInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Assign a value. Null is rejected for required parameters; non-null
    /// values must be of (or convertible to) the expected type.
    pub fn set_value(&mut self, value: Value) -> ParameterResult<()> {
        if value.is_null() {
            if self.info.required {
                return Err(ParameterError::Required(self.info.name.clone()));
            }
            self.value = Value::Null;
            return Ok(());
        }

        if self.info.data_type.accepts(&value) {
            self.value = value;
            return Ok(());
        }

        match convert(&value, &self.info.data_type) {
            Ok(converted) => {
                self.value = converted;
                Ok(())
            }
            Err(_) => Err(ParameterError::TypeMismatch {
                name: self.info.name.clone(),
                expected: self.info.data_type.to_string(),
                actual: value.type_name(),
                value: value.to_string(),
            }),
        }
    }

    /// Supply the parameter values a lookup query depends on. Invalidates
    /// the cached lookup list.
    pub fn set_lookup_parameter_values(&mut self, values: ParameterValues) {
        self.lookup_parameter_values = values;
        self.lookup_items = None;
    }

    /// The selectable lookup items, materialized on first access.
    pub async fn lookup_items(&mut self, ctx: &GenerationContext) -> &[LookupItem] {
        if self.lookup_items.is_none() {
            let items = self.materialize_lookup(ctx).await;
            self.lookup_items = Some(items);
        }
        self.lookup_items.as_deref().unwrap_or_default()
    }

    async fn materialize_lookup(&self, ctx: &GenerationContext) -> Vec<LookupItem> {
        let Some(lookup) = &self.info.lookup else {
            return Vec::new();
        };

        let mut items = match &lookup.source {
            LookupSource::Query {
                query,
                value_binding,
                text_binding,
            } => self
                .query_lookup(ctx, query, value_binding, text_binding)
                .await,
            LookupSource::Enumeration(ty) => ty
                .members
                .iter()
                .map(|member| {
                    LookupItem::new(
                        Value::Enum {
                            ty: ty.name.clone(),
                            member: member.name.clone(),
                        },
                        member.display_text(),
                    )
                })
                .collect(),
        };

        let insert_blank = lookup
            .insert_blank_item
            .unwrap_or(ctx.settings().insert_blank_lookup_item);
        if insert_blank {
            items.insert(0, LookupItem::blank());
        }
        items
    }

    async fn query_lookup(
        &self,
        ctx: &GenerationContext,
        query_name: &str,
        value_binding: &DataBinding,
        text_binding: &DataBinding,
    ) -> Vec<LookupItem> {
        // Any failure along the way degrades to a single descriptive item;
        // a broken lookup must not take report generation down with it.
        let result = async {
            let query = ctx.query(query_name)?;
            let result_set = query
                .execute_with_cap(
                    &self.lookup_parameter_values,
                    ctx.settings().default_maximum_rows,
                )
                .await?;

            let mut items = Vec::with_capacity(result_set.len());
            for row in result_set.all_rows() {
                let value = value_binding.resolve(row, ctx.resolver())?;
                let text = text_binding.resolve(row, ctx.resolver())?;
                items.push(LookupItem::new(value, text.to_string()));
            }
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(items)
        }
        .await;

        match result {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    parameter = %self.info.name,
                    query = query_name,
                    error = %e,
                    "lookup query failed; degrading to error item"
                );
                vec![LookupItem::new(Value::Null, e.to_string())]
            }
        }
    }
}
