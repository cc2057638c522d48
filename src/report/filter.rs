//! Runtime report filter.
//!
//! A filter carries the parameter values and component exclusions applied
//! during one generation run. It is cloneable so nested component filters
//! can override parameters without touching the caller's copy.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::param::{ParameterResult, ParameterValue, ParameterValues};
use crate::value::Value;

use super::definition::ReportDefinition;

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    parameter_values: HashMap<String, ParameterValue>,
    excluded_components: HashSet<String>,
}

impl ReportFilter {
    pub fn new() -> Self {
        ReportFilter::default()
    }

    /// Build a filter from a definition's parameter schema, with every
    /// parameter unset.
    pub fn from_definition(definition: &ReportDefinition) -> Self {
        let parameter_values = definition
            .parameters()
            .iter()
            .map(|info| (info.name.clone(), ParameterValue::new(info.clone())))
            .collect();
        ReportFilter {
            parameter_values,
            excluded_components: HashSet::new(),
        }
    }

    /// Assign values to the named parameters. This is the only mutation
    /// path for parameter values; assignment validation applies per value.
    pub fn set_parameter_values(&mut self, values: ParameterValues) -> ParameterResult<()> {
        for (name, value) in values {
            match self.parameter_values.get_mut(&name) {
                Some(parameter) => parameter.set_value(value)?,
                None => {
                    warn!(parameter = %name, "ignoring value for unknown parameter");
                }
            }
        }
        Ok(())
    }

    pub fn parameter_value(&self, name: &str) -> Option<&ParameterValue> {
        self.parameter_values.get(name)
    }

    pub fn parameter_values(&self) -> impl Iterator<Item = &ParameterValue> {
        self.parameter_values.values()
    }

    /// Raw name -> value map, as query execution consumes it.
    pub fn values(&self) -> ParameterValues {
        self.parameter_values
            .iter()
            .map(|(name, parameter)| (name.clone(), parameter.value().clone()))
            .collect()
    }

    pub fn exclude_component(&mut self, name: impl Into<String>) {
        self.excluded_components.insert(name.into());
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_components.contains(name)
    }

    pub fn excluded_components(&self) -> impl Iterator<Item = &str> {
        self.excluded_components.iter().map(|n| n.as_str())
    }

    /// Clone with parameter overrides, for nested component filters.
    pub fn with_overrides(&self, overrides: ParameterValues) -> ParameterResult<Self> {
        let mut filter = self.clone();
        filter.set_parameter_values(overrides)?;
        Ok(filter)
    }

    /// Insert or replace a fully-constructed parameter value.
    pub fn insert_parameter(&mut self, parameter: ParameterValue) {
        self.parameter_values
            .insert(parameter.name().to_string(), parameter);
    }

    /// Look up a raw parameter value by name.
    pub fn raw_value(&self, name: &str) -> Option<&Value> {
        self.parameter_values.get(name).map(|p| p.value())
    }
}

// Convenience for tests and authoring code assembling ad-hoc filters.
impl FromIterator<ParameterValue> for ReportFilter {
    fn from_iter<I: IntoIterator<Item = ParameterValue>>(iter: I) -> Self {
        ReportFilter {
            parameter_values: iter
                .into_iter()
                .map(|p| (p.name().to_string(), p))
                .collect(),
            excluded_components: HashSet::new(),
        }
    }
}
