//! Authoring-time report definitions.
//!
//! A [`ReportDefinition`] owns up to five section definitions, one per
//! [`SectionType`]. Definitions are read-only during generation; mutation
//! happens only through the explicit mutator methods used by report
//! authoring code.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::param::ParameterInfo;
use crate::value::Value;

/// The five fixed report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    PageHeader,
    ReportHeader,
    Body,
    ReportFooter,
    PageFooter,
}

impl SectionType {
    pub const ALL: [SectionType; 5] = [
        SectionType::PageHeader,
        SectionType::ReportHeader,
        SectionType::Body,
        SectionType::ReportFooter,
        SectionType::PageFooter,
    ];
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::PageHeader => "page header",
            SectionType::ReportHeader => "report header",
            SectionType::Body => "body",
            SectionType::ReportFooter => "report footer",
            SectionType::PageFooter => "page footer",
        };
        write!(f, "{}", name)
    }
}

/// The renderable component variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Table,
    Chart,
    Statistic,
    Graphic,
    Separator,
    Query,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentType::Table => "table",
            ComponentType::Chart => "chart",
            ComponentType::Statistic => "statistic",
            ComponentType::Graphic => "graphic",
            ComponentType::Separator => "separator",
            ComponentType::Query => "query",
        };
        write!(f, "{}", name)
    }
}

/// One component of a section, as authored.
///
/// The `fields` map carries per-component settings the matching generator
/// interprets (bindings, query knobs, conditional-rendering flags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub component_type: ComponentType,
    pub fields: HashMap<String, Value>,
    pub no_data_message: Option<String>,
    pub style: HashMap<String, String>,
    /// Names of the registered queries this component reads from.
    pub queries: Vec<String>,
}

impl ComponentDefinition {
    pub fn new(name: impl Into<String>, component_type: ComponentType) -> Self {
        let name = name.into();
        ComponentDefinition {
            id: Uuid::new_v4(),
            title: name.clone(),
            name,
            component_type,
            fields: HashMap::new(),
            no_data_message: None,
            style: HashMap::new(),
            queries: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_no_data_message(mut self, message: impl Into<String>) -> Self {
        self.no_data_message = Some(message.into());
        self
    }

    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(name.into(), value.into());
        self
    }

    pub fn reads_query(mut self, query: impl Into<String>) -> Self {
        self.queries.push(query.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One section of a report, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSectionDefinition {
    pub section_type: SectionType,
    pub title: String,
    pub description: String,
    pub components: Vec<ComponentDefinition>,
}

impl ReportSectionDefinition {
    pub fn new(section_type: SectionType) -> Self {
        ReportSectionDefinition {
            section_type,
            title: String::new(),
            description: String::new(),
            components: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_component(mut self, component: ComponentDefinition) -> Self {
        self.components.push(component);
        self
    }

    pub fn add_component(&mut self, component: ComponentDefinition) {
        self.components.push(component);
    }
}

/// The named root of a report definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinition {
    name: String,
    description: String,
    parameters: Vec<ParameterInfo>,
    sections: HashMap<SectionType, ReportSectionDefinition>,
}

impl ReportDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        ReportDefinition {
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
            sections: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Install a section, replacing any existing one of the same type.
    pub fn set_section(&mut self, section: ReportSectionDefinition) {
        self.sections.insert(section.section_type, section);
    }

    pub fn remove_section(&mut self, section_type: SectionType) -> Option<ReportSectionDefinition> {
        self.sections.remove(&section_type)
    }

    pub fn section(&self, section_type: SectionType) -> Option<&ReportSectionDefinition> {
        self.sections.get(&section_type)
    }

    pub fn add_parameter(&mut self, parameter: ParameterInfo) {
        self.parameters.push(parameter);
    }

    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    /// Builder-style variants for authoring code.
    pub fn with_section(mut self, section: ReportSectionDefinition) -> Self {
        self.set_section(section);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterInfo) -> Self {
        self.add_parameter(parameter);
        self
    }
}
