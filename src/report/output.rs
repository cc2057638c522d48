//! Generated report output tree.
//!
//! Mirrors the definition tree, with each section definition replaced by a
//! [`ReportSection`] holding concrete component outputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::Value;

use super::definition::{ComponentType, SectionType};

/// One data point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// One named series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

/// The concrete payload a component generator produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentOutput {
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    Chart {
        series: Vec<ChartSeries>,
    },
    Statistic {
        value: Value,
        caption: String,
    },
    Graphic {
        source: String,
    },
    Separator,
    /// The component's configured message shown when its data ran empty.
    NoData {
        message: String,
    },
}

/// One generated component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportComponent {
    pub definition_id: Uuid,
    pub name: String,
    pub title: String,
    pub component_type: ComponentType,
    pub output: ComponentOutput,
}

/// One generated section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub section_type: SectionType,
    pub title: String,
    pub components: Vec<ReportComponent>,
}

impl ReportSection {
    pub fn component(&self, name: &str) -> Option<&ReportComponent> {
        self.components.iter().find(|c| c.name == name)
    }
}

/// The populated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn section(&self, section_type: SectionType) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.section_type == section_type)
    }
}
