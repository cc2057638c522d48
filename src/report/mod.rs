//! Report model: authoring-time definitions, the runtime filter, and the
//! generated output tree.

pub mod definition;
pub mod filter;
pub mod output;

pub use definition::{
    ComponentDefinition, ComponentType, ReportDefinition, ReportSectionDefinition, SectionType,
};
pub use filter::ReportFilter;
pub use output::{ChartPoint, ChartSeries, ComponentOutput, Report, ReportComponent, ReportSection};
