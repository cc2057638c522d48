//! # Heron
//!
//! A declarative report generation engine with concurrent section
//! orchestration.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          ReportDefinition + ReportFilter                 │
//! │  (sections, components, parameters, exclusions)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [orchestrator]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Section units (concurrent, one per section)          │
//! │     └─ Component units (concurrent, per generator)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [queries + bindings]
//! ┌─────────────────────────────────────────────────────────┐
//! │   QueryRow model ── DataBinding ── value conversion      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │          Report + GenerationResult                       │
//! │  (output tree, timing, errors, handled exceptions)       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Data-source connectors, template renderers, math evaluators, and
//! table/chart/graphic generators plug in through the traits in
//! [`query`], [`binding`], and [`generate`].

pub mod aggregate;
pub mod binding;
pub mod cache;
pub mod config;
pub mod context;
pub mod generate;
pub mod param;
pub mod query;
pub mod registry;
pub mod report;
pub mod row;
pub mod schema;
pub mod value;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::aggregate::{Aggregate, AggregateFunction};
    pub use crate::binding::{BindingKind, DataBinding, MathEvaluator, TemplateRenderer};
    pub use crate::context::GenerationContext;
    pub use crate::generate::{
        ComponentGenerator, GenerationResult, GeneratorRegistry, ReportGenerator, SectionResult,
    };
    pub use crate::param::{LookupConfig, LookupSource, ParameterInfo, ParameterValue};
    pub use crate::query::{DataSource, NativeResult, Query, QueryColumnInfo, ResultSet};
    pub use crate::report::{
        ComponentDefinition, ComponentOutput, ComponentType, Report, ReportDefinition,
        ReportFilter, ReportSectionDefinition, SectionType,
    };
    pub use crate::row::{QueryCell, QueryRow};
    pub use crate::value::{convert, EnumMember, EnumType, TargetType, Value};
}
