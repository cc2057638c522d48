//! Report generation orchestration.
//!
//! The orchestrator turns a [`ReportDefinition`] plus a [`ReportFilter`]
//! into a populated [`Report`]:
//!
//! 1. Resolve the filter (auto-generated from the parameter schema when the
//!    caller supplies none).
//! 2. Fan out one generation unit per present section; absent sections are
//!    skipped without error.
//! 3. Within a section, fan out one unit per non-excluded component,
//!    dispatched through the [`GeneratorRegistry`] by component type.
//! 4. Await each batch together and merge the results, error messages, and
//!    handled exceptions into a [`GenerationResult`].
//!
//! No shared mutable state crosses concurrent units; each unit reads its
//! own definition/filter inputs and returns a fresh result. Dropping the
//! returned future cancels every in-flight unit.

mod builtin;

pub use builtin::{SeparatorGenerator, StatisticGenerator};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::aggregate::AggregateError;
use crate::binding::BindingError;
use crate::context::GenerationContext;
use crate::param::ParameterError;
use crate::query::QueryError;
use crate::registry::RegistryError;
use crate::report::{
    ComponentDefinition, ComponentOutput, ComponentType, Report, ReportComponent,
    ReportDefinition, ReportFilter, ReportSection, ReportSectionDefinition, SectionType,
};
use crate::schema::ValidationError;
use crate::value::ConversionError;

/// Result type for component generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Any failure a generation unit can surface.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A component definition is missing or misusing a required setting.
    #[error("component '{component}' is misconfigured: {message}")]
    Misconfigured { component: String, message: String },

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Generates the output of one component variant.
#[async_trait]
pub trait ComponentGenerator: Send + Sync {
    async fn generate(
        &self,
        definition: &ComponentDefinition,
        section_type: SectionType,
        filter: &ReportFilter,
        ctx: &GenerationContext,
    ) -> GenerateResult<ComponentOutput>;
}

/// Component-type-keyed dispatch table of generators.
///
/// Adding a component variant is a local registration here, not a
/// dispatch-site edit.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<ComponentType, Arc<dyn ComponentGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        GeneratorRegistry::default()
    }

    /// Registry pre-loaded with the built-in separator and statistic
    /// generators.
    pub fn with_builtins() -> Self {
        let mut registry = GeneratorRegistry::new();
        // Registrations into an empty registry cannot collide.
        let _ = registry.register(ComponentType::Separator, Arc::new(SeparatorGenerator));
        let _ = registry.register(ComponentType::Statistic, Arc::new(StatisticGenerator));
        registry
    }

    pub fn register(
        &mut self,
        component_type: ComponentType,
        generator: Arc<dyn ComponentGenerator>,
    ) -> Result<(), RegistryError> {
        if self.generators.contains_key(&component_type) {
            return Err(RegistryError::Duplicate {
                kind: "component generator",
                name: component_type.to_string(),
            });
        }
        self.generators.insert(component_type, generator);
        Ok(())
    }

    pub fn resolve(
        &self,
        component_type: ComponentType,
    ) -> Result<Arc<dyn ComponentGenerator>, RegistryError> {
        self.generators
            .get(&component_type)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                kind: "component generator",
                name: component_type.to_string(),
            })
    }
}

/// Outcome of one section's generation unit.
#[derive(Debug)]
pub struct SectionResult {
    pub section: ReportSection,
    pub elapsed: Duration,
    pub success: bool,
    pub error_messages: Vec<String>,
    pub exceptions: Vec<GenerateError>,
}

/// Outcome of a whole generation run.
#[derive(Debug)]
pub struct GenerationResult {
    pub report: Report,
    pub elapsed: Duration,
    pub success: bool,
    pub error_messages: Vec<String>,
    pub exceptions: Vec<GenerateError>,
}

/// The top-level generation driver.
pub struct ReportGenerator {
    context: Arc<GenerationContext>,
    generators: GeneratorRegistry,
}

impl ReportGenerator {
    /// A generator with the built-in component generators registered.
    pub fn new(context: Arc<GenerationContext>) -> Self {
        ReportGenerator {
            context,
            generators: GeneratorRegistry::with_builtins(),
        }
    }

    /// A generator with a caller-assembled dispatch table.
    pub fn with_registry(context: Arc<GenerationContext>, generators: GeneratorRegistry) -> Self {
        ReportGenerator {
            context,
            generators,
        }
    }

    pub fn register_generator(
        &mut self,
        component_type: ComponentType,
        generator: Arc<dyn ComponentGenerator>,
    ) -> Result<(), RegistryError> {
        self.generators.register(component_type, generator)
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Generate a report. Never fails outright; the result carries the
    /// success flag, error messages, and handled exceptions.
    pub async fn generate(
        &self,
        definition: &ReportDefinition,
        filter: Option<ReportFilter>,
    ) -> GenerationResult {
        let started = Instant::now();
        let filter = filter.unwrap_or_else(|| ReportFilter::from_definition(definition));

        debug!(report = definition.name(), "generating report");

        let section_units = SectionType::ALL
            .iter()
            .filter_map(|section_type| definition.section(*section_type))
            .map(|section| self.generate_section(section, &filter));

        let outcomes = join_all(section_units).await;

        let mut sections = Vec::with_capacity(outcomes.len());
        let mut error_messages = Vec::new();
        let mut exceptions = Vec::new();
        let mut success = true;

        for outcome in outcomes {
            success &= outcome.success;
            sections.push(outcome.section);
            error_messages.extend(outcome.error_messages);
            exceptions.extend(outcome.exceptions);
        }

        GenerationResult {
            report: Report {
                name: definition.name().to_string(),
                sections,
            },
            elapsed: started.elapsed(),
            success,
            error_messages,
            exceptions,
        }
    }

    /// Generate one section: fan out its components, await the batch, and
    /// fold the results into a [`SectionResult`].
    pub async fn generate_section(
        &self,
        definition: &ReportSectionDefinition,
        filter: &ReportFilter,
    ) -> SectionResult {
        let started = Instant::now();

        let component_units = definition
            .components
            .iter()
            .filter(|component| !filter.is_excluded(&component.name))
            .map(|component| self.generate_component(component, definition.section_type, filter));

        let results = join_all(component_units).await;

        let mut components = Vec::with_capacity(results.len());
        let mut error_messages = Vec::new();
        let mut exceptions = Vec::new();

        for result in results {
            match result {
                Ok(component) => components.push(component),
                Err(e) => {
                    warn!(
                        section = %definition.section_type,
                        error = %e,
                        "component generation failed"
                    );
                    error_messages.push(e.to_string());
                    exceptions.push(e);
                }
            }
        }

        // A failing component finalizes the section with an empty component
        // list; completed siblings in the batch are dropped with it.
        // TODO: keep successful sibling outputs keyed by component name
        // instead of discarding the whole batch.
        if !exceptions.is_empty() {
            components.clear();
        }

        SectionResult {
            success: exceptions.is_empty(),
            section: ReportSection {
                section_type: definition.section_type,
                title: definition.title.clone(),
                components,
            },
            elapsed: started.elapsed(),
            error_messages,
            exceptions,
        }
    }

    async fn generate_component(
        &self,
        definition: &ComponentDefinition,
        section_type: SectionType,
        filter: &ReportFilter,
    ) -> GenerateResult<ReportComponent> {
        let generator = self.generators.resolve(definition.component_type)?;
        let output = generator
            .generate(definition, section_type, filter, &self.context)
            .await?;
        Ok(ReportComponent {
            definition_id: definition.id,
            name: definition.name.clone(),
            title: definition.title.clone(),
            component_type: definition.component_type,
            output,
        })
    }
}
