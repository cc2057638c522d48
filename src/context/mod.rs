//! Generation context.
//!
//! Everything pluggable the engine touches at generation time hangs off a
//! [`GenerationContext`]: the query and data-source registries, the
//! template/math collaborators, the translation cache, and engine settings.
//! The context is built once at process start and shared immutably across
//! concurrent generation units; nothing on it is a static.

use std::sync::Arc;

use crate::binding::{MathEvaluator, ResolverContext, TemplateRenderer};
use crate::cache::TranslationCache;
use crate::config::Settings;
use crate::query::{DataSource, Query};
use crate::registry::{NamedRegistry, RegistryResult};

pub struct GenerationContext {
    queries: NamedRegistry<dyn Query>,
    data_sources: NamedRegistry<dyn DataSource>,
    resolver: ResolverContext,
    translations: TranslationCache,
    settings: Settings,
}

impl Default for GenerationContext {
    fn default() -> Self {
        GenerationContext::new(Settings::default())
    }
}

impl GenerationContext {
    pub fn new(settings: Settings) -> Self {
        GenerationContext {
            queries: NamedRegistry::new("query"),
            data_sources: NamedRegistry::new("data source"),
            resolver: ResolverContext::default(),
            translations: TranslationCache::new(),
            settings,
        }
    }

    pub fn register_query(
        &mut self,
        name: impl Into<String>,
        query: Arc<dyn Query>,
    ) -> RegistryResult<()> {
        self.queries.register(name, query)
    }

    pub fn register_data_source(
        &mut self,
        name: impl Into<String>,
        source: Arc<dyn DataSource>,
    ) -> RegistryResult<()> {
        self.data_sources.register(name, source)
    }

    pub fn set_renderer(&mut self, renderer: Arc<dyn TemplateRenderer>) {
        self.resolver.renderer = Some(renderer);
    }

    pub fn set_evaluator(&mut self, evaluator: Arc<dyn MathEvaluator>) {
        self.resolver.evaluator = Some(evaluator);
    }

    pub fn query(&self, name: &str) -> RegistryResult<Arc<dyn Query>> {
        self.queries.resolve(name)
    }

    pub fn data_source(&self, name: &str) -> RegistryResult<Arc<dyn DataSource>> {
        self.data_sources.resolve(name)
    }

    pub fn resolver(&self) -> &ResolverContext {
        &self.resolver
    }

    pub fn translations(&self) -> &TranslationCache {
        &self.translations
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
