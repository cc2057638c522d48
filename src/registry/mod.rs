//! Named registries for pluggable collaborators.
//!
//! Queries, data sources, and component generators are registered by name
//! (or type tag) at process start and resolved through these registries at
//! generation time. The core only ever sees the abstract contracts.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised by registry lookups and registrations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("no {kind} registered under '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("a {kind} is already registered under '{name}'")]
    Duplicate { kind: &'static str, name: String },
}

/// A name-keyed registry of shared collaborator instances.
#[derive(Clone)]
pub struct NamedRegistry<T: ?Sized> {
    kind: &'static str,
    entries: HashMap<String, Arc<T>>,
}

impl<T: ?Sized> NamedRegistry<T> {
    /// `kind` names what the registry holds, for error messages.
    pub fn new(kind: &'static str) -> Self {
        NamedRegistry {
            kind,
            entries: HashMap::new(),
        }
    }

    /// Register an entry. Names are unique; a collision is an error, never
    /// a silent replacement.
    pub fn register(&mut self, name: impl Into<String>, entry: Arc<T>) -> RegistryResult<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(RegistryError::Duplicate {
                kind: self.kind,
                name,
            });
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> RegistryResult<Arc<T>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
