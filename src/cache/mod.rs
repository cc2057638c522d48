//! Process-scoped phrase translation cache.
//!
//! Titles, captions, and lookup labels pass through a translation
//! dictionary before display. The cache is populated once per process (or
//! per locale switch) and carried explicitly on the generation context
//! rather than living in a static.
//!
//! Lifecycle: `populate` once, `translate` many, `clear_cache` to reset.

use dashmap::DashMap;
use inflector::Inflector;

/// Phrase -> display-text dictionary.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: DashMap<String, String>,
}

impl TranslationCache {
    pub fn new() -> Self {
        TranslationCache {
            entries: DashMap::new(),
        }
    }

    /// Load a batch of translations. Later entries win over earlier ones.
    pub fn populate<I, K, V>(&self, translations: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (phrase, text) in translations {
            self.entries.insert(phrase.into(), text.into());
        }
    }

    /// Translate a phrase, falling back to a humanized form of the phrase
    /// itself when no translation is loaded.
    pub fn translate(&self, phrase: &str) -> String {
        match self.entries.get(phrase) {
            Some(text) => text.clone(),
            None => phrase.to_sentence_case(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached translation.
    pub fn clear_cache(&self) {
        self.entries.clear();
    }
}
