//! Python import collection.

use indexmap::{IndexMap, IndexSet};

/// Deduplicates `from <module> import <symbol>` requests.
///
/// Modules and the symbols within each module keep first-seen order, so the
/// rendered block is deterministic for a given schema.
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, IndexSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `symbol` from `module`. Repeats are ignored.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Number of distinct modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }

    /// One `from ... import ...` line per module, newline separated.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(module, symbols)| {
                let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
                format!("from {} import {}", module, symbols.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
