//! Per-document diagnostic state
//!
//! The authoritative copy of what has been published for each document.
//! An entry is fully replaced on every successful lint, removed when
//! the document closes or linting is disabled, and the whole store is
//! dropped on configuration reload before documents are re-evaluated.

use dashmap::DashMap;
use std::sync::Arc;
use tower_lsp::lsp_types::{Diagnostic, Url};

/// Current diagnostics for every annotated document
pub struct DiagnosticsStore {
    entries: Arc<DashMap<Url, Vec<Diagnostic>>>,
}

impl DiagnosticsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Replace the diagnostic set for one document
    pub fn set(&self, uri: Url, diagnostics: Vec<Diagnostic>) {
        self.entries.insert(uri, diagnostics);
    }

    /// Current diagnostics for one document (empty if none recorded)
    pub fn get(&self, uri: &Url) -> Vec<Diagnostic> {
        self.entries
            .get(uri)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Drop one document's diagnostics
    pub fn clear(&self, uri: &Url) {
        self.entries.remove(uri);
    }

    /// Drop everything
    pub fn clear_all(&self) {
        self.entries.clear();
    }

    /// URIs that currently have recorded diagnostics
    pub fn all_uris(&self) -> Vec<Url> {
        self.entries
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for DiagnosticsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::{Position, Range};

    fn diagnostic(message: &str) -> Diagnostic {
        Diagnostic {
            range: Range {
                start: Position::new(0, 0),
                end: Position::new(0, 4),
            },
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_replaces_wholesale() {
        let store = DiagnosticsStore::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();

        store.set(uri.clone(), vec![diagnostic("a"), diagnostic("b")]);
        store.set(uri.clone(), vec![diagnostic("c")]);

        let current = store.get(&uri);
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].message, "c");
    }

    #[test]
    fn test_get_unknown_is_empty() {
        let store = DiagnosticsStore::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();
        assert!(store.get(&uri).is_empty());
    }

    #[test]
    fn test_clear_one_document() {
        let store = DiagnosticsStore::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();
        let other = Url::parse("file:///srv/salt/top.sls").unwrap();

        store.set(uri.clone(), vec![diagnostic("a")]);
        store.set(other.clone(), vec![diagnostic("b")]);
        store.clear(&uri);

        assert!(store.get(&uri).is_empty());
        assert_eq!(store.get(&other).len(), 1);
    }

    #[test]
    fn test_clear_all() {
        let store = DiagnosticsStore::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();

        store.set(uri.clone(), vec![diagnostic("a")]);
        store.clear_all();

        assert!(store.get(&uri).is_empty());
        assert!(store.all_uris().is_empty());
    }
}
