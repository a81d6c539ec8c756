//! Open-document tracking for the language server

use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use std::sync::Arc;
use tower_lsp::lsp_types::Url;

/// One open document, synced in full on every change
#[derive(Debug, Clone)]
pub struct Document {
    /// Document URI
    pub uri: Url,
    /// Current document content
    pub content: String,
    /// Document version (incremented by the client on each change)
    pub version: i32,
}

impl Document {
    /// Create a new document
    pub fn new(uri: Url, content: String, version: i32) -> Self {
        Self {
            uri,
            content,
            version,
        }
    }
}

/// Manages all open documents in the server
pub struct DocumentManager {
    documents: Arc<DashMap<Url, Document>>,
}

impl DocumentManager {
    /// Create a new document manager
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
        }
    }

    /// Insert or overwrite a document
    pub fn insert(&self, uri: Url, content: String, version: i32) {
        let doc = Document::new(uri.clone(), content, version);
        self.documents.insert(uri, doc);
    }

    /// Get a document by URI (returns a zero-copy Ref guard)
    pub fn get(&self, uri: &Url) -> Option<Ref<'_, Url, Document>> {
        self.documents.get(uri)
    }

    /// Replace a document's content
    pub fn update(&self, uri: &Url, content: String, version: i32) {
        if let Some(mut entry) = self.documents.get_mut(uri) {
            entry.content = content;
            entry.version = version;
        }
    }

    /// Remove a document
    pub fn remove(&self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }

    /// Check if a document is open
    pub fn contains(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    /// Get all open document URIs
    pub fn all_uris(&self) -> Vec<Url> {
        self.documents
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let manager = DocumentManager::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();

        manager.insert(uri.clone(), "install_vim:\n".to_string(), 1);

        let doc = manager.get(&uri);
        assert!(doc.is_some());
        assert_eq!(doc.unwrap().content, "install_vim:\n");
    }

    #[test]
    fn test_update() {
        let manager = DocumentManager::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();

        manager.insert(uri.clone(), "install_vim:\n".to_string(), 1);
        manager.update(&uri, "install_emacs:\n".to_string(), 2);

        let doc = manager.get(&uri).unwrap();
        assert_eq!(doc.content, "install_emacs:\n");
        assert_eq!(doc.version, 2);
    }

    #[test]
    fn test_update_of_unknown_document_is_a_no_op() {
        let manager = DocumentManager::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();

        manager.update(&uri, "content".to_string(), 1);
        assert!(!manager.contains(&uri));
    }

    #[test]
    fn test_remove() {
        let manager = DocumentManager::new();
        let uri = Url::parse("file:///srv/salt/init.sls").unwrap();

        manager.insert(uri.clone(), "x".to_string(), 1);
        assert!(manager.contains(&uri));

        let removed = manager.remove(&uri);
        assert!(removed.is_some());
        assert!(!manager.contains(&uri));
    }

    #[test]
    fn test_all_uris() {
        let manager = DocumentManager::new();
        let uri1 = Url::parse("file:///srv/salt/top.sls").unwrap();
        let uri2 = Url::parse("file:///srv/salt/vim/init.sls").unwrap();

        manager.insert(uri1.clone(), "a".to_string(), 1);
        manager.insert(uri2.clone(), "b".to_string(), 1);

        let uris = manager.all_uris();
        assert_eq!(uris.len(), 2);
        assert!(uris.contains(&uri1));
        assert!(uris.contains(&uri2));
    }
}
