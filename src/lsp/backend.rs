//! LSP backend implementation
//!
//! Wires document lifecycle events into the throttled lint scheduler,
//! runs the external analyzer, and publishes the resulting diagnostics.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use super::code_actions::{self, CMD_OPEN_RULE_DOC, CMD_RUN_LINT};
use super::diagnostics;
use super::document::DocumentManager;
use super::store::DiagnosticsStore;
use crate::analyzer;
use crate::throttle::ThrottledInvoker;
use crate::types::{RunTrigger, Settings};

/// The salt-lint Language Server
pub struct SaltLintLanguageServer {
    client: Client,
    documents: Arc<DocumentManager>,
    store: Arc<DiagnosticsStore>,
    invoker: Arc<ThrottledInvoker>,
    settings: Arc<RwLock<Settings>>,
    workspace_root: Arc<RwLock<Option<PathBuf>>>,
    /// Sticky fault: once the executable fails to start, no further
    /// invocations are attempted until the configuration is reloaded.
    /// The user is notified exactly once per cycle.
    executable_not_found: Arc<AtomicBool>,
}

impl SaltLintLanguageServer {
    /// Create a new language server instance
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(DocumentManager::new()),
            store: Arc::new(DiagnosticsStore::new()),
            invoker: Arc::new(ThrottledInvoker::new()),
            settings: Arc::new(RwLock::new(Settings::default())),
            workspace_root: Arc::new(RwLock::new(None)),
            executable_not_found: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Diagnostics currently recorded for a document
    pub fn current_diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        self.store.get(uri)
    }

    async fn workspace_root_string(&self) -> String {
        self.workspace_root
            .read()
            .await
            .as_ref()
            .and_then(|p| p.to_str())
            .unwrap_or("")
            .to_string()
    }

    /// Working directory for one analyzer invocation: the directory of
    /// the document's backing file, or the workspace root (or the
    /// server's cwd) for non-file documents.
    async fn working_dir(&self, uri: &Url) -> PathBuf {
        if let Ok(path) = uri.to_file_path()
            && let Some(parent) = path.parent()
        {
            return parent.to_path_buf();
        }
        self.workspace_root
            .read()
            .await
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Entry point for every lint request, whatever the event source.
    /// Gated by the sticky fault and the enable switch; otherwise hands
    /// the work to the per-document scheduler.
    async fn trigger_lint(&self, uri: Url) {
        if self.executable_not_found.load(Ordering::SeqCst) {
            return;
        }

        let settings = self.settings.read().await.clone();
        if !settings.enabled {
            self.store.clear(&uri);
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
            return;
        }

        let server = self.clone();
        let job_uri = uri.clone();
        self.invoker.trigger(
            uri,
            settings.trigger.delay(),
            Box::pin(async move {
                server.run_lint(job_uri).await;
            }),
        );
    }

    /// One scheduled invocation: snapshot the document, run the
    /// analyzer, replace the document's diagnostics on success. Faults
    /// never propagate out of here so the scheduler can always promote
    /// pending work.
    async fn run_lint(&self, uri: Url) {
        let Some(content) = self.documents.get(&uri).map(|doc| doc.content.clone()) else {
            return;
        };
        let settings = self.settings.read().await.clone();
        let cwd = self.working_dir(&uri).await;

        let outcome = analyzer::run(
            &settings.executable_path,
            &cwd,
            &content,
            Duration::from_secs(settings.timeout_secs),
        )
        .await;

        match outcome {
            Ok(items) => {
                // The document may have closed while the analyzer ran;
                // its state is gone and must stay gone
                if !self.documents.contains(&uri) {
                    return;
                }
                let diagnostics = diagnostics::items_to_diagnostics(&items);
                self.store.set(uri.clone(), diagnostics.clone());
                self.client.publish_diagnostics(uri, diagnostics, None).await;
            }
            Err(err) if err.is_sticky() => {
                if !self.executable_not_found.swap(true, Ordering::SeqCst) {
                    self.client
                        .show_message(MessageType::INFO, err.to_string())
                        .await;
                }
            }
            Err(err) => {
                // Parse faults and timeouts fail closed: log, keep the
                // previous diagnostics untouched
                self.client
                    .log_message(MessageType::WARNING, format!("salt-lint failed: {err}"))
                    .await;
            }
        }
    }

    /// Replace the settings and re-evaluate the world, per
    /// `workspace/didChangeConfiguration`
    async fn reload_configuration(&self, value: Option<&serde_json::Value>) {
        let root = self.workspace_root_string().await;
        *self.settings.write().await = Settings::from_value(value, &root);

        self.invoker.clear();
        self.executable_not_found.store(false, Ordering::SeqCst);
        for uri in self.store.all_uris() {
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
        }
        self.store.clear_all();

        for uri in self.documents.all_uris() {
            self.trigger_lint(uri).await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for SaltLintLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(root) = params.root_uri.as_ref().and_then(|u| u.to_file_path().ok()) {
            *self.workspace_root.write().await = Some(root);
        }

        let root = self.workspace_root_string().await;
        *self.settings.write().await =
            Settings::from_value(params.initialization_options.as_ref(), &root);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![CMD_RUN_LINT.to_string(), CMD_OPEN_RULE_DOC.to_string()],
                    ..Default::default()
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "salt-lint-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "salt-lint-ls initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.insert(
            uri.clone(),
            params.text_document.text,
            params.text_document.version,
        );

        // Opening always lints, whatever the trigger policy
        self.trigger_lint(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // Full sync: the last change carries the whole document
        if let Some(change) = params.content_changes.into_iter().next_back() {
            self.documents
                .update(&uri, change.text, params.text_document.version);
        }

        let trigger = self.settings.read().await.trigger;
        if trigger == RunTrigger::OnType {
            self.trigger_lint(uri).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let trigger = self.settings.read().await.trigger;
        if trigger == RunTrigger::OnSave {
            self.trigger_lint(params.text_document.uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        self.documents.remove(&uri);
        self.invoker.remove(&uri);
        self.store.clear(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.reload_configuration(Some(&params.settings)).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<serde_json::Value>> {
        match params.command.as_str() {
            CMD_RUN_LINT => {
                let uri = params
                    .arguments
                    .first()
                    .and_then(|v| v.as_str())
                    .and_then(|s| Url::parse(s).ok());
                if let Some(uri) = uri {
                    self.trigger_lint(uri).await;
                }
            }
            CMD_OPEN_RULE_DOC => {
                let url = params
                    .arguments
                    .first()
                    .and_then(|v| v.as_str())
                    .and_then(|s| Url::parse(s).ok());
                if let Some(url) = url {
                    let _ = self
                        .client
                        .show_document(ShowDocumentParams {
                            uri: url,
                            external: Some(true),
                            take_focus: None,
                            selection: None,
                        })
                        .await;
                }
            }
            other => {
                self.client
                    .log_message(MessageType::WARNING, format!("unknown command: {other}"))
                    .await;
            }
        }
        Ok(None)
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let actions = code_actions::rule_doc_actions(&params.context.diagnostics);

        if actions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(actions))
        }
    }
}

// We need Clone so scheduled jobs can capture the server
impl Clone for SaltLintLanguageServer {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            documents: Arc::clone(&self.documents),
            store: Arc::clone(&self.store),
            invoker: Arc::clone(&self.invoker),
            settings: Arc::clone(&self.settings),
            workspace_root: Arc::clone(&self.workspace_root),
            executable_not_found: Arc::clone(&self.executable_not_found),
        }
    }
}
