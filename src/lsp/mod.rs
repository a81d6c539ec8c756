//! Language Server Protocol implementation for salt-lint-ls
//!
//! This module provides the LSP surface of the server:
//! - Diagnostics published on open/edit/save, per the trigger policy
//! - Quick fixes linking each finding to its rule documentation
//! - `salt-lint.runLint` and `salt-lint.openRuleDoc` commands
//! - Live configuration reload via `workspace/didChangeConfiguration`
//!
//! # Example
//!
//! ```ignore
//! # use salt_lint_ls::lsp::SaltLintLanguageServer;
//! # use tower_lsp::{LspService, Server};
//! # async fn run() {
//! let stdin = tokio::io::stdin();
//! let stdout = tokio::io::stdout();
//!
//! let (service, socket) = LspService::new(SaltLintLanguageServer::new);
//!
//! Server::new(stdin, stdout, socket).serve(service).await;
//! # }
//! ```

mod backend;
mod code_actions;
mod diagnostics;
mod document;
mod store;

pub use backend::SaltLintLanguageServer;
pub use code_actions::{CMD_OPEN_RULE_DOC, CMD_RUN_LINT};
pub use diagnostics::{item_to_diagnostic, items_to_diagnostics};
pub use document::{Document, DocumentManager};
pub use store::DiagnosticsStore;
