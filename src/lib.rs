//! # salt-lint-ls
//!
//! A language server for [salt-lint](https://github.com/warpnet/salt-lint),
//! the checker for SaltStack state files.
//!
//! The server itself does no linting. For each open `sls` document it
//! decides when the external analyzer should run, feeds it the current
//! document text over stdin, parses its `--json` output, and keeps the
//! published diagnostics for that document in sync. The pipeline is:
//!
//! - [`throttle`] — per-document coalescing debounce: at most one
//!   analyzer process in flight per document, bursts of edits collapse
//!   into a single run over the newest content
//! - [`analyzer`] — subprocess invocation and output collection
//! - [`lsp`] — the `tower-lsp` backend, diagnostic mapping and
//!   per-document diagnostic state
//!
//! ## Configuration
//!
//! Read from `initializationOptions` and
//! `workspace/didChangeConfiguration` (section `salt-lint`):
//!
//! ```json
//! {
//!   "salt-lint": {
//!     "enable": true,
//!     "run": "onType",
//!     "executablePath": "salt-lint",
//!     "timeoutSeconds": 30
//!   }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod lsp;
pub mod throttle;
pub mod types;

// Re-export main types
pub use lsp::SaltLintLanguageServer;
pub use types::{Result, RunTrigger, SaltLintError, SaltLintItem, Settings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
