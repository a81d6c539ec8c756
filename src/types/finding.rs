//! The wire format of salt-lint's `--json` output

use serde::Deserialize;

/// One finding as reported by `salt-lint --json`.
///
/// The analyzer emits a JSON array of these records. Entries can be
/// `null`, so parsing goes through `Vec<Option<SaltLintItem>>` and the
/// holes are skipped during diagnostic mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaltLintItem {
    /// Rule identifier (e.g. "210")
    pub id: String,

    /// Human-readable description of the violation
    pub message: String,

    /// File name the analyzer believes it linted (stdin documents
    /// report a placeholder)
    pub filename: String,

    /// 1-based line number of the violation
    pub linenumber: u32,

    /// Raw text of the offending source line
    pub line: String,

    /// Severity string as reported by the analyzer. Currently unused
    /// when building diagnostics; every finding surfaces as a warning.
    pub severity: String,
}
