//! Convert salt-lint findings to LSP diagnostics

use crate::types::SaltLintItem;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

/// Diagnostic source tag attached to every published diagnostic
pub const SOURCE: &str = "salt-lint";

/// Convert one finding to an LSP Diagnostic.
///
/// The range starts at the first non-whitespace character of the
/// reported line and runs to its end. Severity is always a warning;
/// salt-lint's own severity field is not consulted.
pub fn item_to_diagnostic(item: &SaltLintItem) -> Diagnostic {
    Diagnostic {
        range: calculate_range(item),
        severity: Some(DiagnosticSeverity::WARNING),
        code: Some(NumberOrString::String(item.id.clone())),
        source: Some(SOURCE.to_string()),
        message: item.message.clone(),
        ..Default::default()
    }
}

/// Convert one invocation's parsed output, skipping `null` holes
pub fn items_to_diagnostics(items: &[Option<SaltLintItem>]) -> Vec<Diagnostic> {
    items
        .iter()
        .flatten()
        .map(item_to_diagnostic)
        .collect()
}

fn calculate_range(item: &SaltLintItem) -> Range {
    let line = item.linenumber.saturating_sub(1);
    let body_start = item
        .line
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(item.line.len());

    Range {
        start: Position {
            line,
            character: body_start as u32,
        },
        end: Position {
            line,
            character: item.line.len() as u32,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_item(linenumber: u32, line: &str) -> SaltLintItem {
        SaltLintItem {
            id: "210".to_string(),
            message: "Numbers that start with `0` should always be encapsulated in quotation marks"
                .to_string(),
            filename: "init.sls".to_string(),
            linenumber,
            line: line.to_string(),
            severity: "HIGH".to_string(),
        }
    }

    #[test]
    fn test_range_skips_leading_whitespace() {
        let item = create_test_item(3, "  key: value");
        let diagnostic = item_to_diagnostic(&item);

        assert_eq!(diagnostic.range.start, Position::new(2, 2));
        assert_eq!(diagnostic.range.end, Position::new(2, 12));
    }

    #[test]
    fn test_range_of_blank_line_is_empty_at_line_end() {
        let item = create_test_item(1, "    ");
        let diagnostic = item_to_diagnostic(&item);

        assert_eq!(diagnostic.range.start, Position::new(0, 4));
        assert_eq!(diagnostic.range.end, Position::new(0, 4));
    }

    #[test]
    fn test_severity_is_always_warning() {
        let mut item = create_test_item(1, "key: value");
        item.severity = "CRITICAL".to_string();

        let diagnostic = item_to_diagnostic(&item);
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::WARNING));
    }

    #[test]
    fn test_source_and_code() {
        let diagnostic = item_to_diagnostic(&create_test_item(1, "x"));

        assert_eq!(diagnostic.source, Some("salt-lint".to_string()));
        assert_eq!(
            diagnostic.code,
            Some(NumberOrString::String("210".to_string()))
        );
    }

    #[test]
    fn test_null_holes_are_skipped() {
        let items = vec![None, Some(create_test_item(2, " a")), None];
        let diagnostics = items_to_diagnostics(&items);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start, Position::new(1, 1));
    }
}
