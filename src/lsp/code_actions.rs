//! Code actions linking diagnostics to rule documentation

use super::diagnostics::SOURCE;

use tower_lsp::lsp_types::{
    CodeAction, CodeActionKind, CodeActionOrCommand, Command, Diagnostic, NumberOrString,
};

/// Command identifier for forcing a lint of one document
pub const CMD_RUN_LINT: &str = "salt-lint.runLint";

/// Command identifier for opening a rule's documentation page
pub const CMD_OPEN_RULE_DOC: &str = "salt-lint.openRuleDoc";

/// Documentation page for a salt-lint rule
pub fn rule_doc_url(rule_id: &str) -> String {
    format!("https://github.com/warpnet/salt-lint/wiki/{rule_id}")
}

/// Build "show documentation" quick fixes for the salt-lint diagnostics
/// the client is asking about.
pub fn rule_doc_actions(diagnostics: &[Diagnostic]) -> Vec<CodeActionOrCommand> {
    let mut actions = Vec::new();

    for diagnostic in diagnostics {
        if diagnostic.source.as_deref() != Some(SOURCE) {
            continue;
        }
        let Some(NumberOrString::String(rule_id)) = &diagnostic.code else {
            continue;
        };

        let title = format!("Show salt-lint documentation for {rule_id}");
        let action = CodeAction {
            title: title.clone(),
            kind: Some(CodeActionKind::QUICKFIX),
            diagnostics: Some(vec![diagnostic.clone()]),
            command: Some(Command {
                title,
                command: CMD_OPEN_RULE_DOC.to_string(),
                arguments: Some(vec![serde_json::Value::String(rule_doc_url(rule_id))]),
            }),
            ..Default::default()
        };
        actions.push(CodeActionOrCommand::CodeAction(action));
    }

    actions
}
