//! Server settings and the lint trigger policy

use std::time::Duration;

/// Debounce window applied between keystrokes under [`RunTrigger::OnType`]
const ON_TYPE_DELAY_MS: u64 = 250;

/// Default subprocess timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which document events feed the lint scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTrigger {
    /// Lint when a document is saved
    OnSave,
    /// Lint as the document changes, debounced
    OnType,
    /// Lint only on explicit command
    Manual,
}

impl RunTrigger {
    /// Parse a trigger from its configuration string. Unrecognized
    /// values mean manual-only linting.
    pub fn from_config(value: &str) -> Self {
        match value {
            "onSave" => RunTrigger::OnSave,
            "onType" => RunTrigger::OnType,
            _ => RunTrigger::Manual,
        }
    }

    /// Debounce delay for this trigger policy
    pub fn delay(self) -> Duration {
        match self {
            RunTrigger::OnType => Duration::from_millis(ON_TYPE_DELAY_MS),
            RunTrigger::OnSave | RunTrigger::Manual => Duration::ZERO,
        }
    }
}

/// Process-wide linting configuration, read at startup and replaced on
/// every `workspace/didChangeConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Whether linting is enabled at all
    pub enabled: bool,
    /// Event policy feeding the scheduler
    pub trigger: RunTrigger,
    /// Path to the salt-lint executable
    pub executable_path: String,
    /// Subprocess timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger: RunTrigger::OnType,
            executable_path: "salt-lint".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Build settings from the `salt-lint` configuration section.
    ///
    /// The payload is whatever JSON the client sent for
    /// `initializationOptions` or `didChangeConfiguration`; a nested
    /// `salt-lint` object is unwrapped if present. Missing or malformed
    /// values fall back to their defaults. `${workspaceRoot}` in the
    /// executable path is replaced with `workspace_root`.
    pub fn from_value(value: Option<&serde_json::Value>, workspace_root: &str) -> Self {
        let defaults = Settings::default();
        let Some(value) = value else {
            return defaults;
        };
        let section = value.get("salt-lint").unwrap_or(value);

        let enabled = section
            .get("enable")
            .and_then(|v| v.as_bool())
            .unwrap_or(defaults.enabled);
        let trigger = section
            .get("run")
            .and_then(|v| v.as_str())
            .map(RunTrigger::from_config)
            .unwrap_or(defaults.trigger);
        let executable_path = section
            .get("executablePath")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(&defaults.executable_path)
            .replace("${workspaceRoot}", workspace_root);
        let timeout_secs = section
            .get("timeoutSeconds")
            .and_then(|v| v.as_u64())
            .filter(|&secs| secs > 0)
            .unwrap_or(defaults.timeout_secs);

        Self {
            enabled,
            trigger,
            executable_path,
            timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_value(None, "/workspace");
        assert_eq!(settings, Settings::default());
        assert!(settings.enabled);
        assert_eq!(settings.trigger, RunTrigger::OnType);
        assert_eq!(settings.executable_path, "salt-lint");
    }

    #[test]
    fn test_full_section() {
        let value = json!({
            "salt-lint": {
                "enable": false,
                "run": "onSave",
                "executablePath": "/opt/salt-lint",
                "timeoutSeconds": 5
            }
        });
        let settings = Settings::from_value(Some(&value), "/workspace");
        assert!(!settings.enabled);
        assert_eq!(settings.trigger, RunTrigger::OnSave);
        assert_eq!(settings.executable_path, "/opt/salt-lint");
        assert_eq!(settings.timeout_secs, 5);
    }

    #[test]
    fn test_unwrapped_section() {
        let value = json!({ "run": "onSave" });
        let settings = Settings::from_value(Some(&value), "/workspace");
        assert_eq!(settings.trigger, RunTrigger::OnSave);
    }

    #[test]
    fn test_unknown_trigger_means_manual() {
        assert_eq!(RunTrigger::from_config("onFocus"), RunTrigger::Manual);
        assert_eq!(RunTrigger::from_config(""), RunTrigger::Manual);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let value = json!({
            "salt-lint": {
                "enable": "yes",
                "run": 42,
                "executablePath": "",
                "timeoutSeconds": 0
            }
        });
        let settings = Settings::from_value(Some(&value), "/workspace");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_workspace_root_substitution() {
        let value = json!({
            "salt-lint": { "executablePath": "${workspaceRoot}/bin/salt-lint" }
        });
        let settings = Settings::from_value(Some(&value), "/home/user/states");
        assert_eq!(settings.executable_path, "/home/user/states/bin/salt-lint");
    }

    #[test]
    fn test_delays() {
        assert_eq!(RunTrigger::OnType.delay(), Duration::from_millis(250));
        assert_eq!(RunTrigger::OnSave.delay(), Duration::ZERO);
        assert_eq!(RunTrigger::Manual.delay(), Duration::ZERO);
    }
}
