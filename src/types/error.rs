//! Error types for salt-lint-ls

/// Main error type for analyzer invocations
#[derive(Debug, thiserror::Error)]
pub enum SaltLintError {
    /// The salt-lint executable could not be found
    #[error("The salt-lint program was not found: {executable}")]
    ExecutableNotFound {
        /// Configured executable path
        executable: String,
    },

    /// The salt-lint process failed to start for a reason other than a
    /// missing executable
    #[error("Failed to run salt-lint using path {executable}: {source}")]
    Spawn {
        /// Configured executable path
        executable: String,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// The analyzer produced output that is not the expected JSON array
    #[error("Unparseable salt-lint output: {0}")]
    OutputParse(#[from] serde_json::Error),

    /// The analyzer did not finish within the configured timeout
    #[error("salt-lint did not finish within {secs}s")]
    Timeout {
        /// Configured timeout in seconds
        secs: u64,
    },

    /// IO error while talking to the analyzer process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SaltLintError {
    /// Whether this fault should stop all further invocations until the
    /// configuration is reloaded.
    pub fn is_sticky(&self) -> bool {
        matches!(
            self,
            SaltLintError::ExecutableNotFound { .. } | SaltLintError::Spawn { .. }
        )
    }
}

/// Result type alias for salt-lint-ls operations
pub type Result<T> = std::result::Result<T, SaltLintError>;
