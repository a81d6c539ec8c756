//! Invocation of the external salt-lint process
//!
//! One invocation = one short-lived subprocess: spawn the configured
//! executable with `--json`, stream the document text to its stdin,
//! close the stream, and buffer stdout to EOF. The exit status carries
//! no signal (salt-lint exits nonzero whenever it has findings), so
//! only the output stream is interpreted.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::types::{Result, SaltLintError, SaltLintItem};

/// Fixed flag requesting machine-readable output
const JSON_FLAG: &str = "--json";

/// Run the analyzer over `content` and return the parsed findings.
///
/// The returned vector preserves `null` holes from the analyzer's
/// output array; diagnostic mapping skips them.
///
/// A child still running after `timeout` is killed and reported as
/// [`SaltLintError::Timeout`].
pub async fn run(
    executable: &str,
    cwd: &Path,
    content: &str,
    timeout: Duration,
) -> Result<Vec<Option<SaltLintItem>>> {
    let mut child = Command::new(executable)
        .arg(JSON_FLAG)
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => SaltLintError::ExecutableNotFound {
                executable: executable.to_string(),
            },
            _ => SaltLintError::Spawn {
                executable: executable.to_string(),
                source,
            },
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| SaltLintError::Io(std::io::Error::other("child stdin not captured")))?;
    stdin.write_all(content.as_bytes()).await?;
    // Closing stdin signals end-of-document to the analyzer
    drop(stdin);

    let secs = timeout.as_secs();
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(collected) => collected?,
        // Dropping the in-flight wait kills the child (kill_on_drop)
        Err(_) => return Err(SaltLintError::Timeout { secs }),
    };

    parse_output(&output.stdout)
}

/// Parse the buffered stdout of one invocation. Empty output means zero
/// findings; non-empty output must be the expected JSON array.
fn parse_output(raw: &[u8]) -> Result<Vec<Option<SaltLintItem>>> {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}
