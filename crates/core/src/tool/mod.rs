//! External tool adapter.
//!
//! The preprocessor compiler, minifiers, linter and test runner are
//! independently maintained binaries. This module owns the one way they are
//! all invoked: build an argument list, spawn the configured binary, apply
//! the timeout, and surface the tool's own output when it fails.

mod config;

pub use config::ToolsConfig;

use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Errors raised when driving an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool binary not found.
    #[error("tool not found at path: {path}")]
    NotFound { path: String },

    /// Tool exited with a failure status.
    #[error("{tool} failed (exit code {code:?}): {message}")]
    Failed {
        tool: String,
        code: Option<i32>,
        message: String,
    },

    /// Tool ran past the configured timeout.
    #[error("{tool} timed out after {timeout_secs} seconds")]
    Timeout { tool: String, timeout_secs: u64 },

    /// I/O error while spawning or collecting output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured output of a successful tool run.
#[derive(Debug)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs a tool to completion, capturing its output.
pub async fn run_tool(
    binary: &Path,
    args: &[String],
    timeout_secs: u64,
) -> Result<ToolOutput, ToolError> {
    let tool = tool_name(binary);
    debug!("Running {} {}", binary.display(), args.join(" "));

    // kill_on_drop so a timed-out tool does not outlive the step.
    let output = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match timeout(Duration::from_secs(timeout_secs), output).await {
        Ok(result) => result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound {
                    path: binary.display().to_string(),
                }
            } else {
                ToolError::Io(e)
            }
        })?,
        Err(_) => {
            return Err(ToolError::Timeout { tool, timeout_secs });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        // Linters report violations on stdout; compilers complain on stderr.
        // Keep whichever stream actually has the message.
        let message = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(ToolError::Failed {
            tool,
            code: output.status.code(),
            message,
        });
    }

    Ok(ToolOutput { stdout, stderr })
}

fn tool_name(binary: &Path) -> String {
    binary
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| binary.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sh() -> PathBuf {
        PathBuf::from("/bin/sh")
    }

    fn args(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_successful_run_captures_stdout() {
        let output = run_tool(&sh(), &args("echo compiled"), 10).await.unwrap();
        assert_eq!(output.stdout.trim(), "compiled");
    }

    #[tokio::test]
    async fn test_nonzero_exit_surfaces_stderr() {
        let err = run_tool(&sh(), &args("echo 'line 3: unused variable' 1>&2; exit 2"), 10)
            .await
            .unwrap_err();
        match err {
            ToolError::Failed { code, message, .. } => {
                assert_eq!(code, Some(2));
                assert!(message.contains("unused variable"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_falls_back_to_stdout() {
        let err = run_tool(&sh(), &args("echo 'lint: 2 problems'; exit 1"), 10)
            .await
            .unwrap_err();
        match err {
            ToolError::Failed { message, .. } => assert!(message.contains("2 problems")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let err = run_tool(Path::new("/nonexistent/lessc"), &[], 10)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_run() {
        let err = run_tool(&sh(), &args("sleep 30"), 1).await.unwrap_err();
        match err {
            ToolError::Timeout { timeout_secs, .. } => assert_eq!(timeout_secs, 1),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
