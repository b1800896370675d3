//! Types for the task runner.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::step::{StepError, StepReport};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// No command registered under this name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A command references a step id that is not in the step table.
    #[error("unknown step '{step_id}' referenced by command '{command}'")]
    UnknownStep { command: String, step_id: String },

    /// A step failed; the remaining sequence was aborted.
    #[error("step '{step_id}' failed: {source}")]
    StepFailed {
        step_id: String,
        #[source]
        source: StepError,
    },
}

/// A named ordered sequence of step ids.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: String,
    pub steps: Vec<String>,
    /// Whether the command enters watch mode after its initial run.
    pub watch: bool,
}

impl CommandSpec {
    pub fn new<I, S>(name: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            steps: steps.into_iter().map(Into::into).collect(),
            watch: false,
        }
    }

    pub fn with_watch(mut self) -> Self {
        self.watch = true;
        self
    }
}

/// Outcome of one full command run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub command: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// Total files touched across all steps.
    pub fn total_files(&self) -> usize {
        self.steps.iter().map(|s| s.files).sum()
    }
}
