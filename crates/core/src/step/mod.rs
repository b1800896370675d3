//! Step definitions: the immutable units a composite command sequences.

mod context;
mod types;

pub use context::StepContext;
pub use types::{Step, StepAction, StepKind, StepReport};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while executing a single step.
#[derive(Debug, Error)]
pub enum StepError {
    /// External tool error.
    #[error("tool error: {0}")]
    Tool(#[from] crate::tool::ToolError),

    /// Remote store error.
    #[error("remote error: {0}")]
    Remote(#[from] crate::remote::RemoteError),

    /// Template could not be read or rendered.
    #[error("template error in {path}: {reason}")]
    Template { path: PathBuf, reason: String },

    /// Template data file could not be read or parsed.
    #[error("template data error in {path}: {reason}")]
    Data { path: PathBuf, reason: String },

    /// Archive could not be written.
    #[error("archive error: {reason}")]
    Archive { reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
