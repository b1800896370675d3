//! Step and step-outcome types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::pattern::PatternSet;

/// The operation kinds a step can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    Clean,
    Copy,
    TemplateRender,
    StyleCompile,
    MinifyScript,
    MinifyStyle,
    Fingerprint,
    Archive,
    RemoteSync,
    Lint,
    Test,
}

impl StepKind {
    /// Stable name used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Clean => "clean",
            StepKind::Copy => "copy",
            StepKind::TemplateRender => "template-render",
            StepKind::StyleCompile => "style-compile",
            StepKind::MinifyScript => "minify-script",
            StepKind::MinifyStyle => "minify-style",
            StepKind::Fingerprint => "fingerprint",
            StepKind::Archive => "archive",
            StepKind::RemoteSync => "remote-sync",
            StepKind::Lint => "lint",
            StepKind::Test => "test",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named file-processing or network operation.
///
/// Steps are built once at startup and never mutated; all paths are resolved
/// against the project root before construction.
pub struct Step {
    pub id: String,
    pub action: StepAction,
}

impl Step {
    pub fn new(id: impl Into<String>, action: StepAction) -> Self {
        Self {
            id: id.into(),
            action,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.action.kind()
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("kind", &self.kind().as_str())
            .finish()
    }
}

/// Tagged action variants over the operation kinds, each carrying its input
/// patterns, output location and operation-specific options.
pub enum StepAction {
    /// Delete files under `dir` selected by `patterns`; matched directories
    /// are removed recursively. Ensures `dir` itself exists afterwards.
    Clean { dir: PathBuf, patterns: PatternSet },

    /// Copy files matching `patterns` from `from` into `to`, preserving
    /// relative paths.
    Copy {
        from: PathBuf,
        to: PathBuf,
        patterns: PatternSet,
    },

    /// Render template files matching `patterns` under `from` with the JSON
    /// value in `data_file`, writing `<stem>.html` into `to`.
    TemplateRender {
        from: PathBuf,
        to: PathBuf,
        patterns: PatternSet,
        data_file: PathBuf,
    },

    /// Compile each stylesheet matching `patterns` under `from` into
    /// `<stem>.css` in `to` via the external preprocessor.
    StyleCompile {
        from: PathBuf,
        to: PathBuf,
        patterns: PatternSet,
    },

    /// Minify all scripts matching `patterns` under `from` into `output`.
    MinifyScripts {
        from: PathBuf,
        output: PathBuf,
        patterns: PatternSet,
    },

    /// Minify all stylesheets matching `patterns` under `from` into `output`.
    MinifyStyles {
        from: PathBuf,
        output: PathBuf,
        patterns: PatternSet,
    },

    /// Rename files matching `patterns` under `dir` with a content-derived
    /// suffix and rewrite references in files matching `rewrite`.
    Fingerprint {
        dir: PathBuf,
        patterns: PatternSet,
        rewrite: PatternSet,
    },

    /// Zip the contents of `dir` into `output`.
    Archive { dir: PathBuf, output: PathBuf },

    /// Differential upload of `dir` to the configured remote store.
    RemoteSync { dir: PathBuf },

    /// Run the external linter over files matching `patterns` under `dir`.
    Lint { dir: PathBuf, patterns: PatternSet },

    /// Run the external test runner over files matching `patterns` under
    /// `dir`.
    RunSuite { dir: PathBuf, patterns: PatternSet },
}

impl StepAction {
    pub fn kind(&self) -> StepKind {
        match self {
            StepAction::Clean { .. } => StepKind::Clean,
            StepAction::Copy { .. } => StepKind::Copy,
            StepAction::TemplateRender { .. } => StepKind::TemplateRender,
            StepAction::StyleCompile { .. } => StepKind::StyleCompile,
            StepAction::MinifyScripts { .. } => StepKind::MinifyScript,
            StepAction::MinifyStyles { .. } => StepKind::MinifyStyle,
            StepAction::Fingerprint { .. } => StepKind::Fingerprint,
            StepAction::Archive { .. } => StepKind::Archive,
            StepAction::RemoteSync { .. } => StepKind::RemoteSync,
            StepAction::Lint { .. } => StepKind::Lint,
            StepAction::RunSuite { .. } => StepKind::Test,
        }
    }
}

/// Outcome of one executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step_id: String,
    pub kind: StepKind,
    /// Files the step touched (deleted, copied, rendered, uploaded...).
    pub files: usize,
    /// Bytes written or transferred, where the step tracks them.
    pub bytes: u64,
    pub duration_ms: u64,
}
