//! Lint step: run the external linter over matching scripts.

use std::path::Path;

use crate::pattern::{self, PatternSet};
use crate::step::StepError;
use crate::tool::{self, ToolsConfig};

/// Lints files matching `patterns` under `dir`. A lint violation is whatever
/// makes the linter exit nonzero; its own report becomes the error message.
pub(super) async fn run(
    dir: &Path,
    patterns: &PatternSet,
    tools: &ToolsConfig,
) -> Result<(usize, u64), StepError> {
    let files = pattern::collect_files(dir, patterns).await?;
    if files.is_empty() {
        return Ok((0, 0));
    }

    let mut args = tools.linter_args.clone();
    args.extend(files.iter().map(|p| p.display().to_string()));
    tool::run_tool(&tools.linter, &args, tools.timeout_secs).await?;

    Ok((files.len(), 0))
}
