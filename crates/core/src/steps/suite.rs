//! Test step: run the external browser test suite runner.

use std::path::Path;

use crate::pattern::{self, PatternSet};
use crate::step::StepError;
use crate::tool::{self, ToolsConfig};

/// Runs the suite runner over test pages matching `patterns` under `dir`.
pub(super) async fn run(
    dir: &Path,
    patterns: &PatternSet,
    tools: &ToolsConfig,
) -> Result<(usize, u64), StepError> {
    let files = pattern::collect_files(dir, patterns).await?;
    if files.is_empty() {
        return Ok((0, 0));
    }

    let mut args = tools.test_runner_args.clone();
    args.extend(files.iter().map(|p| p.display().to_string()));
    tool::run_tool(&tools.test_runner, &args, tools.timeout_secs).await?;

    Ok((files.len(), 0))
}
