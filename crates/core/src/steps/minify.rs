//! Minify steps: compress scripts and styles via external minifiers.

use std::path::Path;
use tokio::fs;

use crate::pattern::{self, PatternSet};
use crate::step::StepError;
use crate::tool::{self, ToolsConfig};

/// Minifies all scripts matching `patterns` under `from` into `output`.
/// Invocation shape: `<minifier> [extra] <inputs..> -o <output>`.
pub(super) async fn scripts(
    from: &Path,
    output: &Path,
    patterns: &PatternSet,
    tools: &ToolsConfig,
) -> Result<(usize, u64), StepError> {
    let inputs = pattern::collect_files(from, patterns).await?;
    if inputs.is_empty() {
        return Ok((0, 0));
    }

    ensure_parent(output).await?;

    let mut args = tools.script_minifier_args.clone();
    args.extend(inputs.iter().map(|p| p.display().to_string()));
    args.push("-o".to_string());
    args.push(output.display().to_string());
    tool::run_tool(&tools.script_minifier, &args, tools.timeout_secs).await?;

    let bytes = fs::metadata(output).await.map(|m| m.len()).unwrap_or(0);
    Ok((inputs.len(), bytes))
}

/// Minifies all stylesheets matching `patterns` under `from` into `output`.
/// Invocation shape: `<minifier> [extra] -o <output> <inputs..>`.
pub(super) async fn styles(
    from: &Path,
    output: &Path,
    patterns: &PatternSet,
    tools: &ToolsConfig,
) -> Result<(usize, u64), StepError> {
    let inputs = pattern::collect_files(from, patterns).await?;
    if inputs.is_empty() {
        return Ok((0, 0));
    }

    ensure_parent(output).await?;

    let mut args = tools.style_minifier_args.clone();
    args.push("-o".to_string());
    args.push(output.display().to_string());
    args.extend(inputs.iter().map(|p| p.display().to_string()));
    tool::run_tool(&tools.style_minifier, &args, tools.timeout_secs).await?;

    let bytes = fs::metadata(output).await.map(|m| m.len()).unwrap_or(0);
    Ok((inputs.len(), bytes))
}

async fn ensure_parent(path: &Path) -> Result<(), StepError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}
