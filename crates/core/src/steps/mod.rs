//! Step executors: one per action variant, dispatched by [`execute`].
//!
//! Native executors work the file system directly; the preprocessor,
//! minifiers, linter and test runner go through the external tool adapter;
//! remote sync goes through the [`RemoteStore`] seam so tests can swap in
//! a mock store.

mod archive;
mod clean;
mod copy;
mod fingerprint;
mod lint;
mod minify;
mod remote_sync;
mod style;
mod suite;
mod template;

use std::time::Instant;
use tracing::info;

use crate::remote::RemoteStore;
use crate::step::{Step, StepAction, StepContext, StepError, StepReport};

/// Executes one step against the given context.
pub async fn execute(
    step: &Step,
    ctx: &StepContext,
    remote: Option<&dyn RemoteStore>,
) -> Result<StepReport, StepError> {
    let start = Instant::now();
    let tools = &ctx.config().tools;

    let (files, bytes) = match &step.action {
        StepAction::Clean { dir, patterns } => clean::run(dir, patterns).await?,
        StepAction::Copy { from, to, patterns } => copy::run(from, to, patterns).await?,
        StepAction::TemplateRender {
            from,
            to,
            patterns,
            data_file,
        } => template::run(from, to, patterns, data_file).await?,
        StepAction::StyleCompile { from, to, patterns } => {
            style::run(from, to, patterns, tools).await?
        }
        StepAction::MinifyScripts {
            from,
            output,
            patterns,
        } => minify::scripts(from, output, patterns, tools).await?,
        StepAction::MinifyStyles {
            from,
            output,
            patterns,
        } => minify::styles(from, output, patterns, tools).await?,
        StepAction::Fingerprint {
            dir,
            patterns,
            rewrite,
        } => fingerprint::run(dir, patterns, rewrite).await?,
        StepAction::Archive { dir, output } => archive::run(dir, output).await?,
        StepAction::RemoteSync { dir } => remote_sync::run(dir, ctx, remote).await?,
        StepAction::Lint { dir, patterns } => lint::run(dir, patterns, tools).await?,
        StepAction::RunSuite { dir, patterns } => suite::run(dir, patterns, tools).await?,
    };

    let report = StepReport {
        step_id: step.id.clone(),
        kind: step.kind(),
        files,
        bytes,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Step {} ({}): {} files, {} bytes, {}ms",
        report.step_id, report.kind, report.files, report.bytes, report.duration_ms
    );

    Ok(report)
}
