//! The generic sequencer: runs a command's steps strictly in order.

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use crate::pattern::PatternError;
use crate::remote::RemoteStore;
use crate::step::{Step, StepContext, StepReport};
use crate::steps;

use super::catalog;
use super::types::{CommandSpec, RunReport, RunnerError};

/// Runs composite commands over the builtin step table.
///
/// One step at a time, awaited in order; the first failure aborts the rest
/// of the sequence and leaves completed steps' side effects in place.
pub struct TaskRunner {
    ctx: StepContext,
    steps: Vec<Step>,
    commands: Vec<CommandSpec>,
    remote: Option<Arc<dyn RemoteStore>>,
}

impl TaskRunner {
    /// Creates a runner for a project with the builtin tables.
    pub fn new(ctx: StepContext) -> Result<Self, PatternError> {
        let steps = catalog::builtin_steps(&ctx)?;
        let commands = catalog::builtin_commands();
        Ok(Self {
            ctx,
            steps,
            commands,
            remote: None,
        })
    }

    /// Attaches the remote store used by the sync step.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn context(&self) -> &StepContext {
        &self.ctx
    }

    /// The registered command names, in table order.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    /// Resolves a command name.
    pub fn command(&self, name: &str) -> Result<&CommandSpec, RunnerError> {
        self.commands
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| RunnerError::UnknownCommand(name.to_string()))
    }

    fn step(&self, command: &str, id: &str) -> Result<&Step, RunnerError> {
        self.steps
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| RunnerError::UnknownStep {
                command: command.to_string(),
                step_id: id.to_string(),
            })
    }

    /// Runs a command to completion, fail-fast.
    pub async fn run(&self, name: &str) -> Result<RunReport, RunnerError> {
        let spec = self.command(name)?;
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(
            "Running command '{}' ({} steps) [run {}]",
            spec.name,
            spec.steps.len(),
            run_id
        );

        let reports = self.run_steps(&spec.name, &spec.steps).await?;

        let report = RunReport {
            run_id,
            command: name.to_string(),
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            steps: reports,
        };

        info!(
            "Command '{}' finished: {} steps, {} files, {}ms",
            report.command,
            report.steps.len(),
            report.total_files(),
            report.duration_ms
        );

        Ok(report)
    }

    /// Runs an explicit step sequence, fail-fast. Used for watch re-runs.
    pub async fn run_steps(
        &self,
        command: &str,
        step_ids: &[String],
    ) -> Result<Vec<StepReport>, RunnerError> {
        let mut reports = Vec::with_capacity(step_ids.len());
        for id in step_ids {
            let step = self.step(command, id)?;
            match steps::execute(step, &self.ctx, self.remote.as_deref()).await {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("Step '{}' failed, aborting '{}': {}", id, command, e);
                    return Err(RunnerError::StepFailed {
                        step_id: id.clone(),
                        source: e,
                    });
                }
            }
        }
        Ok(reports)
    }
}
