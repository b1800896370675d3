//! Passive file-watch loop.
//!
//! A rule table maps changed source paths to the steps they affect; every
//! matching event triggers a sequential re-run. There is deliberately no
//! debouncing or coalescing: rapid saves mean repeated runs, and a failing
//! re-run is logged while the loop keeps watching.

use notify::{EventKind, RecursiveMode, Watcher};
use std::path::Path;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::pattern::{normalize, PatternError, PatternSet};
use crate::runner::TaskRunner;

/// Errors raised while setting up the watch loop.
#[derive(Debug, Error)]
pub enum WatchError {
    /// File watcher backend error.
    #[error("file watch error: {0}")]
    Notify(#[from] notify::Error),
}

/// One watch rule: source patterns and the steps a matching change re-runs.
pub struct WatchRule {
    patterns: PatternSet,
    steps: Vec<String>,
}

impl WatchRule {
    pub fn new<P, PS, S, SS>(patterns: P, steps: S) -> Result<Self, PatternError>
    where
        P: IntoIterator<Item = PS>,
        PS: AsRef<str>,
        S: IntoIterator<Item = SS>,
        SS: Into<String>,
    {
        Ok(Self {
            patterns: PatternSet::new(patterns)?,
            steps: steps.into_iter().map(Into::into).collect(),
        })
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.patterns.matches(rel_path)
    }

    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(String::as_str)
    }
}

/// The steps affected by a change, in rule order without duplicates.
pub fn affected_steps(rules: &[WatchRule], rel_path: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for rule in rules {
        if rule.matches(rel_path) {
            for step in rule.steps() {
                if !out.iter().any(|s| s == step) {
                    out.push(step.to_string());
                }
            }
        }
    }
    out
}

/// Watches `source_dir` and re-runs affected steps until the task is
/// cancelled (the caller races this against its shutdown signal).
pub async fn watch_sources(
    runner: &TaskRunner,
    source_dir: &Path,
    rules: &[WatchRule],
) -> Result<(), WatchError> {
    let (tx, mut rx) = mpsc::channel::<std::path::PathBuf>(256);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    for path in event.paths {
                        let _ = tx.blocking_send(path);
                    }
                }
            }
            Err(e) => {
                warn!("File watcher error: {}", e);
            }
        })?;

    watcher.watch(source_dir, RecursiveMode::Recursive)?;
    info!("Watching {} for changes", source_dir.display());

    while let Some(path) = rx.recv().await {
        let rel = match path.strip_prefix(source_dir) {
            Ok(rel) => normalize(rel),
            Err(_) => continue,
        };

        let steps = affected_steps(rules, &rel);
        if steps.is_empty() {
            continue;
        }

        info!("{} changed, re-running {}", rel, steps.join(", "));
        if let Err(e) = runner.run_steps("watch", &steps).await {
            error!("Watch re-run failed: {}", e);
        }
    }

    Ok(())
}
