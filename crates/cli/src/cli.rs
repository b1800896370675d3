use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitewright_core::{
    builtin_watch_rules, load_config, load_credentials, validate_config, watch_sources, S3Store,
    StepContext, TaskRunner,
};

#[derive(Debug, Parser)]
#[command(name = "sitewright", about = "Static site build pipeline runner", version)]
pub struct Cli {
    /// Command to run: test, dev, default or push
    #[arg(value_name = "COMMAND", default_value = "default")]
    command: String,

    /// Build configuration file, relative to the project root
    #[arg(long, default_value = "build.toml")]
    config: PathBuf,

    /// Remote store credentials file, relative to the project root
    #[arg(long, default_value = "credentials.toml")]
    credentials: PathBuf,

    /// Project root (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        init_logging(self.verbose);

        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };

        let config_path = root.join(&self.config);
        info!("Loading configuration from {:?}", config_path);
        let config = load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?;
        validate_config(&config).context("Configuration validation failed")?;

        let credentials = load_credentials(&root.join(&self.credentials))
            .context("Failed to load credentials")?;
        if credentials.is_none() {
            info!("No remote credentials available");
        }

        let ctx = StepContext::new(root, config.clone()).with_credentials(credentials.clone());
        let mut runner = TaskRunner::new(ctx).context("Failed to build step table")?;

        if let (Some(remote_config), Some(creds)) = (config.remote.clone(), credentials) {
            runner = runner.with_remote(Arc::new(S3Store::new(remote_config, creds)));
        }

        let watch = {
            let available = runner.command_names().join(", ");
            runner
                .command(&self.command)
                .with_context(|| format!("available commands: {}", available))?
                .watch
        };

        let report = runner.run(&self.command).await?;
        info!(
            "'{}' completed: {} steps, {} files, {}ms",
            report.command,
            report.steps.len(),
            report.total_files(),
            report.duration_ms
        );

        if watch {
            let rules = builtin_watch_rules().context("Failed to build watch rules")?;
            let source_dir = runner.context().source_dir();
            tokio::select! {
                result = watch_sources(&runner, &source_dir, &rules) => {
                    result.context("Watch loop failed")?;
                }
                _ = shutdown_signal() => {
                    info!("Leaving watch mode");
                }
            }
        }

        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
