//! Explicit per-invocation context handed to every step.

use std::path::{Path, PathBuf};

use crate::config::{Config, RemoteCredentials};

/// Everything a step executor may need, passed explicitly instead of read
/// from ambient globals: the project root, the loaded configuration, and
/// the optional remote credentials.
#[derive(Debug, Clone)]
pub struct StepContext {
    root: PathBuf,
    config: Config,
    credentials: Option<RemoteCredentials>,
}

impl StepContext {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<RemoteCredentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> Option<&RemoteCredentials> {
        self.credentials.as_ref()
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.source_dir)
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.dist_dir)
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(&self.config.paths.data_file)
    }

    pub fn test_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.test_dir)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(self.config.archive_name())
    }
}
