use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::remote::RemoteConfig;
use crate::tool::ToolsConfig;

/// Root build configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub project: ProjectConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

/// Package metadata for the site being built.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Package name; also names the distribution archive.
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Source and output locations, relative to the project root.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
    /// JSON data file fed to page templates.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Directory holding the browser test suite.
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,
    /// Archive file name; defaults to `<project.name>.zip`.
    #[serde(default)]
    pub archive_name: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            dist_dir: default_dist_dir(),
            data_file: default_data_file(),
            test_dir: default_test_dir(),
            archive_name: None,
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_data_file() -> PathBuf {
    PathBuf::from("src/data/index.json")
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("test")
}

impl Config {
    /// The archive file name for this project.
    pub fn archive_name(&self) -> String {
        self.paths
            .archive_name
            .clone()
            .unwrap_or_else(|| format!("{}.zip", self.project.name))
    }
}

/// Credentials for the remote object store, loaded from a separate file.
#[derive(Clone, Deserialize, Serialize)]
pub struct RemoteCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

// The secret never reaches logs or error messages.
impl std::fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}
