//! Configuration for the remote object store.

use serde::{Deserialize, Serialize};

/// Remote store layout and upload behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Target bucket.
    pub bucket: String,

    /// Key prefix all uploads land under (e.g. "clients/example/site").
    #[serde(default)]
    pub prefix: String,

    /// Custom endpoint (e.g. "http://127.0.0.1:9000" for a local store).
    /// When set, requests are made path-style against it; otherwise the
    /// regional virtual-host endpoint is derived from the credentials.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Maximum simultaneous file transfers.
    #[serde(default = "default_upload_concurrency")]
    pub upload_concurrency: usize,

    /// Only upload files whose content differs from the stored object.
    #[serde(default = "default_differential")]
    pub differential: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_upload_concurrency() -> usize {
    5
}

fn default_differential() -> bool {
    true
}

fn default_timeout() -> u32 {
    30
}
