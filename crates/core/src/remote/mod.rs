//! Remote object store client and differential sync.

mod config;
mod s3;
mod sigv4;
mod sync;

pub use config::RemoteConfig;
pub use s3::S3Store;
pub use sync::{sync_dir, SyncOutcome};

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by the remote store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// No credentials were supplied for the remote store.
    #[error("remote store credentials are missing")]
    MissingCredentials,

    /// No remote section in the build configuration.
    #[error("remote store is not configured")]
    NotConfigured,

    /// The store rejected our credentials.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Request timed out.
    #[error("remote request timed out")]
    Timeout,

    /// Could not reach the store.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The store returned an unexpected response.
    #[error("remote API error: {0}")]
    ApiError(String),

    /// I/O error while reading local files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Metadata of an object as stored remotely.
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub key: String,
    /// ETag with surrounding quotes stripped. For plain uploads this is the
    /// hex md5 of the body; multipart uploads carry a `-` suffix.
    pub etag: String,
    pub size_bytes: u64,
}

/// An object store the sync step can upload to.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns the name of this store implementation.
    fn name(&self) -> &str;

    /// Fetches metadata for a key, or `None` if the object does not exist.
    async fn head(&self, key: &str) -> Result<Option<RemoteObject>, RemoteError>;

    /// Uploads an object body under a key.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), RemoteError>;
}
