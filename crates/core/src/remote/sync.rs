//! Differential directory sync against a remote store.

use futures::stream::{self, StreamExt};
use std::path::Path;
use tracing::{debug, info};

use crate::pattern::{self, PatternSet};

use super::{RemoteError, RemoteStore};

/// Result of syncing a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub uploaded: usize,
    pub skipped: usize,
    pub bytes_uploaded: u64,
}

enum FileOutcome {
    Uploaded(u64),
    Skipped,
}

/// Uploads every file under `dir` to `store` beneath `prefix`.
///
/// With `differential` set, a file whose md5 matches the stored object's
/// ETag is skipped. At most `concurrency` transfers run at once; the first
/// failure aborts the remaining ones.
pub async fn sync_dir(
    store: &dyn RemoteStore,
    dir: &Path,
    prefix: &str,
    concurrency: usize,
    differential: bool,
) -> Result<SyncOutcome, RemoteError> {
    let everything = PatternSet::new(["**"]).expect("static pattern compiles");
    let files = pattern::collect_files(dir, &everything).await?;

    let prefix = prefix.trim_matches('/');
    let jobs = files.into_iter().map(|path| {
        let rel = path
            .strip_prefix(dir)
            .map(pattern::normalize)
            .unwrap_or_else(|_| pattern::normalize(&path));
        let key = if prefix.is_empty() {
            rel
        } else {
            format!("{}/{}", prefix, rel)
        };
        async move { sync_file(store, &path, &key, differential).await }
    });

    let mut outcome = SyncOutcome::default();
    let mut results = stream::iter(jobs).buffer_unordered(concurrency.max(1));
    while let Some(result) = results.next().await {
        match result? {
            FileOutcome::Uploaded(bytes) => {
                outcome.uploaded += 1;
                outcome.bytes_uploaded += bytes;
            }
            FileOutcome::Skipped => outcome.skipped += 1,
        }
    }

    info!(
        "Synced to {}: {} uploaded, {} unchanged, {} bytes",
        store.name(),
        outcome.uploaded,
        outcome.skipped,
        outcome.bytes_uploaded
    );

    Ok(outcome)
}

async fn sync_file(
    store: &dyn RemoteStore,
    path: &Path,
    key: &str,
    differential: bool,
) -> Result<FileOutcome, RemoteError> {
    let body = tokio::fs::read(path).await?;

    if differential {
        let local_etag = format!("{:x}", md5::compute(&body));
        if let Some(remote) = store.head(key).await? {
            if remote.etag == local_etag {
                debug!("Unchanged, skipping: {}", key);
                return Ok(FileOutcome::Skipped);
            }
        }
    }

    let bytes = body.len() as u64;
    store.put(key, body, content_type_for(path)).await?;
    Ok(FileOutcome::Uploaded(bytes))
}

/// Maps a file extension to the content type sent with its upload.
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") | Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
