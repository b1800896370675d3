//! Remote-sync step: differential upload of the distribution tree.

use std::path::Path;

use crate::remote::{self, RemoteError, RemoteStore};
use crate::step::{StepContext, StepError};

/// Uploads `dir` to the configured remote store.
///
/// Fails before any network I/O when the remote section or the credentials
/// are missing; the locally built tree is never touched.
pub(super) async fn run(
    dir: &Path,
    ctx: &StepContext,
    remote: Option<&dyn RemoteStore>,
) -> Result<(usize, u64), StepError> {
    let config = ctx
        .config()
        .remote
        .as_ref()
        .ok_or(RemoteError::NotConfigured)?;
    let store = remote.ok_or(RemoteError::MissingCredentials)?;

    let outcome = remote::sync_dir(
        store,
        dir,
        &config.prefix,
        config.upload_concurrency,
        config.differential,
    )
    .await?;

    Ok((outcome.uploaded, outcome.bytes_uploaded))
}
