//! Copy step: mirror selected files into the output tree.

use std::path::Path;
use tokio::fs;

use crate::pattern::{self, PatternSet};
use crate::step::StepError;

/// Copies files matching `patterns` from `from` into `to`, preserving their
/// relative paths. A missing or empty source tree is not an error.
pub(super) async fn run(
    from: &Path,
    to: &Path,
    patterns: &PatternSet,
) -> Result<(usize, u64), StepError> {
    let files = pattern::collect_files(from, patterns).await?;
    fs::create_dir_all(to).await?;

    let mut bytes = 0u64;
    for path in &files {
        let rel = path.strip_prefix(from).unwrap_or(path);
        let dest = to.join(rel);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        bytes += fs::copy(path, &dest).await?;
    }

    Ok((files.len(), bytes))
}
