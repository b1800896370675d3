//! Fingerprint step: content-derived filename suffixes for cache busting.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs;

use crate::pattern::{self, PatternSet};
use crate::step::StepError;

/// Matches a name that already carries a fingerprint suffix, so re-running
/// the build never stacks tags.
static REV_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[0-9a-f]{8}\.[A-Za-z0-9]+$").expect("static regex compiles"));

/// Length of the hex content tag inserted before the extension.
const TAG_LEN: usize = 8;

/// Renames files matching `patterns` under `dir` to `<stem>.<tag>.<ext>`
/// where the tag is derived from the file content, then rewrites references
/// to the old names in files matching `rewrite`.
pub(super) async fn run(
    dir: &Path,
    patterns: &PatternSet,
    rewrite: &PatternSet,
) -> Result<(usize, u64), StepError> {
    let targets = pattern::collect_files(dir, patterns).await?;

    let mut renames: Vec<(String, String)> = Vec::new();
    for path in &targets {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        if REV_NAME.is_match(&name) {
            continue;
        }

        let body = fs::read(path).await?;
        let digest = format!("{:x}", Sha256::digest(&body));
        let tag = &digest[..TAG_LEN];

        let new_name = match name.rsplit_once('.') {
            Some((stem, ext)) => format!("{}.{}.{}", stem, tag, ext),
            None => format!("{}.{}", name, tag),
        };
        fs::rename(path, path.with_file_name(&new_name)).await?;
        renames.push((name, new_name));
    }

    if renames.is_empty() {
        return Ok((0, 0));
    }

    let mut bytes = 0u64;
    let rewrite_targets = pattern::collect_files(dir, rewrite).await?;
    for target in &rewrite_targets {
        let content = match fs::read_to_string(target).await {
            Ok(content) => content,
            // Binary rewrite targets are skipped rather than corrupted.
            Err(_) => continue,
        };
        let mut updated = content.clone();
        for (old, new) in &renames {
            updated = updated.replace(old.as_str(), new.as_str());
        }
        if updated != content {
            bytes += updated.len() as u64;
            fs::write(target, updated).await?;
        }
    }

    Ok((renames.len(), bytes))
}
