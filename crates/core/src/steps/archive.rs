//! Archive step: zip the distribution tree.

use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::pattern::{self, normalize, PatternSet};
use crate::step::StepError;

/// Zips the contents of `dir` into `output`. Entries are written in sorted
/// order with a fixed timestamp, so identical trees produce identical
/// archives. An empty tree yields a valid empty archive.
pub(super) async fn run(dir: &Path, output: &Path) -> Result<(usize, u64), StepError> {
    let everything = PatternSet::new(["**"]).expect("static pattern compiles");
    let files = pattern::collect_files(dir, &everything).await?;

    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let file = std::fs::File::create(output)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    for path in &files {
        let rel = normalize(path.strip_prefix(dir).unwrap_or(path));
        writer
            .start_file(rel, options)
            .map_err(|e| StepError::Archive {
                reason: e.to_string(),
            })?;
        let body = std::fs::read(path)?;
        writer.write_all(&body)?;
    }

    writer.finish().map_err(|e| StepError::Archive {
        reason: e.to_string(),
    })?;

    let bytes = std::fs::metadata(output)?.len();
    Ok((files.len(), bytes))
}
