//! Template-render step: compile page templates into static HTML.

use handlebars::Handlebars;
use std::path::Path;
use tokio::fs;

use crate::pattern::{self, PatternSet};
use crate::step::StepError;

/// Renders every template matching `patterns` under `from` with the JSON
/// value in `data_file`, writing `<stem>.html` into `to`.
///
/// The data file is only required when at least one template matched, so a
/// project without templates builds without one.
pub(super) async fn run(
    from: &Path,
    to: &Path,
    patterns: &PatternSet,
    data_file: &Path,
) -> Result<(usize, u64), StepError> {
    let templates = pattern::collect_files(from, patterns).await?;
    if templates.is_empty() {
        return Ok((0, 0));
    }

    let raw = fs::read_to_string(data_file)
        .await
        .map_err(|e| StepError::Data {
            path: data_file.to_path_buf(),
            reason: e.to_string(),
        })?;
    let data: serde_json::Value = serde_json::from_str(&raw).map_err(|e| StepError::Data {
        path: data_file.to_path_buf(),
        reason: e.to_string(),
    })?;

    let handlebars = Handlebars::new();
    fs::create_dir_all(to).await?;

    let mut bytes = 0u64;
    for template in &templates {
        let source = fs::read_to_string(template)
            .await
            .map_err(|e| StepError::Template {
                path: template.clone(),
                reason: e.to_string(),
            })?;
        let rendered =
            handlebars
                .render_template(&source, &data)
                .map_err(|e| StepError::Template {
                    path: template.clone(),
                    reason: e.to_string(),
                })?;

        let stem = template
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "index".to_string());
        let out = to.join(format!("{}.html", stem));
        bytes += rendered.len() as u64;
        fs::write(&out, rendered).await?;
    }

    Ok((templates.len(), bytes))
}
