//! Clean step: delete selected files under a directory.

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::pattern::{normalize, PatternSet};
use crate::step::StepError;

/// Deletes files under `dir` selected by `patterns`. Matched directories go
/// recursively; a negation must select the directory itself to protect its
/// contents. Ensures `dir` itself exists afterwards.
pub(super) async fn run(dir: &Path, patterns: &PatternSet) -> Result<(usize, u64), StepError> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut dirs: Vec<PathBuf> = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let mut entries = match fs::read_dir(&current).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            let rel = normalize(path.strip_prefix(dir).unwrap_or(&path));
            if file_type.is_dir() {
                stack.push(path.clone());
                if patterns.matches(&rel) {
                    dirs.push(path);
                }
            } else if patterns.matches(&rel) {
                files.push(path);
            }
        }
    }

    let mut removed = 0;
    for file in &files {
        fs::remove_file(file).await?;
        removed += 1;
    }

    // Shallowest first; a nested match may already be gone with its parent.
    dirs.sort_by_key(|d| d.components().count());
    for d in &dirs {
        match fs::remove_dir_all(d).await {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    fs::create_dir_all(dir).await?;
    Ok((removed, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[tokio::test]
    async fn test_clean_missing_dir_creates_it() {
        let temp = tempfile::TempDir::new().unwrap();
        let dist = temp.path().join("dist");
        let patterns = PatternSet::new(["*"]).unwrap();

        let (removed, _) = run(&dist, &patterns).await.unwrap();
        assert_eq!(removed, 0);
        assert!(dist.is_dir());
    }

    #[tokio::test]
    async fn test_clean_keeps_fingerprinted_bundles() {
        let temp = tempfile::TempDir::new().unwrap();
        let dist = temp.path().to_path_buf();
        write(&dist, "index.html");
        write(&dist, "css/main.css");
        write(&dist, "css/app.pkg.59d2a3b8.css");
        write(&dist, "js/app.js");
        write(&dist, "js/app.pkg.4fe20111.js");

        let patterns = PatternSet::new([
            "*",
            "!css/**",
            "css/*",
            "!css/*.pkg.*.css",
            "!js/**",
            "js/*",
            "!js/*.pkg.*.js",
        ])
        .unwrap();

        run(&dist, &patterns).await.unwrap();

        assert!(!dist.join("index.html").exists());
        assert!(!dist.join("css/main.css").exists());
        assert!(!dist.join("js/app.js").exists());
        assert!(dist.join("css/app.pkg.59d2a3b8.css").exists());
        assert!(dist.join("js/app.pkg.4fe20111.js").exists());
    }

    #[tokio::test]
    async fn test_clean_removes_matched_directories_recursively() {
        let temp = tempfile::TempDir::new().unwrap();
        let dist = temp.path().to_path_buf();
        write(&dist, "img/icons/a.png");

        // Only the top-level entry matches; its contents go with it.
        let patterns = PatternSet::new(["*"]).unwrap();
        run(&dist, &patterns).await.unwrap();

        assert!(!dist.join("img").exists());
        assert!(dist.is_dir());
    }

    #[tokio::test]
    async fn test_clean_selected_subset_only() {
        let temp = tempfile::TempDir::new().unwrap();
        let dist = temp.path().to_path_buf();
        write(&dist, "css/main.css");
        write(&dist, "css/styles.min.css");

        let patterns = PatternSet::new(["css/*.css", "!css/*.min.css"]).unwrap();
        run(&dist, &patterns).await.unwrap();

        assert!(!dist.join("css/main.css").exists());
        assert!(dist.join("css/styles.min.css").exists());
    }
}
