//! Style-compile step: run the external preprocessor per stylesheet.

use std::path::Path;
use tokio::fs;

use crate::pattern::{self, PatternSet};
use crate::step::StepError;
use crate::tool::{self, ToolsConfig};

/// Compiles each stylesheet matching `patterns` under `from` into
/// `<stem>.css` in `to`. No matching inputs means nothing to do.
pub(super) async fn run(
    from: &Path,
    to: &Path,
    patterns: &PatternSet,
    tools: &ToolsConfig,
) -> Result<(usize, u64), StepError> {
    let inputs = pattern::collect_files(from, patterns).await?;
    if inputs.is_empty() {
        return Ok((0, 0));
    }

    fs::create_dir_all(to).await?;

    let mut bytes = 0u64;
    for input in &inputs {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "styles".to_string());
        let output = to.join(format!("{}.css", stem));

        let mut args = tools.style_compiler_args.clone();
        args.push(input.display().to_string());
        args.push(output.display().to_string());
        tool::run_tool(&tools.style_compiler, &args, tools.timeout_secs).await?;

        bytes += fs::metadata(&output).await.map(|m| m.len()).unwrap_or(0);
    }

    Ok((inputs.len(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fake_tool;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_compiles_each_stylesheet() {
        let temp = tempfile::TempDir::new().unwrap();
        let src = temp.path().join("less");
        let out = temp.path().join("css");
        write(&src, "main.less", "@c: red; body { color: @c; }");
        write(&src, "page.less", "h1 { x: 1; }");
        write(&src, "mixins.less", "should be excluded");

        // Fake compiler: copies input to output.
        let tools = ToolsConfig {
            style_compiler: fake_tool(temp.path(), "lessc", "cp \"$1\" \"$2\""),
            ..ToolsConfig::default()
        };

        let patterns = PatternSet::new(["*.less", "!mixins.less"]).unwrap();
        let (files, bytes) = run(&src, &out, &patterns, &tools).await.unwrap();

        assert_eq!(files, 2);
        assert!(bytes > 0);
        assert!(out.join("main.css").exists());
        assert!(out.join("page.css").exists());
        assert!(!out.join("mixins.css").exists());
    }

    #[tokio::test]
    async fn test_no_inputs_never_invokes_tool() {
        let temp = tempfile::TempDir::new().unwrap();
        let src = temp.path().join("less");
        std::fs::create_dir_all(&src).unwrap();
        let out = temp.path().join("css");

        // A tool that would fail loudly if invoked.
        let tools = ToolsConfig {
            style_compiler: fake_tool(temp.path(), "lessc", "exit 9"),
            ..ToolsConfig::default()
        };

        let patterns = PatternSet::new(["*.less"]).unwrap();
        let result = run(&src, &out, &patterns, &tools).await.unwrap();
        assert_eq!(result, (0, 0));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_compiler_failure_surfaces_message() {
        let temp = tempfile::TempDir::new().unwrap();
        let src = temp.path().join("less");
        let out = temp.path().join("css");
        write(&src, "broken.less", "nope");

        let tools = ToolsConfig {
            style_compiler: fake_tool(
                temp.path(),
                "lessc",
                "echo 'ParseError: Unrecognised input' 1>&2; exit 1",
            ),
            ..ToolsConfig::default()
        };

        let patterns = PatternSet::new(["*.less"]).unwrap();
        let err = run(&src, &out, &patterns, &tools).await.unwrap_err();
        assert!(err.to_string().contains("Unrecognised input"));
    }
}
