//! Configuration for the external tool adapter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Binary paths and extra arguments for the external tools the pipeline
/// drives. Defaults assume the tools are on PATH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// CSS preprocessor compiler, invoked as `<bin> [extra] <input> <output>`.
    #[serde(default = "default_style_compiler")]
    pub style_compiler: PathBuf,
    #[serde(default)]
    pub style_compiler_args: Vec<String>,

    /// Script minifier, invoked as `<bin> [extra] <inputs..> -o <output>`.
    #[serde(default = "default_script_minifier")]
    pub script_minifier: PathBuf,
    #[serde(default)]
    pub script_minifier_args: Vec<String>,

    /// Style minifier, invoked as `<bin> [extra] -o <output> <inputs..>`.
    #[serde(default = "default_style_minifier")]
    pub style_minifier: PathBuf,
    #[serde(default)]
    pub style_minifier_args: Vec<String>,

    /// Script linter, invoked as `<bin> [extra] <files..>`.
    #[serde(default = "default_linter")]
    pub linter: PathBuf,
    #[serde(default)]
    pub linter_args: Vec<String>,

    /// Browser test runner, invoked as `<bin> [extra] <files..>`.
    #[serde(default = "default_test_runner")]
    pub test_runner: PathBuf,
    #[serde(default)]
    pub test_runner_args: Vec<String>,

    /// Timeout for a single tool invocation in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_style_compiler() -> PathBuf {
    PathBuf::from("lessc")
}

fn default_script_minifier() -> PathBuf {
    PathBuf::from("terser")
}

fn default_style_minifier() -> PathBuf {
    PathBuf::from("cleancss")
}

fn default_linter() -> PathBuf {
    PathBuf::from("jshint")
}

fn default_test_runner() -> PathBuf {
    PathBuf::from("qunit")
}

fn default_timeout() -> u64 {
    300
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            style_compiler: default_style_compiler(),
            style_compiler_args: Vec::new(),
            script_minifier: default_script_minifier(),
            script_minifier_args: Vec::new(),
            style_minifier: default_style_minifier(),
            style_minifier_args: Vec::new(),
            linter: default_linter(),
            linter_args: Vec::new(),
            test_runner: default_test_runner(),
            test_runner_args: Vec::new(),
            timeout_secs: default_timeout(),
        }
    }
}
