//! Shared harness for pipeline integration tests: a scratch project with
//! fake external tools, so full commands run without the real binaries.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use sitewright_core::testing::fake_tool;
use sitewright_core::{
    load_config_from_str, Config, RemoteConfig, RemoteStore, StepContext, TaskRunner,
};

/// Fake script minifier: concatenates every input before `-o` into the
/// output, like `terser a.js b.js -o out.js`.
pub const SCRIPT_MINIFIER: &str = r#"out=""; files=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift 2; continue; fi
  files="$files $1"; shift
done
cat $files > "$out""#;

/// Fake style minifier: `cleancss -o out.css inputs..`.
pub const STYLE_MINIFIER: &str = r#"[ "$1" = "-o" ] || exit 7
out="$2"; shift 2
cat "$@" > "$out""#;

/// A scratch project directory with fake tools wired into its config.
pub struct TestProject {
    pub temp: TempDir,
    pub config: Config,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let mut config = load_config_from_str(
            r#"
[project]
name = "example-site"
version = "0.1.0"
"#,
        )
        .expect("Failed to parse test config");

        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to create bin dir");
        config.tools.style_compiler = fake_tool(&bin, "lessc", "cp \"$1\" \"$2\"");
        config.tools.script_minifier = fake_tool(&bin, "terser", SCRIPT_MINIFIER);
        config.tools.style_minifier = fake_tool(&bin, "cleancss", STYLE_MINIFIER);
        config.tools.linter = fake_tool(&bin, "jshint", "exit 0");
        config.tools.test_runner = fake_tool(&bin, "qunit", "exit 0");

        Self { temp, config }
    }

    /// Adds a remote section pointing at a bucket with the given prefix.
    pub fn with_remote(mut self, prefix: &str) -> Self {
        self.config.remote = Some(RemoteConfig {
            bucket: "preview".to_string(),
            prefix: prefix.to_string(),
            endpoint: None,
            upload_concurrency: 5,
            differential: true,
            timeout_secs: 30,
        });
        self
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn dist(&self) -> PathBuf {
        self.root().join("dist")
    }

    pub fn bin(&self) -> PathBuf {
        self.root().join("bin")
    }

    /// Writes a file under the project root, creating parents.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create parent");
        std::fs::write(path, content).expect("Failed to write file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root().join(rel)).expect("Failed to read file")
    }

    /// Lays down a small but complete site: a page template referencing the
    /// minified bundles, data, a script, an image, and stylesheets.
    pub fn write_default_sources(&self) {
        self.write(
            "src/index.hbs",
            concat!(
                "<html><head><link href=\"css/styles.min.css\"></head>",
                "<body><h1>{{title}}</h1>",
                "<script src=\"js/app.min.js\"></script></body></html>"
            ),
        );
        self.write("src/data/index.json", r#"{"title": "Example"}"#);
        self.write("src/js/app.js", "var app = 1;\n");
        self.write("src/img/logo.png", "not-really-a-png");
        self.write("src/less/main.less", "body { color: red; }\n");
        self.write("src/less/mixins.less", ".mixin() { margin: 0; }\n");
        self.write("test/index.html", "<html>suite</html>");
    }

    pub fn runner(&self) -> TaskRunner {
        TaskRunner::new(StepContext::new(self.root(), self.config.clone()))
            .expect("Failed to build runner")
    }

    pub fn runner_with_store(&self, store: Arc<dyn RemoteStore>) -> TaskRunner {
        self.runner().with_remote(store)
    }
}

/// Finds the single file in `dir` whose name starts and ends as given;
/// useful for locating fingerprinted outputs.
pub fn find_file(dir: &Path, prefix: &str, suffix: &str) -> Option<String> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .find(|name| name.starts_with(prefix) && name.ends_with(suffix))
}
