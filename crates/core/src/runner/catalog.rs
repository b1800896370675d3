//! The builtin step, command and watch-rule tables.
//!
//! This is the declarative heart of the pipeline: everything here is data
//! consumed by the generic sequencer. Paths are resolved against the
//! project root up front so executors never consult ambient state.

use crate::pattern::{PatternError, PatternSet};
use crate::step::{Step, StepAction, StepContext};
use crate::watch::WatchRule;

use super::types::CommandSpec;

/// Builds the step table for a project.
pub fn builtin_steps(ctx: &StepContext) -> Result<Vec<Step>, PatternError> {
    let src = ctx.source_dir();
    let dist = ctx.dist_dir();

    Ok(vec![
        // Empty dist/, but keep fingerprinted bundles from previous builds
        // so stale caches can still resolve them.
        Step::new(
            "clean-dist",
            StepAction::Clean {
                dir: dist.clone(),
                patterns: PatternSet::new([
                    "*",
                    "!css/**",
                    "css/*",
                    "!css/*.pkg.*.css",
                    "!js/**",
                    "js/*",
                    "!js/*.pkg.*.js",
                ])?,
            },
        ),
        Step::new(
            "copy-assets",
            StepAction::Copy {
                from: src.clone(),
                to: dist.clone(),
                patterns: PatternSet::new(["js/**", "img/**"])?,
            },
        ),
        Step::new(
            "render-pages",
            StepAction::TemplateRender {
                from: src.clone(),
                to: dist.clone(),
                patterns: PatternSet::new(["*.hbs"])?,
                data_file: ctx.data_file(),
            },
        ),
        Step::new(
            "compile-styles",
            StepAction::StyleCompile {
                from: src.join("less"),
                to: dist.join("css"),
                patterns: PatternSet::new(["*.less", "!mixins.less"])?,
            },
        ),
        Step::new(
            "minify-scripts",
            StepAction::MinifyScripts {
                from: src.clone(),
                output: dist.join("js/app.min.js"),
                patterns: PatternSet::new(["js/*.js"])?,
            },
        ),
        Step::new(
            "minify-styles",
            StepAction::MinifyStyles {
                from: dist.join("css"),
                output: dist.join("css/styles.min.css"),
                patterns: PatternSet::new(["*.css", "!*.min.css", "!*.pkg.*.css"])?,
            },
        ),
        Step::new(
            "fingerprint-assets",
            StepAction::Fingerprint {
                dir: dist.clone(),
                patterns: PatternSet::new(["css/*.min.css", "js/*.min.js"])?,
                rewrite: PatternSet::new(["*.html", "css/*.css"])?,
            },
        ),
        // Intermediate compiled stylesheets are gone once the minified
        // bundle exists.
        Step::new(
            "clean-stale-css",
            StepAction::Clean {
                dir: dist.join("css"),
                patterns: PatternSet::new(["*.css", "!*.min.css", "!*.min.*.css", "!*.pkg.*.css"])?,
            },
        ),
        Step::new(
            "archive-dist",
            StepAction::Archive {
                dir: dist.clone(),
                output: ctx.archive_path(),
            },
        ),
        Step::new("sync-remote", StepAction::RemoteSync { dir: dist.clone() }),
        Step::new(
            "lint-scripts",
            StepAction::Lint {
                dir: src.clone(),
                patterns: PatternSet::new(["**/*.js"])?,
            },
        ),
        Step::new(
            "run-suite",
            StepAction::RunSuite {
                dir: ctx.test_dir(),
                patterns: PatternSet::new(["**/*.html"])?,
            },
        ),
    ])
}

/// Builds the command table.
pub fn builtin_commands() -> Vec<CommandSpec> {
    const BUILD_STEPS: [&str; 8] = [
        "clean-dist",
        "copy-assets",
        "render-pages",
        "compile-styles",
        "minify-scripts",
        "minify-styles",
        "fingerprint-assets",
        "clean-stale-css",
    ];

    let mut default_steps: Vec<&str> = BUILD_STEPS.to_vec();
    default_steps.push("archive-dist");

    let mut push_steps: Vec<&str> = BUILD_STEPS.to_vec();
    push_steps.push("sync-remote");

    vec![
        CommandSpec::new("test", ["lint-scripts", "run-suite"]),
        CommandSpec::new(
            "dev",
            ["clean-dist", "copy-assets", "render-pages", "compile-styles"],
        )
        .with_watch(),
        CommandSpec::new("default", default_steps),
        CommandSpec::new("push", push_steps),
    ]
}

/// Builds the watch-rule table: which source changes re-run which steps.
pub fn builtin_watch_rules() -> Result<Vec<WatchRule>, PatternError> {
    Ok(vec![
        WatchRule::new(["**/*.js"], ["lint-scripts"])?,
        WatchRule::new(
            ["*.hbs", "data/**/*.json"],
            ["clean-dist", "copy-assets", "render-pages", "compile-styles"],
        )?,
        WatchRule::new(["**/*.less"], ["compile-styles"])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn ctx() -> StepContext {
        StepContext::new(
            "/work/site",
            load_config_from_str(
                r#"
[project]
name = "example-site"
"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_every_command_step_is_in_the_table() {
        let steps = builtin_steps(&ctx()).unwrap();
        for command in builtin_commands() {
            for id in &command.steps {
                assert!(
                    steps.iter().any(|s| &s.id == id),
                    "command '{}' references missing step '{}'",
                    command.name,
                    id
                );
            }
        }
    }

    #[test]
    fn test_every_watch_rule_step_is_in_the_table() {
        let steps = builtin_steps(&ctx()).unwrap();
        for rule in builtin_watch_rules().unwrap() {
            for id in rule.steps() {
                assert!(steps.iter().any(|s| s.id == id));
            }
        }
    }

    #[test]
    fn test_step_ids_are_unique() {
        let steps = builtin_steps(&ctx()).unwrap();
        let mut ids: Vec<_> = steps.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        let len = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn test_clean_precedes_copy_in_build_commands() {
        for name in ["default", "push", "dev"] {
            let commands = builtin_commands();
            let command = commands.iter().find(|c| c.name == name).unwrap();
            let clean = command.steps.iter().position(|s| s == "clean-dist").unwrap();
            let copy = command.steps.iter().position(|s| s == "copy-assets").unwrap();
            assert!(clean < copy, "{}: clean must precede copy", name);
            assert_eq!(copy, clean + 1);
        }
    }

    #[test]
    fn test_lint_precedes_suite() {
        let commands = builtin_commands();
        let test = commands.iter().find(|c| c.name == "test").unwrap();
        assert_eq!(test.steps, vec!["lint-scripts", "run-suite"]);
    }

    #[test]
    fn test_only_dev_watches() {
        for command in builtin_commands() {
            assert_eq!(command.watch, command.name == "dev");
        }
    }

    #[test]
    fn test_push_ends_with_sync_and_default_with_archive() {
        let commands = builtin_commands();
        let default = commands.iter().find(|c| c.name == "default").unwrap();
        let push = commands.iter().find(|c| c.name == "push").unwrap();
        assert_eq!(default.steps.last().map(String::as_str), Some("archive-dist"));
        assert_eq!(push.steps.last().map(String::as_str), Some("sync-remote"));
        assert_eq!(default.steps.len(), push.steps.len());
    }
}
