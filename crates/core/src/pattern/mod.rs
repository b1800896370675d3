//! Ordered glob pattern sets with negation.
//!
//! Step inputs are declared as pattern lists where later entries override
//! earlier ones: a `!`-prefixed pattern un-selects paths a previous pattern
//! picked up. This is what lets a clean step empty a directory while
//! protecting previously fingerprinted files in it.

use regex_lite::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while compiling a pattern set.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A glob could not be translated into a valid regex.
    #[error("invalid pattern '{pattern}': {reason}")]
    Invalid { pattern: String, reason: String },
}

/// A single compiled glob rule.
struct Rule {
    raw: String,
    negated: bool,
    regex: Regex,
}

/// An ordered list of glob patterns, evaluated top to bottom.
///
/// Supported syntax: `*` (within one path segment), `**` (across segments),
/// `?` (one character), `!` prefix (negation). Paths are matched as
/// `/`-separated strings relative to the tree root.
pub struct PatternSet {
    rules: Vec<Rule>,
}

impl PatternSet {
    /// Compiles an ordered list of glob patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        for pattern in patterns {
            let raw = pattern.as_ref().to_string();
            let (negated, glob) = match raw.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, raw.as_str()),
            };
            let regex = Regex::new(&glob_to_regex(glob)).map_err(|e| PatternError::Invalid {
                pattern: raw.clone(),
                reason: e.to_string(),
            })?;
            rules.push(Rule {
                raw,
                negated,
                regex,
            });
        }
        Ok(Self { rules })
    }

    /// Whether a relative path is selected by this set.
    ///
    /// Rules are applied in order; the last matching rule wins, so a
    /// negation protects paths selected by an earlier pattern, and a later
    /// positive pattern can re-select paths a negation excluded.
    pub fn matches(&self, path: &str) -> bool {
        let mut selected = false;
        for rule in &self.rules {
            if rule.regex.is_match(path) {
                selected = !rule.negated;
            }
        }
        selected
    }

    /// Whether the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The raw patterns this set was built from.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.raw.as_str())
    }
}

impl std::fmt::Debug for PatternSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| &r.raw))
            .finish()
    }
}

/// Converts a path to the `/`-separated form used for matching.
pub fn normalize(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Translates one glob into an anchored regex.
fn glob_to_regex(glob: &str) -> String {
    // `a/**` also matches `a` itself, so the trailing globstar is optional.
    let (glob, trailing_globstar) = match glob.strip_suffix("/**") {
        Some(rest) if !rest.is_empty() => (rest, true),
        _ => (glob, false),
    };

    let mut re = String::with_capacity(glob.len() * 2 + 8);
    re.push('^');

    let bytes = glob.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if bytes[i + 1..].starts_with(b"*/") {
                    // Zero or more whole segments.
                    re.push_str("(?:[^/]*/)*");
                    i += 3;
                    continue;
                } else if bytes[i + 1..].starts_with(b"*") {
                    re.push_str(".*");
                    i += 2;
                    continue;
                }
                re.push_str("[^/]*");
            }
            b'?' => re.push_str("[^/]"),
            c => {
                let c = c as char;
                if matches!(
                    c,
                    '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\'
                ) {
                    re.push('\\');
                }
                re.push(c);
            }
        }
        i += 1;
    }

    if trailing_globstar {
        re.push_str("(?:/.*)?");
    }
    re.push('$');
    re
}

/// Collects all files under `root` whose root-relative path the set selects.
///
/// A missing root yields an empty list rather than an error; the result is
/// sorted so downstream steps see a stable order.
pub async fn collect_files(root: &Path, set: &PatternSet) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                stack.push(path);
            } else if file_type.is_file() {
                let rel = path.strip_prefix(root).unwrap_or(&path);
                if set.matches(&normalize(rel)) {
                    out.push(path);
                }
            }
        }
    }

    out.sort();
    Ok(out)
}
