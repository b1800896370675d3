//! Testing utilities and mock implementations.
//!
//! Provides a mock remote store and fake external tools, allowing the whole
//! pipeline to run in tests without network access or the real binaries.

mod mock_remote;

pub use mock_remote::MockRemoteStore;

use std::path::{Path, PathBuf};

/// Writes an executable shell script standing in for an external tool and
/// returns its path. The script body receives the tool's arguments as `$1`,
/// `$2`, ...
pub fn fake_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).expect("Failed to write fake tool");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake tool executable");
    }

    path
}
