use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Project section exists (enforced by serde)
/// - Project name is non-empty
/// - Source and dist directories are distinct
/// - Remote section, when present, names a bucket and a sane upload bound
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.project.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "project.name must not be empty".to_string(),
        ));
    }

    if config.paths.source_dir == config.paths.dist_dir {
        return Err(ConfigError::ValidationError(
            "paths.source_dir and paths.dist_dir must differ".to_string(),
        ));
    }

    if config.tools.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tools.timeout_secs cannot be 0".to_string(),
        ));
    }

    if let Some(remote) = &config.remote {
        if remote.bucket.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "remote.bucket must not be empty".to_string(),
            ));
        }
        if remote.upload_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "remote.upload_concurrency cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}
