use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{
    types::{Config, RemoteCredentials},
    ConfigError,
};

/// Load build configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("SITEWRIGHT_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load remote store credentials from file and/or environment.
///
/// A missing credentials file is not an error at load time: a build that
/// never reaches the upload step does not need credentials, and a push
/// without them fails at the upload step instead. A present but malformed
/// file is a configuration error.
pub fn load_credentials(path: &Path) -> Result<Option<RemoteCredentials>, ConfigError> {
    let have_file = path.exists();
    let mut figment = Figment::new();
    if have_file {
        figment = figment.merge(Toml::file(path));
    }
    figment = figment.merge(Env::prefixed("SITEWRIGHT_AWS_"));

    match figment.extract::<RemoteCredentials>() {
        Ok(creds) => Ok(Some(creds)),
        Err(e) if have_file => Err(ConfigError::ParseError(e.to_string())),
        Err(_) => Ok(None),
    }
}
