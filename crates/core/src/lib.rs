pub mod config;
pub mod pattern;
pub mod remote;
pub mod runner;
pub mod step;
pub mod steps;
pub mod testing;
pub mod tool;
pub mod watch;

pub use config::{
    load_config, load_config_from_str, load_credentials, validate_config, Config, ConfigError,
    PathsConfig, ProjectConfig, RemoteCredentials,
};
pub use pattern::{PatternError, PatternSet};
pub use remote::{RemoteConfig, RemoteError, RemoteObject, RemoteStore, S3Store, SyncOutcome};
pub use runner::{
    builtin_commands, builtin_steps, builtin_watch_rules, CommandSpec, RunReport, RunnerError,
    TaskRunner,
};
pub use step::{Step, StepAction, StepContext, StepError, StepKind, StepReport};
pub use tool::{ToolError, ToolsConfig};
pub use watch::{affected_steps, watch_sources, WatchError, WatchRule};
