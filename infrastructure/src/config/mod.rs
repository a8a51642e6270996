//! Configuration file loading for swarm-planner
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SWARM_PLANNER_*` environment variables (`__` separates section and key)
//! 2. `--config <path>` specified file
//! 3. Project root: `./planner.toml` or `./.planner.toml`
//! 4. Global: `$XDG_CONFIG_HOME/swarm-planner/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLoggingConfig, FileOutputConfig, FilePlanningConfig, FileReasoningConfig,
    ReasoningProvider,
};
pub use loader::{ConfigError, ConfigLoader};
