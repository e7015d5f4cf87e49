//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, the
//! workspace `hwgen.toml`, then `HWGEN__*` environment variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HwgenConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generation settings shared by all commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Worker pool size; defaults to the available parallelism
    #[serde(default)]
    pub max_workers: Option<usize>,

    /// Template directories searched before discovered package directories
    #[serde(default)]
    pub template_paths: Vec<PathBuf>,

    /// Log at debug level
    #[serde(default)]
    pub verbose: bool,
}

impl HwgenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.generation.max_workers == Some(0) {
            errors.push("generation.max_workers must be at least 1".to_string());
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            errors.push(format!(
                "logging.format '{}' must be 'text' or 'json'",
                self.logging.format
            ));
        }
        if !matches!(self.logging.output.as_str(), "stdout" | "stderr" | "file") {
            errors.push(format!(
                "logging.output '{}' must be 'stdout', 'stderr' or 'file'",
                self.logging.output
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
