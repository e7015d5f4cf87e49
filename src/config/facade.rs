//! Config loading entry points used by the CLI.

use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::sources::{env, global_file, workspace_file};
use crate::config::HwgenConfig;
use crate::error::GenError;
use config::File;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace from all layers.
    pub fn load(workspace_root: &Path) -> Result<HwgenConfig, GenError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Load configuration from one explicit file; environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<HwgenConfig, GenError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = env::add_to_builder(builder);
        Self::finish(builder.build()?)
    }

    /// Built-in defaults only.
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> HwgenConfig {
        HwgenConfig::default()
    }

    fn finish(config: config::Config) -> Result<HwgenConfig, GenError> {
        let config: HwgenConfig = config.try_deserialize()?;
        config
            .validate()
            .map_err(|errors| GenError::ConfigError(errors.join("; ")))?;
        Ok(config)
    }
}
