//! Workspace config file source: hwgen.toml in the workspace root.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = "hwgen.toml";

/// Add the workspace config file to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join(WORKSPACE_CONFIG_FILE);
    if path.is_file() {
        return Ok(builder.add_source(File::from(path).required(false)));
    }
    Ok(builder)
}
