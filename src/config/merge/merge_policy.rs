//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("generation.verbose", false)?
        .set_default("generation.template_paths", Vec::<String>::new())?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "stderr")
}
