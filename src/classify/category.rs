use serde::{Deserialize, Serialize};
use std::fmt;

/// Base category a module kind can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseCategory {
    /// Module with a configuration object
    Configurable,
    /// Core module, instantiated by a wrapping parent
    Core,
    /// Module whose structure is tailored by its parent
    Tailored,
    /// Plain module
    Plain,
    /// Testbench waiting for a device under test
    GenericTb,
    /// Testbench with a fixed device under test
    StaticTb,
    /// Common base of all module kinds
    Base,
}

/// Base categories ordered from most to least specialized.
pub const BASE_PRIORITY: [BaseCategory; 7] = [
    BaseCategory::Configurable,
    BaseCategory::Core,
    BaseCategory::Tailored,
    BaseCategory::Plain,
    BaseCategory::GenericTb,
    BaseCategory::StaticTb,
    BaseCategory::Base,
];

impl BaseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseCategory::Configurable => "configurable",
            BaseCategory::Core => "core",
            BaseCategory::Tailored => "tailored",
            BaseCategory::Plain => "plain",
            BaseCategory::GenericTb => "generic_tb",
            BaseCategory::StaticTb => "static_tb",
            BaseCategory::Base => "base",
        }
    }
}

impl fmt::Display for BaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
