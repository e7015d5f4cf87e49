//! Design manifest: TOML description of module kinds, module instances and
//! their file lists.

use crate::classify::KindSpec;
use crate::error::ManifestError;
use crate::hierarchy::filelist::FileListSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Name of the top module
    pub top: String,

    #[serde(default)]
    pub kinds: BTreeMap<String, KindSpec>,

    #[serde(default)]
    pub modules: BTreeMap<String, ModuleSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub kind: String,

    #[serde(default)]
    pub children: Vec<String>,

    #[serde(default)]
    pub filelists: BTreeMap<String, FileListSpec>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse manifest text; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
