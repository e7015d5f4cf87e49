//! Module hierarchy: design manifest, module tree and the hierarchical
//! file-list stream consumed by the orchestrators.

pub mod filelist;
pub mod manifest;
pub mod tree;

pub use filelist::{
    expand_env_vars, matches_pattern, resolve_template, FileListQuery, FileListRecord,
    FileListSpec, GenMode, ModFileList,
};
pub use manifest::{Manifest, ModuleSpec};
pub use tree::{HierarchyWalk, ModuleId, ModuleInstance, ModuleTree};

/// Source of per-module file lists for one hierarchy.
///
/// Every call starts a fresh walk; a walk yields each (module, file list) at most once.
pub trait FileListSource: Send + Sync {
    /// Name of the top module the walk starts at.
    fn top_name(&self) -> &str;

    fn iter_filelists<'a>(
        &'a self,
        query: &FileListQuery,
    ) -> Box<dyn Iterator<Item = ModFileList> + 'a>;
}
