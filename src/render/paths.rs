//! Template search path discovery.
//!
//! Template directories are the configured ones followed by every
//! `<search path>/<package>/hwgen-templates` directory. Search paths come from
//! the caller and from `HWGEN_PATH`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory name marking a package's template directory.
pub const TEMPLATE_DIR_NAME: &str = "hwgen-templates";

/// Environment variable holding extra search paths.
pub const SEARCH_PATH_ENV: &str = "HWGEN_PATH";

/// Determine template directories, de-duplicated, in priority order.
pub fn template_paths(configured: &[PathBuf], search_paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = configured.iter().filter(|p| p.is_dir()).cloned().collect();

    let env_paths: Vec<PathBuf> = std::env::var_os(SEARCH_PATH_ENV)
        .map(|value| std::env::split_paths(&value).collect())
        .unwrap_or_default();

    for search_path in search_paths.iter().chain(env_paths.iter()) {
        found.extend(discover(search_path));
    }

    let mut seen = HashSet::new();
    found
        .into_iter()
        .map(|path| dunce::canonicalize(&path).unwrap_or(path))
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

fn discover(search_path: &Path) -> Vec<PathBuf> {
    if !search_path.is_dir() {
        return Vec::new();
    }
    WalkDir::new(search_path)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && entry.file_name() == TEMPLATE_DIR_NAME)
        .map(|entry| entry.into_path())
        .collect()
}
