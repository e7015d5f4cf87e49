//! File-list records: generation mode, output paths and template paths of one
//! named list of one module.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Generation mode of a file list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenMode {
    /// Generate whole files from templates
    Full,
    /// Patch marked regions of existing files
    Inplace,
    /// Leave files untouched
    #[default]
    No,
}

impl GenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenMode::Full => "full",
            GenMode::Inplace => "inplace",
            GenMode::No => "no",
        }
    }
}

/// File list as declared in a design manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileListSpec {
    #[serde(default)]
    pub gen: GenMode,
    #[serde(default)]
    pub filepaths: Vec<String>,
    #[serde(default)]
    pub template_filepaths: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Resolved file list of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListRecord {
    pub name: String,
    pub gen: GenMode,
    pub filepaths: Vec<PathBuf>,
    pub template_filepaths: Vec<PathBuf>,
    pub targets: Vec<String>,
}

/// One entry of the hierarchical file-list stream.
#[derive(Debug, Clone, Serialize)]
pub struct ModFileList {
    pub module: String,
    pub kind: String,
    pub record: FileListRecord,
}

/// Selects which file lists a hierarchy walk yields.
#[derive(Debug, Clone)]
pub struct FileListQuery {
    /// File-list name pattern (`*` and `?` wildcards)
    pub name: String,
    /// Target tag pattern; lists without targets always match
    pub target: Option<String>,
    /// Deepest hierarchy level to visit, top is level 1
    pub max_level: Option<usize>,
    pub replace_envvars: bool,
}

impl FileListQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            max_level: None,
            replace_envvars: true,
        }
    }

    pub fn with_target(mut self, target: Option<String>) -> Self {
        self.target = target;
        self
    }

    pub fn with_max_level(mut self, max_level: Option<usize>) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_replace_envvars(mut self, replace_envvars: bool) -> Self {
        self.replace_envvars = replace_envvars;
        self
    }

    pub fn matches(&self, name: &str, spec: &FileListSpec) -> bool {
        if !matches_pattern(&self.name, name) {
            return false;
        }
        match &self.target {
            None => true,
            Some(_) if spec.targets.is_empty() => true,
            Some(target) => spec.targets.iter().any(|t| matches_pattern(target, t)),
        }
    }
}

impl FileListSpec {
    /// Resolve paths: expand environment variables, anchor relative output
    /// paths at `base_dir` and look template names up in `template_paths`.
    pub fn resolve(
        &self,
        name: &str,
        base_dir: &Path,
        template_paths: &[PathBuf],
        replace_envvars: bool,
    ) -> FileListRecord {
        let expand = |raw: &String| {
            if replace_envvars {
                expand_env_vars(raw)
            } else {
                raw.clone()
            }
        };
        let filepaths = unique(self.filepaths.iter().map(|raw| {
            let path = PathBuf::from(expand(raw));
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        }));
        let template_filepaths = unique(
            self.template_filepaths
                .iter()
                .map(|raw| resolve_template(&PathBuf::from(expand(raw)), base_dir, template_paths)),
        );
        FileListRecord {
            name: name.to_string(),
            gen: self.gen,
            filepaths,
            template_filepaths,
            targets: self.targets.clone(),
        }
    }
}

/// Look a template up in `template_paths`, then in `base_dir`. Names that
/// resolve nowhere are returned unchanged.
pub fn resolve_template(path: &Path, base_dir: &Path, template_paths: &[PathBuf]) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    template_paths
        .iter()
        .map(|dir| dir.join(path))
        .chain(std::iter::once(base_dir.join(path)))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

fn unique(paths: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths.filter(|path| seen.insert(path.clone())).collect()
}

/// Glob-style match supporting `*` and `?`.
pub fn matches_pattern(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    let (mut p, mut n) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;
    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(c) if *c == '?' || *c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star_p, star_n)) => {
                    p = star_p + 1;
                    n = star_n + 1;
                    backtrack = Some((star_p, star_n + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|c| *c == '*')
}

/// Expand `$VAR` and `${VAR}`; unknown variables are left as written.
pub fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        let value = if name.is_empty() {
            None
        } else {
            std::env::var(name).ok()
        };
        match value {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[pos..pos + 1 + consumed]),
        }
        rest = &rest[pos + 1 + consumed..];
    }
    out.push_str(rest);
    out
}
