//! Module tree: arena of module instances rooted at the top module, and the
//! depth-limited hierarchy walk that yields file lists.

use crate::classify::{KindRegistry, ModuleKind};
use crate::error::ManifestError;
use crate::hierarchy::filelist::{FileListQuery, FileListSpec, ModFileList};
use crate::hierarchy::manifest::Manifest;
use crate::hierarchy::FileListSource;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Index of a module in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

#[derive(Debug, Clone)]
pub struct ModuleInstance {
    pub name: String,
    pub kind: String,
    pub children: Vec<ModuleId>,
    pub filelists: BTreeMap<String, FileListSpec>,
}

/// Module hierarchy of one design.
#[derive(Debug, Clone)]
pub struct ModuleTree {
    modules: Vec<ModuleInstance>,
    top: ModuleId,
    kinds: KindRegistry,
    base_dir: PathBuf,
    template_paths: Vec<PathBuf>,
}

impl ModuleTree {
    /// Load a design manifest. Relative paths inside it are anchored at its directory.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let manifest = Manifest::from_file(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::from_manifest(manifest, base_dir)
    }

    pub fn from_manifest(manifest: Manifest, base_dir: PathBuf) -> Result<Self, ManifestError> {
        let kinds = KindRegistry::from_specs(&manifest.kinds)?;

        let ids: HashMap<&str, ModuleId> = manifest
            .modules
            .keys()
            .enumerate()
            .map(|(index, name)| (name.as_str(), ModuleId(index)))
            .collect();

        let mut modules = Vec::with_capacity(manifest.modules.len());
        for (name, spec) in &manifest.modules {
            if kinds.get(&spec.kind).is_none() {
                return Err(ManifestError::UnknownKind {
                    module: name.clone(),
                    kind: spec.kind.clone(),
                });
            }
            let children = spec
                .children
                .iter()
                .map(|child| {
                    ids.get(child.as_str())
                        .copied()
                        .ok_or_else(|| ManifestError::UnknownModule(child.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            modules.push(ModuleInstance {
                name: name.clone(),
                kind: spec.kind.clone(),
                children,
                filelists: spec.filelists.clone(),
            });
        }

        let top = ids
            .get(manifest.top.as_str())
            .copied()
            .ok_or_else(|| ManifestError::UnknownModule(manifest.top.clone()))?;

        let tree = Self {
            modules,
            top,
            kinds,
            base_dir,
            template_paths: Vec::new(),
        };
        tree.check_acyclic()?;
        Ok(tree)
    }

    /// Search path for relative template names.
    pub fn with_template_paths(mut self, template_paths: Vec<PathBuf>) -> Self {
        self.template_paths = template_paths;
        self
    }

    pub fn template_paths(&self) -> &[PathBuf] {
        &self.template_paths
    }

    pub fn top(&self) -> &ModuleInstance {
        self.module(self.top)
    }

    pub fn module(&self, id: ModuleId) -> &ModuleInstance {
        &self.modules[id.0]
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    pub fn kind_of(&self, id: ModuleId) -> Option<&ModuleKind> {
        self.kinds.get(&self.module(id).kind)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Walk the hierarchy from top, pre-order, each module once.
    ///
    /// The depth limit applies to instance paths: a module shared between
    /// parents is expanded along its shortest path, so its children appear
    /// whenever any path keeps them within `max_level`.
    pub fn walk(&self, max_level: Option<usize>) -> HierarchyWalk<'_> {
        HierarchyWalk {
            tree: self,
            stack: vec![(self.top, 1)],
            yielded: HashSet::new(),
            expanded: HashMap::new(),
            max_level,
        }
    }

    /// Module, kind and file-list counts of the hierarchy below top.
    pub fn stat(&self) -> BTreeMap<String, usize> {
        let mut modules = 0usize;
        let mut filelists = 0usize;
        let mut kinds = HashSet::new();
        for (id, _) in self.walk(None) {
            let module = self.module(id);
            modules += 1;
            filelists += module.filelists.len();
            kinds.insert(module.kind.as_str());
        }
        let mut stat = BTreeMap::new();
        stat.insert("modules".to_string(), modules);
        stat.insert("kinds".to_string(), kinds.len());
        stat.insert("filelists".to_string(), filelists);
        stat
    }

    fn check_acyclic(&self) -> Result<(), ManifestError> {
        fn visit(
            tree: &ModuleTree,
            id: ModuleId,
            path: &mut Vec<ModuleId>,
            done: &mut HashSet<ModuleId>,
        ) -> Result<(), ManifestError> {
            if path.contains(&id) {
                return Err(ManifestError::HierarchyCycle(tree.module(id).name.clone()));
            }
            if done.contains(&id) {
                return Ok(());
            }
            path.push(id);
            for child in &tree.module(id).children {
                visit(tree, *child, path, done)?;
            }
            path.pop();
            done.insert(id);
            Ok(())
        }
        visit(self, self.top, &mut Vec::new(), &mut HashSet::new())
    }
}

/// Pre-order hierarchy iterator yielding `(module, level)`.
pub struct HierarchyWalk<'a> {
    tree: &'a ModuleTree,
    stack: Vec<(ModuleId, usize)>,
    yielded: HashSet<ModuleId>,
    /// Shallowest level each module's children were pushed from
    expanded: HashMap<ModuleId, usize>,
    max_level: Option<usize>,
}

impl Iterator for HierarchyWalk<'_> {
    type Item = (ModuleId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, level)) = self.stack.pop() {
            let first = self.yielded.insert(id);
            let descend = self.max_level.map_or(true, |max| level < max)
                && self.expanded.get(&id).map_or(true, |seen| level < *seen);
            if descend {
                self.expanded.insert(id, level);
                for child in self.tree.module(id).children.iter().rev() {
                    self.stack.push((*child, level + 1));
                }
            }
            if first {
                return Some((id, level));
            }
        }
        None
    }
}

impl FileListSource for ModuleTree {
    fn top_name(&self) -> &str {
        &self.top().name
    }

    fn iter_filelists<'a>(
        &'a self,
        query: &FileListQuery,
    ) -> Box<dyn Iterator<Item = ModFileList> + 'a> {
        if query.max_level == Some(0) {
            return Box::new(std::iter::empty());
        }
        let query = query.clone();
        Box::new(self.walk(query.max_level).flat_map(move |(id, _level)| {
            let module = self.module(id);
            module
                .filelists
                .iter()
                .filter(|(name, spec)| query.matches(name, spec))
                .map(|(name, spec)| ModFileList {
                    module: module.name.clone(),
                    kind: module.kind.clone(),
                    record: spec.resolve(
                        name,
                        &self.base_dir,
                        &self.template_paths,
                        query.replace_envvars,
                    ),
                })
                .collect::<Vec<_>>()
        }))
    }
}
