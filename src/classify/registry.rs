//! Kind registry: resolves declared module kinds (with `extends` chains) into
//! flat [`ModuleKind`] values the classifier can read directly.

use crate::classify::{classify, BaseCategory, Classification, DutBuilder, ModuleClass};
use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Declared module kind, as written in a design manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KindSpec {
    /// Category markers declared on this kind
    #[serde(default)]
    pub bases: Vec<BaseCategory>,

    /// Parent kind whose markers and DUT builder are inherited
    #[serde(default)]
    pub extends: Option<String>,

    /// Explicit DUT builder declaration; `None` inherits from the parent
    #[serde(default)]
    pub builds_dut: Option<bool>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Resolved module kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleKind {
    pub name: String,
    pub bases: BTreeSet<BaseCategory>,
    pub dut_builder: DutBuilder,
    pub tags: BTreeSet<String>,
}

impl ModuleClass for ModuleKind {
    fn name(&self) -> &str {
        &self.name
    }

    fn bases(&self) -> &BTreeSet<BaseCategory> {
        &self.bases
    }

    fn dut_builder(&self) -> DutBuilder {
        self.dut_builder
    }
}

/// All kinds known to one design.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: BTreeMap<String, ModuleKind>,
}

struct Resolved {
    bases: BTreeSet<BaseCategory>,
    dut_builder: Option<DutBuilder>,
    tags: BTreeSet<String>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every declared kind. Fails on unknown parents and extension cycles.
    pub fn from_specs(specs: &BTreeMap<String, KindSpec>) -> Result<Self, ManifestError> {
        let mut registry = Self::new();
        for name in specs.keys() {
            let mut chain = Vec::new();
            let resolved = resolve(name, specs, &mut chain)?;
            registry.register(ModuleKind {
                name: name.clone(),
                bases: resolved.bases,
                dut_builder: resolved.dut_builder.unwrap_or_default(),
                tags: resolved.tags,
            });
        }
        Ok(registry)
    }

    pub fn register(&mut self, kind: ModuleKind) {
        self.kinds.insert(kind.name.clone(), kind);
    }

    pub fn get(&self, name: &str) -> Option<&ModuleKind> {
        self.kinds.get(name)
    }

    /// Kinds sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleKind> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn classify(&self, name: &str) -> Option<Classification> {
        self.get(name).map(|kind| classify(kind))
    }
}

fn resolve(
    name: &str,
    specs: &BTreeMap<String, KindSpec>,
    chain: &mut Vec<String>,
) -> Result<Resolved, ManifestError> {
    if chain.iter().any(|visited| visited == name) {
        return Err(ManifestError::KindCycle(name.to_string()));
    }
    let spec = specs
        .get(name)
        .ok_or_else(|| ManifestError::UnknownModule(name.to_string()))?;
    chain.push(name.to_string());

    let mut resolved = match &spec.extends {
        Some(parent) => {
            if !specs.contains_key(parent) {
                return Err(ManifestError::UnknownParentKind {
                    kind: name.to_string(),
                    parent: parent.clone(),
                });
            }
            resolve(parent, specs, chain)?
        }
        None => Resolved {
            bases: BTreeSet::new(),
            dut_builder: None,
            tags: BTreeSet::new(),
        },
    };

    resolved.bases.extend(spec.bases.iter().copied());
    // every category derives from the common base
    if !resolved.bases.is_empty() {
        resolved.bases.insert(BaseCategory::Base);
    }
    if let Some(builds_dut) = spec.builds_dut {
        resolved.dut_builder = Some(if builds_dut {
            DutBuilder::Provided
        } else {
            DutBuilder::Placeholder
        });
    }
    resolved.tags.extend(spec.tags.iter().cloned());

    chain.pop();
    Ok(resolved)
}
