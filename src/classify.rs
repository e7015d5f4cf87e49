//! Module classification: base category, direct runnability and testbench kind
//! of a module kind. Kinds carry explicit category markers and an explicit DUT
//! builder flag; nothing is inferred from how a kind was defined.

mod category;
mod registry;

pub use category::{BaseCategory, BASE_PRIORITY};
pub use registry::{KindRegistry, KindSpec, ModuleKind};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Whether a kind supplies its own device-under-test builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DutBuilder {
    /// Inherits the generic testbench placeholder
    #[default]
    Placeholder,
    /// Builds its own device under test
    Provided,
}

/// Testbench flavour of a module kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TbKind {
    #[default]
    None,
    Static,
    Generic,
}

impl TbKind {
    pub fn is_tb(&self) -> bool {
        !matches!(self, TbKind::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TbKind::None => "",
            TbKind::Static => "Static",
            TbKind::Generic => "Generic",
        }
    }
}

/// A module implementation class as seen by the classifier.
pub trait ModuleClass {
    fn name(&self) -> &str;

    /// Category markers, including those inherited from parent kinds.
    fn bases(&self) -> &BTreeSet<BaseCategory>;

    fn dut_builder(&self) -> DutBuilder;
}

/// Derived summary of one module kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// `None` for kinds deriving from no known category
    pub category: Option<BaseCategory>,
    pub is_runnable: bool,
    pub tb: TbKind,
}

/// Classify a module kind. Never fails; unknown kinds yield `category: None`.
pub fn classify(class: &dyn ModuleClass) -> Classification {
    Classification {
        category: base_category(class),
        is_runnable: is_runnable(class),
        tb: tb_kind(class),
    }
}

/// First category of the priority table the kind is marked with.
pub fn base_category(class: &dyn ModuleClass) -> Option<BaseCategory> {
    let bases = class.bases();
    BASE_PRIORITY
        .iter()
        .copied()
        .find(|category| bases.contains(category))
}

/// Whether the kind can be loaded directly as a top module.
pub fn is_runnable(class: &dyn ModuleClass) -> bool {
    let bases = class.bases();
    if bases.contains(&BaseCategory::GenericTb) {
        return class.dut_builder() == DutBuilder::Provided;
    }
    [
        BaseCategory::Configurable,
        BaseCategory::Plain,
        BaseCategory::StaticTb,
    ]
    .iter()
    .any(|category| bases.contains(category))
}

pub fn tb_kind(class: &dyn ModuleClass) -> TbKind {
    let bases = class.bases();
    if bases.contains(&BaseCategory::GenericTb) {
        TbKind::Generic
    } else if bases.contains(&BaseCategory::StaticTb) {
        TbKind::Static
    } else {
        TbKind::None
    }
}
