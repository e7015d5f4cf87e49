//! Classification of the kinds declared in a design manifest.

use super::test_utils::Fixture;
use hwgen::classify::{classify, BaseCategory, KindRegistry, KindSpec, TbKind};
use hwgen::ManifestError;
use std::collections::BTreeMap;

#[test]
fn manifest_kinds_are_classified() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    let kinds = tree.kinds();

    let soc = kinds.classify("soc_kind").unwrap();
    assert_eq!(soc.category, Some(BaseCategory::Configurable));
    assert!(soc.is_runnable);
    assert_eq!(soc.tb, TbKind::None);

    let core = kinds.classify("core_ip").unwrap();
    assert_eq!(core.category, Some(BaseCategory::Core));
    assert!(!core.is_runnable);

    let placeholder = kinds.classify("generic_tb_base").unwrap();
    assert_eq!(placeholder.category, Some(BaseCategory::GenericTb));
    assert_eq!(placeholder.tb, TbKind::Generic);
    assert!(!placeholder.is_runnable);

    let provided = kinds.classify("soc_tb").unwrap();
    assert_eq!(provided.tb, TbKind::Generic);
    assert!(provided.is_runnable);

    let static_tb = kinds.classify("static_tb").unwrap();
    assert_eq!(static_tb.category, Some(BaseCategory::StaticTb));
    assert_eq!(static_tb.tb, TbKind::Static);
    assert!(static_tb.is_runnable);

    assert!(kinds.classify("not_declared").is_none());
}

#[test]
fn kind_without_markers_has_no_category() {
    let mut specs = BTreeMap::new();
    specs.insert("blob".to_string(), KindSpec::default());
    let registry = KindRegistry::from_specs(&specs).unwrap();

    let classification = classify(registry.get("blob").unwrap());
    assert_eq!(classification.category, None);
    assert!(!classification.is_runnable);
    assert_eq!(classification.tb, TbKind::None);
}

#[test]
fn dut_builder_flag_is_inherited_through_extends() {
    let toml_specs = r#"
[generic]
bases = ["generic_tb"]

[provided]
extends = "generic"
builds_dut = true

[provided_child]
extends = "provided"
tags = ["child"]

[reset_child]
extends = "provided"
builds_dut = false
"#;
    let specs: BTreeMap<String, KindSpec> = toml::from_str(toml_specs).unwrap();
    let registry = KindRegistry::from_specs(&specs).unwrap();

    assert!(registry.classify("provided_child").unwrap().is_runnable);
    assert!(!registry.classify("reset_child").unwrap().is_runnable);
    assert!(!registry.classify("generic").unwrap().is_runnable);
}

#[test]
fn extension_cycles_and_unknown_parents_are_errors() {
    let cycle: BTreeMap<String, KindSpec> =
        toml::from_str("[a]\nextends = \"b\"\n[b]\nextends = \"a\"\n").unwrap();
    assert!(matches!(
        KindRegistry::from_specs(&cycle),
        Err(ManifestError::KindCycle(_))
    ));

    let orphan: BTreeMap<String, KindSpec> = toml::from_str("[a]\nextends = \"zzz\"\n").unwrap();
    assert!(matches!(
        KindRegistry::from_specs(&orphan),
        Err(ManifestError::UnknownParentKind { .. })
    ));
}
