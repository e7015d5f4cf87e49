//! File-list stream over a loaded design.

use super::test_utils::Fixture;
use hwgen::hierarchy::{FileListQuery, FileListSource, GenMode};
use hwgen::ManifestError;

#[test]
fn stream_visits_each_module_once_in_preorder() {
    let fixture = Fixture::new();
    let tree = fixture.tree();

    let modules: Vec<String> = tree
        .iter_filelists(&FileListQuery::new("hdl"))
        .map(|entry| entry.module)
        .collect();

    // uart_core is a child of uart and spi but is yielded once
    assert_eq!(modules, vec!["soc", "uart", "uart_core", "spi"]);
}

#[test]
fn stream_resolves_paths_against_manifest_dir_and_template_paths() {
    let fixture = Fixture::new();
    let tree = fixture.tree();

    let soc = tree
        .iter_filelists(&FileListQuery::new("hdl"))
        .next()
        .unwrap();

    assert_eq!(soc.kind, "soc_kind");
    assert_eq!(soc.record.gen, GenMode::Full);
    assert_eq!(soc.record.filepaths, vec![fixture.path("out/soc.sv")]);
    assert_eq!(
        soc.record.template_filepaths,
        vec![fixture.path("templates/module.sv.tpl")]
    );
}

#[test]
fn each_call_starts_a_fresh_walk() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    let query = FileListQuery::new("*");

    assert_eq!(
        tree.iter_filelists(&query).count(),
        tree.iter_filelists(&query).count()
    );
    assert_eq!(tree.top_name(), "soc");
}

#[test]
fn env_vars_in_paths_are_expanded() {
    let fixture = Fixture::new();
    std::env::set_var("HWGEN_IT_OUT_DIR", fixture.path("build"));
    std::fs::write(
        fixture.manifest(),
        r#"
top = "a"
[kinds.plain]
bases = ["plain"]
[modules.a]
kind = "plain"
[modules.a.filelists.hdl]
gen = "full"
filepaths = ["${HWGEN_IT_OUT_DIR}/a.sv"]
template_filepaths = ["module.sv.tpl"]
"#,
    )
    .unwrap();
    let tree = fixture.tree();

    let entry = tree
        .iter_filelists(&FileListQuery::new("hdl"))
        .next()
        .unwrap();
    assert_eq!(entry.record.filepaths, vec![fixture.path("build").join("a.sv")]);

    let raw = tree
        .iter_filelists(&FileListQuery::new("hdl").with_replace_envvars(false))
        .next()
        .unwrap();
    assert_eq!(
        raw.record.filepaths,
        vec![fixture.root().join("${HWGEN_IT_OUT_DIR}/a.sv")]
    );
}

#[test]
fn broken_manifests_are_reported() {
    let fixture = Fixture::new();
    std::fs::write(fixture.manifest(), "top = \"missing\"\n").unwrap();
    let err = hwgen::hierarchy::ModuleTree::load(&fixture.manifest()).unwrap_err();
    assert!(matches!(err, ManifestError::UnknownModule(name) if name == "missing"));

    std::fs::write(fixture.manifest(), "top = [").unwrap();
    let err = hwgen::hierarchy::ModuleTree::load(&fixture.manifest()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }));
}
