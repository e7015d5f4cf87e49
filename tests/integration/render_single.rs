//! Single-target rendering outside the hierarchy walk.

use super::test_utils::Fixture;
use hwgen::generation::{render_in_place, render_to_file};
use hwgen::render::{ContextData, RenderOutcome, TemplateEngine};
use hwgen::GenError;
use serde_json::json;

#[test]
fn render_to_file_binds_top_and_data() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    let template = fixture.path("templates/info.txt.tpl");
    std::fs::write(&template, "top=${top} rev=${rev}\n").unwrap();
    let dest = fixture.path("gen/info.txt");
    let mut data = ContextData::new();
    data.insert("rev".to_string(), json!("b1"));

    let outcome =
        render_to_file(&tree, &TemplateEngine::new(), &[template], &dest, Some(&data)).unwrap();

    assert_eq!(outcome, RenderOutcome::Created);
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "top=soc rev=b1\n");
}

#[test]
fn render_in_place_patches_existing_file() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    let template = fixture.path("templates/top.tpl");
    std::fs::write(&template, "@@ def ports\ninput ${top}_clk,\n@@ enddef\n").unwrap();
    let target = fixture.path("src/soc_top.sv");

    let outcome = render_in_place(
        &tree,
        &TemplateEngine::new(),
        &[template],
        &target,
        false,
        None,
    )
    .unwrap();

    assert_eq!(outcome, RenderOutcome::Updated);
    assert!(std::fs::read_to_string(&target)
        .unwrap()
        .contains("  input soc_clk,\n"));
}

#[test]
fn render_in_place_on_missing_file_fails() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    let target = fixture.path("src/nope.sv");

    let err = render_in_place(
        &tree,
        &TemplateEngine::new(),
        &[fixture.path("templates/sections.tpl")],
        &target,
        true,
        None,
    )
    .unwrap_err();

    assert!(matches!(err, GenError::MissingInplaceFile(path) if path == target));
    assert!(!target.exists());
}
