//! CLI route table: commands parsed with clap and executed against a fixture design.

use super::test_utils::Fixture;
use clap::Parser;
use hwgen::cli::{Cli, RunContext};
use hwgen::config::HwgenConfig;

fn run(fixture: &Fixture, args: &[&str]) -> Result<String, hwgen::GenError> {
    let root = fixture.root().to_string_lossy().to_string();
    let mut argv = vec!["hwgen", "--workspace", root.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut config = HwgenConfig::default();
    config.generation.template_paths = vec![fixture.path("templates")];
    RunContext::with_config(cli.workspace.clone(), config).execute(&cli.command)
}

#[test]
fn gen_and_cleangen_commands() {
    let fixture = Fixture::new();
    let manifest = fixture.manifest().to_string_lossy().to_string();

    let out = run(&fixture, &["gen", &manifest, "hdl", "--maxworkers", "2"]).unwrap();
    assert!(out.contains("Filelist 'hdl': 3 job(s)"));
    assert!(fixture.path("out/uart_core.sv").exists());

    let out = run(&fixture, &["cleangen", &manifest, "hdl", "--dry-run"]).unwrap();
    assert!(out.contains("DRY RUN"));
    assert!(fixture.path("out/uart_core.sv").exists());

    run(&fixture, &["cleangen", &manifest, "hdl"]).unwrap();
    assert!(fixture.generated_files().is_empty());
}

#[test]
fn gen_with_defines() {
    let fixture = Fixture::new();
    std::fs::write(fixture.path("templates/module.sv.tpl"), "${mod}:${rev}\n").unwrap();
    let manifest = fixture.manifest().to_string_lossy().to_string();

    run(
        &fixture,
        &["gen", &manifest, "hdl", "--maxlevel", "1", "-D", "rev=\"a0\""],
    )
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(fixture.path("out/soc.sv")).unwrap(),
        "soc:a0\n"
    );
}

#[test]
fn filelist_prints_output_paths() {
    let fixture = Fixture::new();
    let manifest = fixture.manifest().to_string_lossy().to_string();

    let out = run(&fixture, &["filelist", &manifest, "hdl", "--target", "syn"]).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(
        lines,
        vec![
            fixture.path("out/soc.sv").to_string_lossy().as_ref(),
            fixture.path("out/uart.sv").to_string_lossy().as_ref(),
            fixture.path("out/spi.sv").to_string_lossy().as_ref(),
        ]
    );
}

#[test]
fn fileinfo_json_groups_by_module() {
    let fixture = Fixture::new();
    let manifest = fixture.manifest().to_string_lossy().to_string();

    let out = run(&fixture, &["fileinfo", &manifest, "--format", "json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["soc"].as_array().unwrap().len(), 2);
    assert_eq!(value["spi"][0]["name"], "doc");
    assert_eq!(value["uart_core"][0]["targets"][0], "sim");
}

#[test]
fn check_with_statistics() {
    let fixture = Fixture::new();
    let manifest = fixture.manifest().to_string_lossy().to_string();

    let out = run(&fixture, &["check", &manifest, "--stat"]).unwrap();

    assert!(out.starts_with("'soc' checked."));
    assert!(out.contains("  modules: 4"));
    assert!(out.contains("  kinds: 3"));
}

#[test]
fn ls_filters_kinds() {
    let fixture = Fixture::new();
    let manifest = fixture.manifest().to_string_lossy().to_string();

    let names = run(&fixture, &["ls", &manifest, "--names"]).unwrap();
    assert_eq!(
        names.lines().collect::<Vec<_>>(),
        vec!["core_ip", "generic_tb_base", "ip", "soc_kind", "soc_tb", "static_tb"]
    );

    let tbs = run(&fixture, &["ls", &manifest, "--names", "--tb"]).unwrap();
    assert_eq!(
        tbs.lines().collect::<Vec<_>>(),
        vec!["generic_tb_base", "soc_tb", "static_tb"]
    );

    let runnable_generic = run(&fixture, &["ls", &manifest, "-n", "-g", "-t"]).unwrap();
    assert_eq!(runnable_generic, "soc_tb");

    let tagged = run(&fixture, &["ls", &manifest, "-n", "--tag", "peri*"]).unwrap();
    assert_eq!(tagged, "ip");

    let table = run(&fixture, &["ls", &manifest, "soc*"]).unwrap();
    assert!(table.contains("soc_kind"));
    assert!(table.contains("configurable"));
    assert!(!table.contains("core_ip"));
}

#[test]
fn rendergen_and_renderinplace_commands() {
    let fixture = Fixture::new();
    let manifest = fixture.manifest().to_string_lossy().to_string();
    let genfile = fixture.path("gen/top.txt").to_string_lossy().to_string();
    std::fs::write(fixture.path("templates/top.txt.tpl"), "${top}\n").unwrap();

    run(
        &fixture,
        &["rendergen", &manifest, "missing.tpl", "top.txt.tpl", "--out", &genfile],
    )
    .unwrap();
    assert_eq!(std::fs::read_to_string(&genfile).unwrap(), "soc\n");

    std::fs::write(
        fixture.path("templates/top_sections.tpl"),
        "@@ def ports\ninput clk, // ${top}\n@@ enddef\n",
    )
    .unwrap();
    let inplace = fixture.path("src/soc_top.sv").to_string_lossy().to_string();
    run(
        &fixture,
        &["renderinplace", &manifest, "top_sections.tpl", "--file", &inplace],
    )
    .unwrap();
    let patched = std::fs::read_to_string(&inplace).unwrap();
    assert!(patched.contains("  input clk, // soc\n"));
    assert!(!patched.contains("old"));

    let missing = fixture.path("src/uart_top.sv").to_string_lossy().to_string();
    let err = run(
        &fixture,
        &["renderinplace", &manifest, "top_sections.tpl", "--file", &missing],
    )
    .unwrap_err();
    assert!(matches!(err, hwgen::GenError::MissingInplaceFile(_)));
}

#[test]
fn info_template_paths_lists_configured_and_discovered_dirs() {
    let fixture = Fixture::new();
    std::fs::create_dir_all(fixture.path("pkg/hwgen-templates")).unwrap();

    let out = run(&fixture, &["info", "template-paths"]).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("templates"));
    assert!(lines[1].ends_with("hwgen-templates"));
}
