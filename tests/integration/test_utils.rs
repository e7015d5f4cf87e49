//! Shared test utilities for integration tests
//!
//! Builds a small design on disk: a manifest, a template directory and the
//! in-place target of the top module.

use hwgen::hierarchy::ModuleTree;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DESIGN: &str = r#"
top = "soc"

[kinds.soc_kind]
bases = ["configurable"]
tags = ["soc"]

[kinds.ip]
bases = ["plain"]
tags = ["ip", "periph"]

[kinds.core_ip]
bases = ["core"]

[kinds.generic_tb_base]
bases = ["generic_tb"]

[kinds.soc_tb]
extends = "generic_tb_base"
builds_dut = true

[kinds.static_tb]
bases = ["static_tb"]

[modules.soc]
kind = "soc_kind"
children = ["uart", "spi"]

[modules.soc.filelists.hdl]
gen = "full"
filepaths = ["out/soc.sv"]
template_filepaths = ["module.sv.tpl"]

[modules.soc.filelists.top]
gen = "inplace"
filepaths = ["src/soc_top.sv"]
template_filepaths = ["sections.tpl"]

[modules.uart]
kind = "ip"
children = ["uart_core"]

[modules.uart.filelists.hdl]
gen = "full"
filepaths = ["out/uart.sv"]
template_filepaths = ["module.sv.tpl"]

[modules.uart.filelists.top]
gen = "inplace"
filepaths = ["src/uart_top.sv"]
template_filepaths = ["sections.tpl"]

[modules.uart_core]
kind = "core_ip"

[modules.uart_core.filelists.hdl]
gen = "full"
filepaths = ["out/uart_core.sv"]
template_filepaths = ["module.sv.tpl"]
targets = ["sim"]

[modules.spi]
kind = "ip"
children = ["uart_core"]

[modules.spi.filelists.hdl]
gen = "no"
filepaths = ["out/spi.sv"]
template_filepaths = ["module.sv.tpl"]

[modules.spi.filelists.doc]
gen = "full"
filepaths = ["out/spi.md"]
"#;

pub const MODULE_TEMPLATE: &str = "// module ${mod} (${kind}) in ${top}\nmodule ${mod};\nendmodule\n";

pub const SECTIONS_TEMPLATE: &str = "@@ def ports\ninput clk, // ${mod}\n@@ enddef\n";

pub const SOC_TOP: &str = "\
module soc_top(
  // GENERATE INPLACE BEGIN ports
  old
  // GENERATE INPLACE END ports
);
endmodule
";

/// A design written to a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("design.toml"), DESIGN).unwrap();
        let templates = root.join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(templates.join("module.sv.tpl"), MODULE_TEMPLATE).unwrap();
        std::fs::write(templates.join("sections.tpl"), SECTIONS_TEMPLATE).unwrap();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src").join("soc_top.sv"), SOC_TOP).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest(&self) -> PathBuf {
        self.root().join("design.toml")
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn tree(&self) -> ModuleTree {
        ModuleTree::load(&self.manifest())
            .unwrap()
            .with_template_paths(vec![self.root().join("templates")])
    }

    /// Relative paths of every regular file below `out/`, sorted.
    pub fn generated_files(&self) -> Vec<String> {
        let out = self.path("out");
        if !out.exists() {
            return Vec::new();
        }
        let mut files: Vec<String> = walkdir::WalkDir::new(&out)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }
}
