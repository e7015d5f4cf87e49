//! CLI presentation: text and JSON formatting of command results.

use crate::classify::{Classification, ModuleKind};
use crate::error::GenError;
use crate::generation::{FileStatus, GenerationSummary};
use crate::hierarchy::ModFileList;
use crate::render::RenderOutcome;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const STATUS_WIDTH: usize = 14;

/// Status column, padded before colouring so escape codes do not count.
fn status_label(status: FileStatus) -> String {
    let text = match status {
        FileStatus::Created => "created",
        FileStatus::Updated => "updated",
        FileStatus::Unchanged => "unchanged",
        FileStatus::Removed => "removed",
        FileStatus::Absent => "absent",
        FileStatus::WouldRemove => "would remove",
    };
    let padded = format!("{:<width$}", text, width = STATUS_WIDTH);
    match status {
        FileStatus::Created => padded.green().to_string(),
        FileStatus::Updated => padded.yellow().to_string(),
        FileStatus::Unchanged | FileStatus::Absent => padded.dimmed().to_string(),
        FileStatus::Removed | FileStatus::WouldRemove => padded.red().to_string(),
    }
}

pub fn format_generation_summary(summary: &GenerationSummary) -> String {
    let mut out = String::new();
    for report in &summary.reports {
        out.push_str(&format!(
            "  {} {}\n",
            status_label(report.status),
            report.path.display()
        ));
    }
    if summary.dry_run {
        out.push_str(&format!(
            "Filelist '{}': DRY RUN. Nothing done ({} file(s) would be removed).",
            summary.filelist,
            summary.reports.len()
        ));
    } else {
        out.push_str(&format!(
            "Filelist '{}': {} job(s), {} created, {} updated, {} unchanged, {} removed.",
            summary.filelist,
            summary.submitted,
            summary.count(FileStatus::Created),
            summary.count(FileStatus::Updated),
            summary.count(FileStatus::Unchanged),
            summary.count(FileStatus::Removed),
        ));
    }
    if summary.has_issues() {
        out.push_str(&format!(
            "\n\nConfiguration issues ({}):",
            summary.config_issues.len()
        ));
        for issue in &summary.config_issues {
            out.push_str(&format!("\n  - {}", issue));
        }
    }
    out
}

pub fn format_filelist(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Group file lists by module, keeping walk order.
fn group_by_module(entries: &[ModFileList]) -> Vec<(&str, Vec<&ModFileList>)> {
    let mut groups: Vec<(&str, Vec<&ModFileList>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(module, _)| *module == entry.module) {
            Some((_, items)) => items.push(entry),
            None => groups.push((entry.module.as_str(), vec![entry])),
        }
    }
    groups
}

pub fn format_fileinfo_text(entries: &[ModFileList]) -> String {
    if entries.is_empty() {
        return "No matching file lists.".to_string();
    }
    let mut out = String::new();
    for (module, items) in group_by_module(entries) {
        out.push_str(&format!("{} ({})\n", module.bold(), items[0].kind));
        for item in items {
            let record = &item.record;
            out.push_str(&format!("  {} [gen={}]\n", record.name, record.gen.as_str()));
            for path in &record.filepaths {
                out.push_str(&format!("    file:     {}\n", path.display()));
            }
            for path in &record.template_filepaths {
                out.push_str(&format!("    template: {}\n", path.display()));
            }
            if !record.targets.is_empty() {
                out.push_str(&format!("    targets:  {}\n", record.targets.join(",")));
            }
        }
    }
    out.trim_end().to_string()
}

pub fn format_fileinfo_json(entries: &[ModFileList]) -> Result<String, GenError> {
    let groups: serde_json::Map<String, serde_json::Value> = group_by_module(entries)
        .into_iter()
        .map(|(module, items)| {
            let records: Vec<_> = items.iter().map(|item| &item.record).collect();
            Ok((module.to_string(), serde_json::to_value(records)?))
        })
        .collect::<Result<_, serde_json::Error>>()
        .map_err(|e| GenError::ConfigError(format!("Failed to serialize file info: {}", e)))?;
    serde_json::to_string_pretty(&groups)
        .map_err(|e| GenError::ConfigError(format!("Failed to serialize file info: {}", e)))
}

pub fn format_check_result(top: &str, stat: Option<&BTreeMap<String, usize>>) -> String {
    let mut out = format!("'{}' checked.", top);
    if let Some(stat) = stat {
        out.push_str("\nStatistics:");
        for (name, value) in stat {
            out.push_str(&format!("\n  {}: {}", name, value));
        }
    }
    out
}

pub fn format_kind_names(kinds: &[(&ModuleKind, Classification)]) -> String {
    kinds
        .iter()
        .map(|(kind, _)| kind.name.clone())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_kind_table(kinds: &[(&ModuleKind, Classification)]) -> String {
    if kinds.is_empty() {
        return "No module kinds found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Kind", "Top", "Tb", "Bases on", "Tags"]);
    for (kind, classification) in kinds {
        table.add_row(vec![
            kind.name.clone(),
            if classification.is_runnable { "X" } else { "" }.to_string(),
            classification.tb.as_str().to_string(),
            classification
                .category
                .map(|category| category.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            kind.tags.iter().cloned().collect::<Vec<_>>().join(","),
        ]);
    }
    for index in [1, 2] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Center);
        }
    }
    table.to_string()
}

pub fn format_template_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "No template paths found.".to_string();
    }
    format_filelist(paths)
}

pub fn format_render_outcome(path: &Path, outcome: RenderOutcome) -> String {
    let status = FileStatus::from(outcome);
    format!("  {} {}", status_label(status), path.display())
}
