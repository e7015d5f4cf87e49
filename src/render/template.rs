//! Reference rendering engine.
//!
//! Full generation reads the first existing template and replaces `${name}`
//! placeholders from the job context (`$$` writes a literal `$`). In-place
//! updates rewrite the body between `GENERATE INPLACE BEGIN <name>` and
//! `GENERATE INPLACE END <name>` lines with the section `<name>`, declared in
//! a template between `@@ def <name>` and `@@ enddef`.

use crate::error::RenderError;
use crate::render::context::JobContext;
use crate::render::{RenderEngine, RenderOutcome};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const INPLACE_BEGIN: &str = "GENERATE INPLACE BEGIN";
const INPLACE_END: &str = "GENERATE INPLACE END";
const SECTION_BEGIN: &str = "@@ def";
const SECTION_END: &str = "@@ enddef";

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

struct Section {
    body: String,
    template: PathBuf,
}

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    fn write_if_changed(dest: &Path, content: &str) -> Result<RenderOutcome, RenderError> {
        let io_err = |source| RenderError::Io {
            path: dest.to_path_buf(),
            source,
        };
        let outcome = match fs::read_to_string(dest) {
            Ok(existing) if existing == content => return Ok(RenderOutcome::Unchanged),
            Ok(_) => RenderOutcome::Updated,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => RenderOutcome::Created,
            Err(e) => return Err(io_err(e)),
        };
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(dest, content).map_err(io_err)?;
        Ok(outcome)
    }
}

impl RenderEngine for TemplateEngine {
    fn render(
        &self,
        templates: &[PathBuf],
        dest: &Path,
        context: &JobContext,
    ) -> Result<RenderOutcome, RenderError> {
        let template = templates
            .iter()
            .find(|path| path.is_file())
            .ok_or_else(|| RenderError::TemplateNotFound(templates.to_vec()))?;
        let text = fs::read_to_string(template).map_err(|source| RenderError::Io {
            path: template.clone(),
            source,
        })?;
        let content = substitute(&text, context, template)?;
        Self::write_if_changed(dest, &content)
    }

    fn patch_in_place(
        &self,
        templates: &[PathBuf],
        target: &Path,
        context: &JobContext,
        ignore_unknown: bool,
    ) -> Result<RenderOutcome, RenderError> {
        let sections = load_sections(templates)?;
        let original = fs::read_to_string(target).map_err(|source| RenderError::Io {
            path: target.to_path_buf(),
            source,
        })?;
        let lines: Vec<&str> = original.split_inclusive('\n').collect();

        let mut out = String::with_capacity(original.len());
        let mut index = 0usize;
        while index < lines.len() {
            let line = lines[index];
            out.push_str(line);
            let Some(name) = marker_name(line, INPLACE_BEGIN) else {
                index += 1;
                continue;
            };
            let begin_line = index + 1;
            let end = lines[index + 1..]
                .iter()
                .position(|candidate| marker_name(candidate, INPLACE_END) == Some(name))
                .map(|offset| index + 1 + offset)
                .ok_or_else(|| RenderError::UnclosedMarker {
                    name: name.to_string(),
                    file: target.to_path_buf(),
                    line: begin_line,
                })?;

            match sections.get(name) {
                Some(section) => {
                    let body = substitute(&section.body, context, &section.template)?;
                    out.push_str(&indent(&body, leading_whitespace(line)));
                }
                None if ignore_unknown => {
                    for kept in &lines[index + 1..end] {
                        out.push_str(kept);
                    }
                }
                None => {
                    return Err(RenderError::UnknownMarker {
                        name: name.to_string(),
                        file: target.to_path_buf(),
                        line: begin_line,
                    })
                }
            }
            out.push_str(lines[end]);
            index = end + 1;
        }

        Self::write_if_changed(target, &out)
    }
}

/// Replace `${name}` placeholders.
pub fn substitute(text: &str, context: &JobContext, template: &Path) -> Result<String, RenderError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some((name, tail)) = after
            .strip_prefix('{')
            .and_then(|braced| braced.split_once('}'))
        {
            let name = name.trim();
            let value = context
                .lookup(name)
                .ok_or_else(|| RenderError::UndefinedVariable {
                    name: name.to_string(),
                    template: template.to_path_buf(),
                })?;
            out.push_str(&value);
            rest = tail;
        } else {
            out.push('$');
            rest = after;
        }
    }
    out.push_str(rest);
    Ok(out)
}

fn load_sections(templates: &[PathBuf]) -> Result<HashMap<String, Section>, RenderError> {
    let existing: Vec<&PathBuf> = templates.iter().filter(|path| path.is_file()).collect();
    if existing.is_empty() {
        return Err(RenderError::TemplateNotFound(templates.to_vec()));
    }
    let mut sections = HashMap::new();
    for template in existing {
        let text = fs::read_to_string(template).map_err(|source| RenderError::Io {
            path: template.clone(),
            source,
        })?;
        let mut current: Option<(String, String)> = None;
        for line in text.split_inclusive('\n') {
            let trimmed = line.trim();
            if let Some((name, body)) = current.take() {
                if trimmed == SECTION_END {
                    sections.entry(name).or_insert(Section {
                        body,
                        template: template.clone(),
                    });
                } else {
                    current = Some((name, body + line));
                }
            } else if let Some(name) = trimmed.strip_prefix(SECTION_BEGIN) {
                current = Some((name.trim().to_string(), String::new()));
            }
        }
    }
    Ok(sections)
}

/// Name following `marker` on `line`, if the marker is present.
fn marker_name<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let (_, after) = line.split_once(marker)?;
    after.split_whitespace().next()
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

fn indent(body: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(body.len());
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            out.push_str(prefix);
        }
        out.push_str(line);
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
