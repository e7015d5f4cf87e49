//! Rendering context: bound once per run from the top module and caller data,
//! then shared read-only by every job.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Extra key/value data made available to templates.
pub type ContextData = BTreeMap<String, Value>;

/// Run-wide rendering context.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    top: String,
    data: ContextData,
}

impl RenderContext {
    pub fn top(&self) -> &str {
        &self.top
    }

    pub fn data(&self) -> &ContextData {
        &self.data
    }
}

/// Bind the top module and extra data into a shared context.
///
/// Must run before any job is created; the result is never mutated afterwards.
pub fn bind_context(top: &str, data: Option<&ContextData>) -> Arc<RenderContext> {
    Arc::new(RenderContext {
        top: top.to_string(),
        data: data.cloned().unwrap_or_default(),
    })
}

/// Context seen by one render or patch call: the shared run context plus
/// the module and file the job works on.
#[derive(Debug, Clone)]
pub struct JobContext {
    shared: Arc<RenderContext>,
    module: Option<String>,
    kind: Option<String>,
    filelist: Option<String>,
    filepath: Option<PathBuf>,
}

impl JobContext {
    pub fn new(shared: Arc<RenderContext>) -> Self {
        Self {
            shared,
            module: None,
            kind: None,
            filelist: None,
            filepath: None,
        }
    }

    pub fn for_module(mut self, module: &str, kind: &str, filelist: &str) -> Self {
        self.module = Some(module.to_string());
        self.kind = Some(kind.to_string());
        self.filelist = Some(filelist.to_string());
        self
    }

    pub fn for_file(mut self, filepath: &Path) -> Self {
        self.filepath = Some(filepath.to_path_buf());
        self
    }

    pub fn shared(&self) -> &RenderContext {
        &self.shared
    }

    /// Resolve a template variable. Job variables shadow caller data, caller
    /// data shadows `top`.
    pub fn lookup(&self, name: &str) -> Option<String> {
        let job_value = match name {
            "mod" => self.module.clone(),
            "kind" => self.kind.clone(),
            "filelist" => self.filelist.clone(),
            "filepath" => self
                .filepath
                .as_ref()
                .map(|path| path.to_string_lossy().to_string()),
            _ => None,
        };
        job_value
            .or_else(|| self.shared.data.get(name).map(value_to_string))
            .or_else(|| (name == "top").then(|| self.shared.top.clone()))
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
