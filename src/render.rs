//! Rendering: context binding, the engine seam used by generation jobs, the
//! reference template engine and template path discovery.

pub mod context;
pub mod paths;
pub mod template;

pub use context::{bind_context, ContextData, JobContext, RenderContext};
pub use paths::template_paths;
pub use template::TemplateEngine;

use crate::error::RenderError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a render or patch call did to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Turns templates plus a context into file content.
pub trait RenderEngine: Send + Sync {
    /// Render `templates` into `dest`, overwriting it.
    fn render(
        &self,
        templates: &[PathBuf],
        dest: &Path,
        context: &JobContext,
    ) -> Result<RenderOutcome, RenderError>;

    /// Rewrite the marked regions of the existing file `target`.
    fn patch_in_place(
        &self,
        templates: &[PathBuf],
        target: &Path,
        context: &JobContext,
        ignore_unknown: bool,
    ) -> Result<RenderOutcome, RenderError>;
}
