//! Single-target rendering on the calling thread, outside the hierarchy walk.

use crate::error::GenError;
use crate::hierarchy::FileListSource;
use crate::render::{bind_context, ContextData, JobContext, RenderEngine, RenderOutcome};
use std::path::{Path, PathBuf};
use tracing::info;

/// Render `templates` into `dest`.
pub fn render_to_file(
    source: &dyn FileListSource,
    engine: &dyn RenderEngine,
    templates: &[PathBuf],
    dest: &Path,
    data: Option<&ContextData>,
) -> Result<RenderOutcome, GenError> {
    let context = JobContext::new(bind_context(source.top_name(), data)).for_file(dest);
    info!(top = source.top_name(), path = %dest.display(), "Rendering");
    Ok(engine.render(templates, dest, &context)?)
}

/// Patch the marked regions of the existing file `target`.
pub fn render_in_place(
    source: &dyn FileListSource,
    engine: &dyn RenderEngine,
    templates: &[PathBuf],
    target: &Path,
    ignore_unknown: bool,
    data: Option<&ContextData>,
) -> Result<RenderOutcome, GenError> {
    if !target.exists() {
        return Err(GenError::MissingInplaceFile(target.to_path_buf()));
    }
    let context = JobContext::new(bind_context(source.top_name(), data)).for_file(target);
    info!(top = source.top_name(), path = %target.display(), "Updating inplace");
    Ok(engine.patch_in_place(templates, target, &context, ignore_unknown)?)
}
