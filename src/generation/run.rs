//! Generate and clean entry points: bind context, plan, execute.
//! CLI and other callers use these only.

use crate::error::GenError;
use crate::generation::executor::GenerationExecutor;
use crate::generation::plan::{GenerationPlan, GenerationSummary};
use crate::hierarchy::{FileListQuery, FileListSource};
use crate::render::{bind_context, ContextData, RenderEngine};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// File-list name pattern
    pub filelist: String,
    pub target: Option<String>,
    pub max_level: Option<usize>,
    pub max_workers: Option<usize>,
    pub data: Option<ContextData>,
}

impl GenerateRequest {
    pub fn new(filelist: impl Into<String>) -> Self {
        Self {
            filelist: filelist.into(),
            target: None,
            max_level: None,
            max_workers: None,
            data: None,
        }
    }

    fn query(&self) -> FileListQuery {
        FileListQuery::new(self.filelist.clone())
            .with_target(self.target.clone())
            .with_max_level(self.max_level)
    }
}

#[derive(Debug, Clone)]
pub struct CleanRequest {
    pub filelist: String,
    pub target: Option<String>,
    pub max_level: Option<usize>,
    pub max_workers: Option<usize>,
    pub dry_run: bool,
    pub data: Option<ContextData>,
}

impl CleanRequest {
    pub fn new(filelist: impl Into<String>) -> Self {
        Self {
            filelist: filelist.into(),
            target: None,
            max_level: None,
            max_workers: None,
            dry_run: false,
            data: None,
        }
    }

    fn query(&self) -> FileListQuery {
        FileListQuery::new(self.filelist.clone())
            .with_target(self.target.clone())
            .with_max_level(self.max_level)
    }
}

/// Generate all full and in-place file lists of the hierarchy below top.
///
/// Configuration issues are logged and returned in the summary; the first
/// failing job (in submission order) aborts the run.
pub fn generate(
    source: &dyn FileListSource,
    engine: Arc<dyn RenderEngine>,
    request: &GenerateRequest,
) -> Result<GenerationSummary, GenError> {
    let context = bind_context(source.top_name(), request.data.as_ref());
    info!(
        top = source.top_name(),
        filelist = %request.filelist,
        "Generating"
    );

    let plan = GenerationPlan::for_generate(source.iter_filelists(&request.query()));
    let submitted = plan.jobs.len();
    let reports = GenerationExecutor::new(request.max_workers).execute(plan.jobs, engine, context)?;

    Ok(GenerationSummary {
        filelist: request.filelist.clone(),
        submitted,
        reports,
        config_issues: plan.issues,
        dry_run: false,
    })
}

/// Remove every fully generated file of the hierarchy below top.
pub fn clean(
    source: &dyn FileListSource,
    engine: Arc<dyn RenderEngine>,
    request: &CleanRequest,
) -> Result<GenerationSummary, GenError> {
    let context = bind_context(source.top_name(), request.data.as_ref());
    info!(
        top = source.top_name(),
        filelist = %request.filelist,
        dry_run = request.dry_run,
        "Cleaning"
    );

    let plan = GenerationPlan::for_clean(source.iter_filelists(&request.query()));
    if request.dry_run {
        info!("DRY RUN. Nothing done.");
        return Ok(GenerationSummary {
            filelist: request.filelist.clone(),
            submitted: 0,
            reports: plan.dry_run_reports(),
            config_issues: plan.issues,
            dry_run: true,
        });
    }

    let submitted = plan.jobs.len();
    let reports = GenerationExecutor::new(request.max_workers).execute(plan.jobs, engine, context)?;

    Ok(GenerationSummary {
        filelist: request.filelist.clone(),
        submitted,
        reports,
        config_issues: plan.issues,
        dry_run: false,
    })
}
