//! Generation orchestration: plan jobs from the file-list stream, run them on
//! a worker pool, and the single-target renderers.

pub mod executor;
pub mod plan;
pub mod render;
pub mod run;

pub use executor::GenerationExecutor;
pub use plan::{
    ConfigIssue, FileReport, FileStatus, GenerationPlan, GenerationSummary, IssueKind, Job,
    JobAction,
};
pub use render::{render_in_place, render_to_file};
pub use run::{clean, generate, CleanRequest, GenerateRequest};
