//! Generation plan: turns the file-list stream into jobs plus the
//! configuration issues found on the way. Every job is known before any runs.

use crate::error::GenError;
use crate::hierarchy::{GenMode, ModFileList};
use crate::render::{JobContext, RenderContext, RenderEngine, RenderOutcome};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobAction {
    Generate,
    Patch,
    Delete,
}

/// One unit of work against one output file.
#[derive(Debug, Clone)]
pub struct Job {
    pub module: String,
    pub kind: String,
    pub filelist: String,
    pub filepath: PathBuf,
    pub templates: Arc<[PathBuf]>,
    pub action: JobAction,
}

impl Job {
    pub fn run(
        self,
        engine: &dyn RenderEngine,
        context: Arc<RenderContext>,
    ) -> Result<FileReport, GenError> {
        let job_context = JobContext::new(context)
            .for_module(&self.module, &self.kind, &self.filelist)
            .for_file(&self.filepath);
        let status = match self.action {
            JobAction::Generate => engine
                .render(&self.templates, &self.filepath, &job_context)?
                .into(),
            JobAction::Patch => engine
                .patch_in_place(&self.templates, &self.filepath, &job_context, false)?
                .into(),
            JobAction::Delete => match std::fs::remove_file(&self.filepath) {
                Ok(()) => FileStatus::Removed,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileStatus::Absent,
                Err(source) => {
                    return Err(GenError::Remove {
                        path: self.filepath,
                        source,
                    })
                }
            },
        };
        Ok(FileReport {
            path: self.filepath,
            action: self.action,
            status,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum IssueKind {
    /// Full generation requested but no template given
    MissingTemplates,
    /// In-place target does not exist
    MissingInplaceFile(PathBuf),
}

/// Non-fatal configuration error found while planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    pub module: String,
    pub filelist: String,
    pub kind: IssueKind,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingTemplates => write!(
                f,
                "{}: filelist '{}' has no 'template_filepaths'",
                self.module, self.filelist
            ),
            IssueKind::MissingInplaceFile(path) => write!(
                f,
                "{}: inplace file {:?} missing (filelist '{}')",
                self.module, path, self.filelist
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Created,
    Updated,
    Unchanged,
    Removed,
    Absent,
    WouldRemove,
}

impl From<RenderOutcome> for FileStatus {
    fn from(outcome: RenderOutcome) -> Self {
        match outcome {
            RenderOutcome::Created => FileStatus::Created,
            RenderOutcome::Updated => FileStatus::Updated,
            RenderOutcome::Unchanged => FileStatus::Unchanged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub action: JobAction,
    pub status: FileStatus,
}

#[derive(Debug, Default)]
pub struct GenerationPlan {
    pub jobs: Vec<Job>,
    pub issues: Vec<ConfigIssue>,
}

impl GenerationPlan {
    /// Plan full generation and in-place updates.
    pub fn for_generate(stream: impl Iterator<Item = ModFileList>) -> Self {
        let mut plan = Self::default();
        for entry in stream {
            let ModFileList {
                module,
                kind,
                record,
            } = entry;
            match record.gen {
                GenMode::No => {}
                GenMode::Inplace => {
                    let templates: Arc<[PathBuf]> = record.template_filepaths.into();
                    for filepath in record.filepaths {
                        if !filepath.exists() {
                            error!(
                                module = %module,
                                filelist = %record.name,
                                path = %filepath.display(),
                                "Inplace file missing"
                            );
                            plan.issues.push(ConfigIssue {
                                module: module.clone(),
                                filelist: record.name.clone(),
                                kind: IssueKind::MissingInplaceFile(filepath),
                            });
                            continue;
                        }
                        plan.jobs.push(Job {
                            module: module.clone(),
                            kind: kind.clone(),
                            filelist: record.name.clone(),
                            filepath,
                            templates: Arc::clone(&templates),
                            action: JobAction::Patch,
                        });
                    }
                }
                GenMode::Full if record.template_filepaths.is_empty() => {
                    error!(
                        module = %module,
                        filelist = %record.name,
                        "Filelist has no 'template_filepaths'"
                    );
                    plan.issues.push(ConfigIssue {
                        module,
                        filelist: record.name,
                        kind: IssueKind::MissingTemplates,
                    });
                }
                GenMode::Full => {
                    let templates: Arc<[PathBuf]> = record.template_filepaths.into();
                    for filepath in record.filepaths {
                        plan.jobs.push(Job {
                            module: module.clone(),
                            kind: kind.clone(),
                            filelist: record.name.clone(),
                            filepath,
                            templates: Arc::clone(&templates),
                            action: JobAction::Generate,
                        });
                    }
                }
            }
        }
        plan
    }

    /// Plan removal of fully generated files. In-place and untouched lists
    /// never contribute.
    pub fn for_clean(stream: impl Iterator<Item = ModFileList>) -> Self {
        let mut plan = Self::default();
        for entry in stream {
            if entry.record.gen != GenMode::Full {
                continue;
            }
            let templates: Arc<[PathBuf]> = entry.record.template_filepaths.into();
            for filepath in entry.record.filepaths {
                info!("Removing '{}'", filepath.display());
                plan.jobs.push(Job {
                    module: entry.module.clone(),
                    kind: entry.kind.clone(),
                    filelist: entry.record.name.clone(),
                    filepath,
                    templates: Arc::clone(&templates),
                    action: JobAction::Delete,
                });
            }
        }
        plan
    }

    /// Reports for a dry run: what would be removed, without touching anything.
    pub fn dry_run_reports(&self) -> Vec<FileReport> {
        self.jobs
            .iter()
            .map(|job| FileReport {
                path: job.filepath.clone(),
                action: job.action,
                status: FileStatus::WouldRemove,
            })
            .collect()
    }
}

/// Outcome of one generate or clean run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub filelist: String,
    pub submitted: usize,
    pub reports: Vec<FileReport>,
    pub config_issues: Vec<ConfigIssue>,
    pub dry_run: bool,
}

impl GenerationSummary {
    pub fn completed(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.status != FileStatus::WouldRemove)
            .count()
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }

    pub fn has_issues(&self) -> bool {
        !self.config_issues.is_empty()
    }
}
