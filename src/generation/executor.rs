//! Generation executor: runs planned jobs on a multi-threaded tokio runtime.
//! Every job is submitted before the first join; handles are joined in
//! submission order so the first submitted failure is the one reported.
//! Jobs are blocking file work, so they run on the blocking pool, which is
//! capped at the worker count.

use crate::error::GenError;
use crate::generation::plan::{FileReport, Job};
use crate::render::{RenderContext, RenderEngine};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

pub struct GenerationExecutor {
    max_workers: Option<usize>,
}

impl GenerationExecutor {
    pub fn new(max_workers: Option<usize>) -> Self {
        Self { max_workers }
    }

    /// Worker count used when the caller does not choose one.
    pub fn default_workers() -> usize {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }

    pub fn workers(&self) -> usize {
        self.max_workers
            .filter(|n| *n > 0)
            .unwrap_or_else(Self::default_workers)
    }

    fn runtime(workers: usize) -> Result<Runtime, GenError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(GenError::Runtime(
                "Cannot run generation from within an async runtime".to_string(),
            ));
        }
        Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name("hwgen-worker")
            .build()
            .map_err(|e| GenError::Runtime(format!("Failed to create runtime: {}", e)))
    }

    pub fn execute(
        &self,
        jobs: Vec<Job>,
        engine: Arc<dyn RenderEngine>,
        context: Arc<RenderContext>,
    ) -> Result<Vec<FileReport>, GenError> {
        if jobs.is_empty() {
            debug!("No jobs to run");
            return Ok(Vec::new());
        }

        let total = jobs.len();
        let workers = self.workers().min(total);
        let rt = Self::runtime(workers)?;
        info!(jobs = total, workers, "generation_started");

        let handles: Vec<(PathBuf, JoinHandle<Result<FileReport, GenError>>)> = jobs
            .into_iter()
            .map(|job| {
                let path = job.filepath.clone();
                let engine = Arc::clone(&engine);
                let context = Arc::clone(&context);
                let handle = rt.spawn_blocking(move || job.run(engine.as_ref(), context));
                (path, handle)
            })
            .collect();

        // Every handle is awaited, even after a failure: submitted jobs are
        // never cancelled, and queued blocking tasks would be dropped with
        // the runtime.
        let mut reports = Vec::with_capacity(total);
        let mut failure: Option<GenError> = None;
        for (path, handle) in handles {
            let outcome = match rt.block_on(handle) {
                Ok(result) => result,
                Err(join_err) if join_err.is_panic() => {
                    error!(path = %path.display(), "generation_failed: job panicked");
                    Err(GenError::JobPanicked(path))
                }
                Err(_) => Err(GenError::PoolClosed(path)),
            };
            if failure.is_some() {
                continue;
            }
            match outcome {
                Ok(report) => {
                    debug!(path = %report.path.display(), status = ?report.status, "File done");
                    reports.push(report);
                }
                Err(err) => {
                    error!(error = %err, "generation_failed");
                    failure = Some(err);
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => {
                info!(jobs = total, "generation_completed");
                Ok(reports)
            }
        }
    }
}
