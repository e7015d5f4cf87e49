//! Error types for the hwgen generation and classification system.

use std::path::PathBuf;
use thiserror::Error;

/// Rendering-engine errors (template lookup, substitution, in-place markers)
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("None of the templates {0:?} found")]
    TemplateNotFound(Vec<PathBuf>),

    #[error("Undefined variable '{name}' in template {template:?}")]
    UndefinedVariable { name: String, template: PathBuf },

    #[error("Unknown inplace marker '{name}' in {file:?} (line {line})")]
    UnknownMarker {
        name: String,
        file: PathBuf,
        line: usize,
    },

    #[error("Inplace marker '{name}' in {file:?} (line {line}) is never closed")]
    UnclosedMarker {
        name: String,
        file: PathBuf,
        line: usize,
    },

    #[error("Render I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Design-manifest errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Module '{module}' uses unknown kind '{kind}'")]
    UnknownKind { module: String, kind: String },

    #[error("Kind '{kind}' extends unknown kind '{parent}'")]
    UnknownParentKind { kind: String, parent: String },

    #[error("Kind extension cycle through '{0}'")]
    KindCycle(String),

    #[error("Module hierarchy cycle through '{0}'")]
    HierarchyCycle(String),
}

/// Top-level errors surfaced by the orchestrators and the CLI
#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Inplace file {0:?} missing")]
    MissingInplaceFile(PathBuf),

    #[error("Job for {0:?} panicked")]
    JobPanicked(PathBuf),

    #[error("Worker pool closed before job for {0:?} completed")]
    PoolClosed(PathBuf),

    #[error("Worker runtime error: {0}")]
    Runtime(String),

    #[error("Failed to remove {path:?}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for GenError {
    fn from(err: config::ConfigError) -> Self {
        GenError::ConfigError(err.to_string())
    }
}
