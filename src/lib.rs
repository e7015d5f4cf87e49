//! hwgen: Hardware Module File Generation
//!
//! Walks a module hierarchy described by a design manifest and generates,
//! updates or removes the files of each module's file lists with bounded
//! parallelism. Also classifies module kinds into base categories and decides
//! which of them are directly runnable.

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod hierarchy;
pub mod logging;
pub mod render;

pub use classify::{classify, BaseCategory, Classification, DutBuilder, ModuleClass, TbKind};
pub use error::{GenError, ManifestError, RenderError};
pub use generation::{
    clean, generate, render_in_place, render_to_file, CleanRequest, GenerateRequest,
    GenerationSummary,
};
pub use hierarchy::{FileListSource, ModuleTree};
pub use render::{bind_context, RenderContext, RenderEngine, TemplateEngine};
