//! CLI parse: clap types for hwgen. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// hwgen CLI - hardware module file generation
#[derive(Parser)]
#[command(name = "hwgen")]
#[command(about = "Generate, update and clean files of a hardware module hierarchy")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Design manifest and the file lists to work on.
#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Design manifest of the top module
    pub top: PathBuf,

    /// File-list names to work on (wildcards `*` and `?`)
    #[arg(default_value = "*")]
    pub filelist: Vec<String>,

    /// Only file lists tagged with this target (lists without targets always match)
    #[arg(long)]
    pub target: Option<String>,

    /// Deepest hierarchy level to visit, top is level 1
    #[arg(long)]
    pub maxlevel: Option<usize>,

    /// Extra directories searched for `*/hwgen-templates`
    #[arg(short = 'P', long = "path")]
    pub paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the design and generate files
    Gen {
        #[command(flatten)]
        select: SelectArgs,
        /// Maximum number of parallel jobs
        #[arg(long)]
        maxworkers: Option<usize>,
        /// Template data, KEY=VALUE (VALUE parsed as JSON when possible)
        #[arg(short = 'D', long = "define", value_parser = parse_define)]
        define: Vec<(String, Value)>,
    },
    /// Load the design and REMOVE fully generated files
    Cleangen {
        #[command(flatten)]
        select: SelectArgs,
        #[arg(long)]
        maxworkers: Option<usize>,
        /// Only show what would be removed
        #[arg(long)]
        dry_run: bool,
    },
    /// Render templates into one file
    Rendergen {
        /// Design manifest of the top module
        top: PathBuf,
        /// Templates to render; the first existing one is used
        #[arg(required = true)]
        templates: Vec<PathBuf>,
        /// Generated file
        #[arg(long = "out")]
        genfile: PathBuf,
        #[arg(short = 'D', long = "define", value_parser = parse_define)]
        define: Vec<(String, Value)>,
        #[arg(short = 'P', long = "path")]
        paths: Vec<PathBuf>,
    },
    /// Render templates into the marked regions of an existing file
    Renderinplace {
        /// Design manifest of the top module
        top: PathBuf,
        #[arg(required = true)]
        templates: Vec<PathBuf>,
        /// File to update
        #[arg(long = "file")]
        inplacefile: PathBuf,
        /// Keep regions without a matching template section
        #[arg(short = 'i', long)]
        ignore_unknown: bool,
        #[arg(short = 'D', long = "define", value_parser = parse_define)]
        define: Vec<(String, Value)>,
        #[arg(short = 'P', long = "path")]
        paths: Vec<PathBuf>,
    },
    /// Print the output files of the selected file lists
    Filelist {
        #[command(flatten)]
        select: SelectArgs,
    },
    /// Show the resolved file lists per module
    Fileinfo {
        #[command(flatten)]
        select: SelectArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Load and check the design
    Check {
        /// Design manifest of the top module
        top: PathBuf,
        /// Show statistics
        #[arg(long)]
        stat: bool,
    },
    /// List module kinds of a design with their classification
    Ls {
        /// Design manifest
        top: PathBuf,
        /// Limit the list to matching kinds
        pattern: Vec<String>,
        /// Just print names
        #[arg(short, long)]
        names: bool,
        /// Runnable kinds only
        #[arg(short = 't', long = "top")]
        top_only: bool,
        /// Testbench kinds only
        #[arg(short = 'b', long)]
        tb: bool,
        /// Generic testbench kinds only
        #[arg(short, long)]
        generic_tb: bool,
        /// Kinds with a matching tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Information
    Info {
        #[command(subcommand)]
        command: InfoCommands,
    },
}

#[derive(Subcommand)]
pub enum InfoCommands {
    /// Print template directories in search order
    TemplatePaths {
        #[arg(short = 'P', long = "path")]
        paths: Vec<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse `KEY=VALUE`; VALUE is JSON when it parses, a string otherwise.
pub fn parse_define(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid define '{}': expected KEY=VALUE", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid define '{}': empty key", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
