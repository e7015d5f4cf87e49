//! CLI domain: parse, route, output, and presentation only.
//! No orchestration; the route table dispatches to the generation services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{parse_define, Cli, Commands, InfoCommands, OutputFormat, SelectArgs};
pub use presentation::{
    format_check_result, format_fileinfo_json, format_fileinfo_text, format_filelist,
    format_generation_summary, format_kind_names, format_kind_table, format_render_outcome,
    format_template_paths,
};
pub use route::RunContext;
