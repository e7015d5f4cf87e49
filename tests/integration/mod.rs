//! Integration tests for hierarchical file generation

mod classification;
mod clean_cycle;
mod cli_commands;
mod hierarchy_walk;
mod render_single;
pub mod test_utils;
