//! CLI output: error mapping from domain errors to the CLI surface.

use crate::error::GenError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &GenError) -> String {
    match e {
        GenError::Manifest(inner) => format!("Design error: {}", inner),
        GenError::Render(inner) => format!("Render error: {}", inner),
        other => other.to_string(),
    }
}
