//! Clean runs: removal of fully generated files, dry runs and the
//! clean-then-generate round trip.

use super::test_utils::Fixture;
use hwgen::generation::{clean, generate, CleanRequest, FileStatus, GenerateRequest};
use hwgen::render::{JobContext, RenderEngine, RenderOutcome, TemplateEngine};
use hwgen::RenderError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Engine that refuses every call.
struct NoRender;

impl RenderEngine for NoRender {
    fn render(
        &self,
        _templates: &[PathBuf],
        dest: &Path,
        _context: &JobContext,
    ) -> Result<RenderOutcome, RenderError> {
        Err(RenderError::TemplateNotFound(vec![dest.to_path_buf()]))
    }

    fn patch_in_place(
        &self,
        _templates: &[PathBuf],
        target: &Path,
        _context: &JobContext,
        _ignore_unknown: bool,
    ) -> Result<RenderOutcome, RenderError> {
        Err(RenderError::TemplateNotFound(vec![target.to_path_buf()]))
    }
}

fn snapshot(fixture: &Fixture) -> Vec<(String, Vec<u8>)> {
    fixture
        .generated_files()
        .into_iter()
        .map(|f| {
            let content = std::fs::read(fixture.path(&f)).unwrap();
            (f, content)
        })
        .collect()
}

#[test]
fn clean_removes_full_files_only() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    generate(&tree, Arc::new(TemplateEngine::new()), &GenerateRequest::new("*")).unwrap();
    let patched = std::fs::read_to_string(fixture.path("src/soc_top.sv")).unwrap();

    let summary = clean(&tree, Arc::new(TemplateEngine::new()), &CleanRequest::new("*")).unwrap();

    assert!(fixture.generated_files().is_empty());
    // in-place targets are never touched by clean
    assert_eq!(
        std::fs::read_to_string(fixture.path("src/soc_top.sv")).unwrap(),
        patched
    );
    // spi/doc is full without templates and was never generated
    assert_eq!(summary.count(FileStatus::Removed), 3);
    assert_eq!(summary.count(FileStatus::Absent), 1);
}

#[test]
fn clean_of_missing_files_succeeds() {
    let fixture = Fixture::new();
    let tree = fixture.tree();

    let summary = clean(&tree, Arc::new(TemplateEngine::new()), &CleanRequest::new("hdl")).unwrap();

    assert!(summary
        .reports
        .iter()
        .all(|report| report.status == FileStatus::Absent));
}

#[test]
fn dry_run_never_touches_the_filesystem() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    generate(&tree, Arc::new(TemplateEngine::new()), &GenerateRequest::new("*")).unwrap();
    let before = snapshot(&fixture);

    let mut request = CleanRequest::new("*");
    request.dry_run = true;
    let summary = clean(&tree, Arc::new(TemplateEngine::new()), &request).unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.submitted, 0);
    assert_eq!(summary.reports.len(), 4);
    assert!(summary
        .reports
        .iter()
        .all(|report| report.status == FileStatus::WouldRemove));
    assert_eq!(snapshot(&fixture), before);
}

#[test]
fn clean_then_generate_reproduces_the_file_set() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    generate(&tree, Arc::new(TemplateEngine::new()), &GenerateRequest::new("*")).unwrap();
    let reference = snapshot(&fixture);

    clean(&tree, Arc::new(TemplateEngine::new()), &CleanRequest::new("*")).unwrap();
    generate(&tree, Arc::new(TemplateEngine::new()), &GenerateRequest::new("*")).unwrap();

    assert_eq!(snapshot(&fixture), reference);
}

#[test]
fn clean_never_calls_the_engine() {
    let fixture = Fixture::new();
    let tree = fixture.tree();
    generate(&tree, Arc::new(TemplateEngine::new()), &GenerateRequest::new("*")).unwrap();

    let summary = clean(&tree, Arc::new(NoRender), &CleanRequest::new("*")).unwrap();

    assert_eq!(summary.count(FileStatus::Removed), 3);
    assert!(fixture.generated_files().is_empty());
}
