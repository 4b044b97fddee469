//! Report generation integration tests
//!
//! Exercises the report writer against fixture violations in a sandboxed
//! report directory. No browser is available here, so every screenshot
//! attempt fails; the reports must still come out complete.

use std::fs;

use a11yscan_harness::cleanup::cleanup_reports;
use a11yscan_harness::page::{PageConfig, PageHandle};
use a11yscan_harness::report::{ReportConfig, ReportWriter};
use a11yscan_harness::scan::{Impact, Violation, ViolationNode};

fn image_alt_violation() -> Violation {
    Violation {
        id: "image-alt".to_string(),
        description: "Ensures <img> elements have alternate text".to_string(),
        help: "Images must have alternate text".to_string(),
        help_url: "https://dequeuniversity.com/rules/axe/4.4/image-alt".to_string(),
        impact: Some(Impact::Critical),
        nodes: vec![ViolationNode {
            target: vec!["img#logo".to_string()],
            html: "<img id=\"logo\">".to_string(),
            failure_summary: "Fix: add alt text".to_string(),
        }],
    }
}

fn writer_in(dir: &std::path::Path) -> ReportWriter {
    ReportWriter::new(ReportConfig {
        report_dir: dir.join("a11y-reports"),
    })
}

fn offline_page() -> PageHandle {
    PageHandle::new(PageConfig::default())
}

#[tokio::test]
async fn empty_violations_produce_no_report() {
    let sandbox = tempfile::tempdir().unwrap();
    let writer = writer_in(sandbox.path());

    let path = writer
        .generate("Homepage", &[], &offline_page(), "https://example.com", "chromium")
        .await
        .unwrap();

    assert!(path.is_none());
    assert!(
        !sandbox.path().join("a11y-reports").exists(),
        "no directories may be created for an empty scan"
    );
}

#[tokio::test]
async fn violations_produce_one_named_report() {
    let sandbox = tempfile::tempdir().unwrap();
    let writer = writer_in(sandbox.path());

    let path = writer
        .generate(
            "Homepage",
            &[image_alt_violation()],
            &offline_page(),
            "https://example.com",
            "chromium",
        )
        .await
        .unwrap()
        .expect("report path");

    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("Homepage-chromium-"));
    assert!(file_name.ends_with(".html"));

    let html_files: Vec<_> = fs::read_dir(sandbox.path().join("a11y-reports"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "html").unwrap_or(false))
        .collect();
    assert_eq!(html_files.len(), 1);

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.contains("1. image-alt"));
    assert!(html.contains(r#"<span class="impact critical">critical</span>"#));
    assert!(html.contains("WCAG 1.1.1 Non-text Content"));
    assert!(html.contains("Violations Found: 1"));
}

#[tokio::test]
async fn html_snippets_render_as_literal_text() {
    let sandbox = tempfile::tempdir().unwrap();
    let writer = writer_in(sandbox.path());

    let mut violation = image_alt_violation();
    violation.nodes[0].html = "<script>alert('pwned')</script>".to_string();

    let path = writer
        .generate(
            "Injected",
            &[violation],
            &offline_page(),
            "https://example.com",
            "chromium",
        )
        .await
        .unwrap()
        .expect("report path");

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.contains("&lt;script&gt;alert(&#039;pwned&#039;)&lt;/script&gt;"));
    assert!(!html.contains("<script>alert('pwned')</script>"));
}

#[tokio::test]
async fn screenshot_failures_degrade_single_nodes_only() {
    let sandbox = tempfile::tempdir().unwrap();
    let writer = writer_in(sandbox.path());

    let mut violation = image_alt_violation();
    violation.nodes.push(ViolationNode {
        target: vec!["img#banner".to_string()],
        html: "<img id=\"banner\">".to_string(),
        failure_summary: "Fix: add alt text to the banner".to_string(),
    });

    let path = writer
        .generate(
            "Gallery",
            &[violation],
            &offline_page(),
            "https://example.com",
            "chromium",
        )
        .await
        .unwrap()
        .expect("report generation must survive screenshot failures");

    let html = fs::read_to_string(&path).unwrap();

    // Both nodes rendered with their Code and Failure Summary tabs.
    assert!(html.contains("image-alt-node-0-code"));
    assert!(html.contains("image-alt-node-1-code"));
    assert!(html.contains("Fix: add alt text to the banner"));

    // No Screenshot tab anywhere: every capture failed.
    assert!(!html.contains(">Screenshot</button>"));
    assert!(!html.contains("Element Screenshot:"));
}

#[tokio::test]
async fn unknown_rules_fall_back_to_generic_reference() {
    let sandbox = tempfile::tempdir().unwrap();
    let writer = writer_in(sandbox.path());

    let mut violation = image_alt_violation();
    violation.id = "custom-made-up-rule".to_string();

    let path = writer
        .generate(
            "Custom",
            &[violation],
            &offline_page(),
            "https://example.com",
            "chromium",
        )
        .await
        .unwrap()
        .expect("report path");

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.contains("Unknown WCAG Criteria"));
    assert!(html.contains("https://www.w3.org/WAI/WCAG21/quickref/"));
}

#[test]
fn cleanup_is_idempotent() {
    let sandbox = tempfile::tempdir().unwrap();
    let report_dir = sandbox.path().join("a11y-reports");

    fs::create_dir_all(report_dir.join("screenshots/Homepage")).unwrap();
    fs::write(report_dir.join("Homepage-chromium-1.html"), "<html></html>").unwrap();
    fs::write(
        report_dir.join("screenshots/Homepage/image-alt-node-0-1.png"),
        [0u8; 8],
    )
    .unwrap();

    assert_eq!(cleanup_reports(&report_dir).unwrap(), 1);
    assert_eq!(cleanup_reports(&report_dir).unwrap(), 0);
    assert!(!report_dir.join("screenshots").exists());
}
