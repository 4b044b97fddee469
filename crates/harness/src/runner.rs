//! Suite orchestration
//!
//! [`ScanContext`] carries a test's most recent scan result to teardown,
//! where a report is generated iff violations were recorded. [`A11yRunner`]
//! loops that flow over a set of page specs: session cleanup, per-spec
//! navigate/scan/store/teardown, then a machine-readable summary.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::cleanup::cleanup_reports;
use crate::error::HarnessResult;
use crate::page::{PageConfig, PageHandle};
use crate::report::{ReportConfig, ReportWriter};
use crate::scan::{scan, ScanResult};
use crate::spec::PageSpec;

/// Per-test result capture, reset for each page.
///
/// Replaces ad hoc mutation of the page object with an explicit structure
/// handed alongside the page handle.
#[derive(Debug, Default)]
pub struct ScanContext {
    stored: Option<(ScanResult, String)>,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the most recent scan result and the owning test's title.
    pub fn store(&mut self, result: ScanResult, test_title: &str) {
        self.stored = Some((result, test_title.to_string()));
    }

    /// Number of violations currently recorded.
    pub fn violation_count(&self) -> usize {
        self.stored
            .as_ref()
            .map(|(result, _)| result.violations.len())
            .unwrap_or(0)
    }

    /// Teardown hook: generate a report iff violations were recorded.
    ///
    /// The stored test title becomes the page identifier, with whitespace
    /// collapsed to hyphens.
    pub async fn finish(
        &mut self,
        page: &PageHandle,
        writer: &ReportWriter,
        base_url: &str,
        browser_name: &str,
    ) -> HarnessResult<Option<PathBuf>> {
        let Some((result, title)) = self.stored.take() else {
            return Ok(None);
        };

        if result.violations.is_empty() {
            return Ok(None);
        }

        let page_id = title.split_whitespace().collect::<Vec<_>>().join("-");
        writer
            .generate(&page_id, &result.violations, page, base_url, browser_name)
            .await
    }
}

/// Result of scanning a single page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub name: String,
    pub url: String,
    pub success: bool,
    pub violations: usize,
    pub report_path: Option<PathBuf>,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<PageResult>,
}

/// Configuration for the suite runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub page: PageConfig,
    pub report: ReportConfig,
    pub base_url: String,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            report: ReportConfig::default(),
            base_url: default_base_url(),
            specs_dir: PathBuf::from("specs"),
            output_dir: PathBuf::from("a11y-results"),
        }
    }
}

/// Target origin: `BASE_URL` from the environment, with a placeholder
/// default.
pub fn default_base_url() -> String {
    env::var("BASE_URL").unwrap_or_else(|_| "https://example.com".to_string())
}

/// Accessibility suite runner
pub struct A11yRunner {
    config: RunnerConfig,
    writer: ReportWriter,
}

impl A11yRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        let writer = ReportWriter::new(config.report.clone());
        Self { config, writer }
    }

    /// Run every spec in the specs directory
    pub async fn run_all(&self) -> HarnessResult<SuiteResult> {
        let specs = PageSpec::load_all(&self.config.specs_dir)?;
        self.run_specs(&specs).await
    }

    /// Run specs matching a tag
    pub async fn run_tagged(&self, tag: &str) -> HarnessResult<SuiteResult> {
        let specs = PageSpec::load_all(&self.config.specs_dir)?;
        let filtered: Vec<PageSpec> = specs
            .into_iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .collect();
        self.run_specs(&filtered).await
    }

    /// Run a single spec by name
    pub async fn run_named(&self, name: &str) -> HarnessResult<SuiteResult> {
        let specs = PageSpec::load_all(&self.config.specs_dir)?;
        let matched: Vec<PageSpec> = specs.into_iter().filter(|s| s.name == name).collect();
        self.run_specs(&matched).await
    }

    /// Run a list of page specs
    pub async fn run_specs(&self, specs: &[PageSpec]) -> HarnessResult<SuiteResult> {
        PageHandle::check_playwright_installed()?;
        cleanup_reports(self.writer.report_dir())?;

        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        info!("Scanning {} page(s)...", specs.len());

        for spec in specs {
            let result = self.run_spec(spec).await;

            if result.success {
                passed += 1;
                info!(
                    "✓ {} - {} violation(s) ({} ms)",
                    result.name, result.violations, result.duration_ms
                );
            } else {
                failed += 1;
                error!(
                    "✗ {} - {}",
                    result.name,
                    result
                        .error
                        .as_deref()
                        .map(String::from)
                        .unwrap_or_else(|| format!("{} violation(s)", result.violations))
                );
            }

            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Scan results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteResult {
            total: specs.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    /// Scan one page: navigate, scan, store, teardown.
    ///
    /// Failures are captured in the returned result; one page can never
    /// abort the rest of the suite.
    pub async fn run_spec(&self, spec: &PageSpec) -> PageResult {
        let start = Instant::now();
        let url = spec.url(&self.config.base_url);
        let mut page = PageHandle::new(self.config.page.clone());
        let mut context = ScanContext::new();
        let mut error: Option<String> = None;

        match page.goto(&url).await {
            Ok(()) => match scan(&page, spec.scan.as_ref()).await {
                Ok(result) => context.store(result, &spec.name),
                Err(e) => error = Some(e.to_string()),
            },
            Err(e) => error = Some(e.to_string()),
        }

        let violations = context.violation_count();

        // Teardown: report iff violations. Report I/O failures fail the
        // page rather than being swallowed.
        let report_path = match context
            .finish(
                &page,
                &self.writer,
                &self.config.base_url,
                page.browser_name(),
            )
            .await
        {
            Ok(path) => path,
            Err(e) => {
                error.get_or_insert_with(|| e.to_string());
                None
            }
        };

        let success = error.is_none() && (violations == 0 || !spec.fail_on_violations);

        PageResult {
            name: spec.name.clone(),
            url,
            success,
            violations,
            report_path,
            duration_ms: start.elapsed().as_millis() as u64,
            error,
        }
    }

    /// Write the suite summary to JSON
    pub fn write_results(&self, results: &SuiteResult) -> HarnessResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("a11y-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }

    pub fn report_dir(&self) -> &Path {
        self.writer.report_dir()
    }
}

impl Default for A11yRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Impact, Violation, ViolationNode};

    fn result_with_violations(count: usize) -> ScanResult {
        let violations = (0..count)
            .map(|_| Violation {
                id: "image-alt".to_string(),
                description: String::new(),
                help: String::new(),
                help_url: String::new(),
                impact: Some(Impact::Critical),
                nodes: vec![ViolationNode {
                    target: vec!["img#logo".to_string()],
                    html: "<img id=\"logo\">".to_string(),
                    failure_summary: "Fix: add alt text".to_string(),
                }],
            })
            .collect();

        ScanResult {
            violations,
            url: None,
        }
    }

    #[test]
    fn context_counts_stored_violations() {
        let mut ctx = ScanContext::new();
        assert_eq!(ctx.violation_count(), 0);

        ctx.store(result_with_violations(2), "Homepage should be accessible");
        assert_eq!(ctx.violation_count(), 2);
    }

    #[tokio::test]
    async fn finish_without_violations_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(ReportConfig {
            report_dir: dir.path().join("a11y-reports"),
        });
        let page = PageHandle::new(PageConfig::default());

        let mut ctx = ScanContext::new();
        ctx.store(result_with_violations(0), "Clean page");

        let path = ctx
            .finish(&page, &writer, "https://example.com", "chromium")
            .await
            .unwrap();

        assert!(path.is_none());
        assert!(!dir.path().join("a11y-reports").exists());
    }

    #[tokio::test]
    async fn finish_hyphenates_the_test_title() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(ReportConfig {
            report_dir: dir.path().to_path_buf(),
        });
        let page = PageHandle::new(PageConfig::default());

        let mut ctx = ScanContext::new();
        ctx.store(result_with_violations(1), "Homepage should be accessible");

        let path = ctx
            .finish(&page, &writer, "https://example.com", "chromium")
            .await
            .unwrap()
            .unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("Homepage-should-be-accessible-chromium-"));
    }
}
