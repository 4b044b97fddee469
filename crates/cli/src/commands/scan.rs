//! `a11yscan scan` - scan a single URL ad hoc

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use a11yscan_harness::page::{PageConfig, PageHandle};
use a11yscan_harness::report::{ReportConfig, ReportWriter};
use a11yscan_harness::{scan, Browser, Impact, ScanOptions};

use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// URL to scan
    url: String,

    /// Restrict results to these severities (minor, moderate, serious, critical)
    #[arg(long, value_delimiter = ',')]
    impacts: Vec<Impact>,

    /// Rule identifiers to exclusively run
    #[arg(long, value_delimiter = ',')]
    rules: Vec<String>,

    /// Rule identifiers to suppress
    #[arg(long, value_delimiter = ',')]
    exclude_rules: Vec<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: Browser,

    /// Write an HTML report for any violations found
    #[arg(long)]
    report: bool,

    /// Directory for HTML reports
    #[arg(long, default_value = "a11y-reports")]
    report_dir: PathBuf,
}

pub async fn execute(args: ScanArgs, format: OutputFormat) -> anyhow::Result<bool> {
    PageHandle::check_playwright_installed()?;

    let mut page = PageHandle::new(PageConfig {
        browser: args.browser,
        ..Default::default()
    });

    page.goto(&args.url).await?;

    let options = ScanOptions {
        included_impacts: (!args.impacts.is_empty()).then(|| args.impacts.clone()),
        include_rules: (!args.rules.is_empty()).then(|| args.rules.clone()),
        exclude_rules: (!args.exclude_rules.is_empty()).then(|| args.exclude_rules.clone()),
    };

    let result = scan(&page, Some(&options)).await?;

    if result.violations.is_empty() {
        println!("{}", format!("No violations found on {}", args.url).green());
        return Ok(true);
    }

    output::print_list(&result.violations, format);
    println!(
        "{}",
        format!("{} violation(s) found on {}", result.violations.len(), args.url).red()
    );

    if args.report {
        let writer = ReportWriter::new(ReportConfig {
            report_dir: args.report_dir,
        });
        let page_id = page_id_for(&args.url);
        if let Some(path) = writer
            .generate(
                &page_id,
                &result.violations,
                &page,
                &args.url,
                page.browser_name(),
            )
            .await?
        {
            println!("Report: {}", path.display());
        }
    }

    Ok(false)
}

/// Derive a filesystem-safe page identifier from a URL
fn page_id_for(url: &str) -> String {
    let trimmed = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}
