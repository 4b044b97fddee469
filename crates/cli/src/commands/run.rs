//! `a11yscan run` - run the accessibility suite from page specs

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use colored::Colorize;

use a11yscan_harness::page::PageConfig;
use a11yscan_harness::report::ReportConfig;
use a11yscan_harness::runner::RunnerConfig;
use a11yscan_harness::{A11yRunner, Browser};

use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to page specs directory
    #[arg(short, long, default_value = "specs")]
    specs: PathBuf,

    /// Run only specs matching this tag
    #[arg(short, long)]
    tag: Option<String>,

    /// Target origin for scans
    #[arg(long, env = "BASE_URL", default_value = "https://example.com")]
    base_url: String,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long, default_value = "chromium")]
    browser: Browser,

    /// Navigation deadline in seconds
    #[arg(long, default_value = "30")]
    navigation_timeout: u64,

    /// Directory for HTML reports
    #[arg(long, default_value = "a11y-reports")]
    report_dir: PathBuf,

    /// Output directory for the JSON summary
    #[arg(short, long, default_value = "a11y-results")]
    output: PathBuf,
}

pub async fn execute(args: RunArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let config = RunnerConfig {
        page: PageConfig {
            browser: args.browser,
            navigation_timeout: Duration::from_secs(args.navigation_timeout),
            ..Default::default()
        },
        report: ReportConfig {
            report_dir: args.report_dir,
        },
        base_url: args.base_url,
        specs_dir: args.specs,
        output_dir: args.output,
    };

    let runner = A11yRunner::with_config(config);

    let results = match &args.tag {
        Some(tag) => runner.run_tagged(tag).await?,
        None => runner.run_all().await?,
    };

    runner.write_results(&results)?;

    output::print_list(&results.results, format);

    if results.failed == 0 {
        println!(
            "{}",
            format!("{} page(s) passed ({} ms)", results.passed, results.duration_ms).green()
        );
        Ok(true)
    } else {
        println!(
            "{}",
            format!(
                "{} of {} page(s) failed ({} ms)",
                results.failed, results.total, results.duration_ms
            )
            .red()
        );
        Ok(false)
    }
}
