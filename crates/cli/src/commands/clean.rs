//! `a11yscan clean` - delete prior reports and screenshots

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use a11yscan_harness::cleanup_reports;

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Directory for HTML reports
    #[arg(long, default_value = "a11y-reports")]
    report_dir: PathBuf,
}

pub fn execute(args: CleanArgs) -> anyhow::Result<bool> {
    let removed = cleanup_reports(&args.report_dir)?;
    println!(
        "{}",
        format!("Removed {} report file(s) and screenshots", removed).green()
    );
    Ok(true)
}
