//! `a11yscan list` - list discovered page specs

use std::path::PathBuf;

use clap::Args;

use a11yscan_harness::PageSpec;

use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path to page specs directory
    #[arg(short, long, default_value = "specs")]
    specs: PathBuf,

    /// Only show specs matching this tag
    #[arg(short, long)]
    tag: Option<String>,
}

pub fn execute(args: ListArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let mut specs = PageSpec::load_all(&args.specs)?;

    if let Some(tag) = &args.tag {
        specs.retain(|s| s.tags.iter().any(|t| t == tag));
    }

    output::print_list(&specs, format);
    Ok(true)
}
