//! CLI subcommands

pub mod clean;
pub mod list;
pub mod run;
pub mod scan;
