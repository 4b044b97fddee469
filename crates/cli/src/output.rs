//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use a11yscan_harness::{PageResult, PageSpec, Violation};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    if items.is_empty() {
        println!("No items found.");
        return;
    }

    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            for item in items {
                table.add_row(item.row());
            }

            println!("{table}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
    }
}

impl TableDisplay for PageResult {
    fn headers() -> Vec<&'static str> {
        vec!["Page", "URL", "Status", "Violations", "Report", "Duration"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.url.clone(),
            if self.success {
                "pass".to_string()
            } else {
                self.error.clone().unwrap_or_else(|| "fail".to_string())
            },
            self.violations.to_string(),
            self.report_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            format!("{} ms", self.duration_ms),
        ]
    }
}

impl TableDisplay for PageSpec {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Path", "Tags", "Description"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.path.clone(),
            self.tags.join(", "),
            self.description.clone(),
        ]
    }
}

impl TableDisplay for Violation {
    fn headers() -> Vec<&'static str> {
        vec!["Rule", "Impact", "Nodes", "Help"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.impact
                .map(|i| i.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.nodes.len().to_string(),
            self.help.clone(),
        ]
    }
}
