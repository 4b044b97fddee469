//! Accessibility scan invoker
//!
//! Translates [`ScanOptions`] into axe-core `axe.run` options and runs the
//! engine against the page's current DOM. Engine failures propagate to the
//! caller untouched; there are no retries.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::HarnessResult;
use crate::page::PageHandle;

/// Violation severity, as reported by axe-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Serious => "serious",
            Impact::Critical => "critical",
        }
    }
}

impl std::str::FromStr for Impact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minor" => Ok(Impact::Minor),
            "moderate" => Ok(Impact::Moderate),
            "serious" => Ok(Impact::Serious),
            "critical" => Ok(Impact::Critical),
            other => Err(format!("unknown impact: {}", other)),
        }
    }
}

/// Options controlling which rules a scan runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Restrict analysis to the given severities.
    ///
    /// Applied as an axe *tag* filter, mirroring how the engine is
    /// configured upstream; impacts and tags are distinct taxonomies in
    /// axe, so unknown tags simply match no rules. Kept as-is for parity.
    #[serde(default)]
    pub included_impacts: Option<Vec<Impact>>,

    /// Rule identifiers to suppress from analysis.
    #[serde(default)]
    pub exclude_rules: Option<Vec<String>>,

    /// Rule identifiers to exclusively run.
    #[serde(default)]
    pub include_rules: Option<Vec<String>>,
}

impl ScanOptions {
    /// Build the `axe.run` options object.
    pub fn to_axe_options(&self) -> Value {
        let mut opts = serde_json::Map::new();

        if let Some(impacts) = &self.included_impacts {
            let values: Vec<&str> = impacts.iter().map(Impact::as_str).collect();
            opts.insert("runOnly".to_string(), json!({ "type": "tag", "values": values }));
        }

        // Exclusive rule list wins over the impact filter, matching the
        // order the upstream builder applies them in.
        if let Some(rules) = &self.include_rules {
            opts.insert("runOnly".to_string(), json!({ "type": "rule", "values": rules }));
        }

        if let Some(rules) = &self.exclude_rules {
            let disabled: serde_json::Map<String, Value> = rules
                .iter()
                .map(|rule| (rule.clone(), json!({ "enabled": false })))
                .collect();
            opts.insert("rules".to_string(), Value::Object(disabled));
        }

        Value::Object(opts)
    }
}

/// One offending element within a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationNode {
    /// Selector chain identifying the element; the first entry is the
    /// primary selector.
    #[serde(default)]
    pub target: Vec<String>,

    /// HTML snippet of the offending markup.
    #[serde(default)]
    pub html: String,

    /// Why this node failed the rule.
    #[serde(default)]
    pub failure_summary: String,
}

/// A single rule violation with its affected nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub help: String,

    #[serde(default)]
    pub help_url: String,

    #[serde(default)]
    pub impact: Option<Impact>,

    #[serde(default)]
    pub nodes: Vec<ViolationNode>,
}

/// Raw scan outcome, in engine order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    #[serde(default)]
    pub violations: Vec<Violation>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Run an axe-core scan against the page's current DOM.
pub async fn scan(page: &PageHandle, options: Option<&ScanOptions>) -> HarnessResult<ScanResult> {
    let axe_options = options
        .map(ScanOptions::to_axe_options)
        .unwrap_or_else(|| json!({}));

    let raw = page.run_axe(&axe_options).await?;
    let result: ScanResult = serde_json::from_value(raw)?;
    Ok(result)
}
