//! HTML report generation
//!
//! Renders a scan's violations as a self-contained HTML document: one
//! block per violation, one tabbed sub-block per affected node, with an
//! attempted element screenshot and WCAG cross-references. All inlined
//! text is HTML-escaped; a screenshot failure degrades that node only.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::error::HarnessResult;
use crate::page::PageHandle;
use crate::scan::{Impact, Violation, ViolationNode};
use crate::wcag::{self, WcagReference};

/// Default report root, relative to the working directory.
pub const REPORT_DIR: &str = "a11y-reports";

const STYLE: &str = r#"
      body { font-family: Arial, sans-serif; line-height: 1.6; margin: 0; padding: 20px; color: #333; }
      h1 { color: #d9534f; border-bottom: 2px solid #d9534f; padding-bottom: 10px; }
      h2 { color: #333; margin-top: 30px; }
      .violation { background: #f9f9f9; border-left: 4px solid #d9534f; padding: 15px; margin-bottom: 20px; border-radius: 0 4px 4px 0; }
      .violation-header { display: flex; justify-content: space-between; }
      .impact { display: inline-block; padding: 3px 8px; border-radius: 3px; font-size: 14px; font-weight: bold; }
      .impact.critical { background: #d9534f; color: white; }
      .impact.serious { background: #f0ad4e; color: white; }
      .impact.moderate { background: #5bc0de; color: white; }
      .impact.minor { background: #5cb85c; color: white; }
      .summary { margin: 10px 0; }
      .summary .impact { margin-right: 6px; }
      .nodes { margin-top: 15px; }
      .node { border: 1px solid #ddd; padding: 10px; margin-bottom: 10px; border-radius: 4px; }
      .html-snippet { background: #f5f5f5; padding: 10px; border-radius: 4px; font-family: monospace; overflow-x: auto; }
      .failure-summary { background: #fff8f8; border-left: 3px solid #d9534f; padding: 10px; margin: 10px 0; }
      .help-section { margin-top: 10px; }
      .help-link { color: #337ab7; text-decoration: none; }
      .help-link:hover { text-decoration: underline; }
      .target { font-family: monospace; background: #f5f5f5; padding: 2px 5px; border-radius: 3px; }
      .screenshot { margin: 15px 0; border: 1px solid #ddd; max-width: 100%; }
      .screenshot-container { margin-top: 15px; }
      .screenshot-title { font-weight: bold; margin-bottom: 5px; }
      .tabs { display: flex; margin-bottom: 10px; }
      .tab { padding: 8px 16px; cursor: pointer; background: #f1f1f1; border: 1px solid #ddd; border-bottom: none; }
      .tab.active { background: white; border-bottom: 1px solid white; }
      .tab-content { display: none; padding: 15px; border: 1px solid #ddd; }
      .tab-content.active { display: block; }
      .wcag-references { background: #f8f9fa; border-left: 3px solid #007bff; padding: 10px; margin: 10px 0; }
      .wcag-reference { margin-bottom: 8px; }
      .wcag-criteria { font-weight: bold; color: #007bff; }
      .wcag-description { margin-top: 5px; font-style: italic; }
"#;

const TAB_SCRIPT: &str = r#"
      function switchTab(event, tabName) {
        const tabContents = document.getElementsByClassName('tab-content');
        for (let i = 0; i < tabContents.length; i++) {
          tabContents[i].className = tabContents[i].className.replace(' active', '');
        }

        const tabs = document.getElementsByClassName('tab');
        for (let i = 0; i < tabs.length; i++) {
          tabs[i].className = tabs[i].className.replace(' active', '');
        }

        document.getElementById(tabName).className += ' active';
        event.currentTarget.className += ' active';
      }
"#;

/// Configuration for the report writer
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Report root; HTML files land here, screenshots under
    /// `screenshots/{page_id}/`.
    pub report_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from(REPORT_DIR),
        }
    }
}

/// Writes violation reports and their screenshot trees.
pub struct ReportWriter {
    report_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            report_dir: config.report_dir,
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Generate a report for the given violations.
    ///
    /// Returns `Ok(None)` without touching the filesystem when the
    /// violation list is empty. Directory and file write errors propagate;
    /// screenshot capture errors are logged and degrade the affected node
    /// to its Code and Failure Summary tabs.
    pub async fn generate(
        &self,
        page_id: &str,
        violations: &[Violation],
        page: &PageHandle,
        base_url: &str,
        browser_name: &str,
    ) -> HarnessResult<Option<PathBuf>> {
        if violations.is_empty() {
            return Ok(None);
        }

        let screenshots_dir = self.report_dir.join("screenshots").join(page_id);
        std::fs::create_dir_all(&self.report_dir)?;
        std::fs::create_dir_all(&screenshots_dir)?;

        let timestamp = fs_safe_timestamp();
        let report_path = self
            .report_dir
            .join(format!("{}-{}-{}.html", page_id, browser_name, timestamp));

        let scanned_url = page.current_url().unwrap_or(base_url);

        let mut html = String::new();
        self.render_header(&mut html, page_id, scanned_url, violations);

        for (index, violation) in violations.iter().enumerate() {
            let refs = wcag::lookup(&violation.id);
            self.render_violation_header(&mut html, index + 1, violation, refs);

            html.push_str("      <div class=\"nodes\">\n");
            for (node_index, node) in violation.nodes.iter().enumerate() {
                let node_id = format!("{}-node-{}", violation.id, node_index);
                let screenshot_file = format!("{}-{}.png", node_id, timestamp);
                let screenshot_path = screenshots_dir.join(&screenshot_file);
                let relative_path = format!("screenshots/{}/{}", page_id, screenshot_file);

                let captured = match node.target.first() {
                    Some(selector) => {
                        match page
                            .screenshot_element(
                                selector,
                                &screenshot_path,
                                page.selector_timeout_ms(),
                            )
                            .await
                        {
                            Ok(()) => true,
                            Err(e) => {
                                warn!("Failed to take screenshot of {}: {}", selector, e);
                                false
                            }
                        }
                    }
                    None => false,
                };

                render_node(
                    &mut html,
                    &node_id,
                    node,
                    refs,
                    captured.then_some(relative_path.as_str()),
                );
            }
            html.push_str("      </div>\n    </div>\n");
        }

        html.push_str("  </body>\n</html>\n");

        std::fs::write(&report_path, html)?;
        info!("Accessibility report generated: {}", report_path.display());

        Ok(Some(report_path))
    }

    fn render_header(&self, html: &mut String, page_id: &str, url: &str, violations: &[Violation]) {
        let _ = write!(
            html,
            r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Accessibility Report - {page_id}</title>
    <style>{style}</style>
    <script>{script}</script>
  </head>
  <body>
    <h1>Accessibility Report - {page_id}</h1>
    <p>Generated on: {generated}</p>
    <p>URL: {url}</p>
    <h2>Violations Found: {count}</h2>
    <div class="summary">{summary}</div>
"#,
            page_id = escape_html(page_id),
            style = STYLE,
            script = TAB_SCRIPT,
            generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            url = escape_html(url),
            count = violations.len(),
            summary = impact_summary(violations),
        );
    }

    fn render_violation_header(
        &self,
        html: &mut String,
        index: usize,
        violation: &Violation,
        refs: &[WcagReference],
    ) {
        let impact = violation.impact.map(|i| i.as_str()).unwrap_or("minor");

        let _ = write!(
            html,
            r#"    <div class="violation">
      <div class="violation-header">
        <h3>{index}. {id}</h3>
        <span class="impact {impact}">{impact}</span>
      </div>
      <p>{description}</p>
      <div class="help-section">
        <p>{help}</p>
        <a href="{help_url}" target="_blank" class="help-link">Learn more</a>
      </div>
      <div class="wcag-references">
        <h4>WCAG References:</h4>
{refs}      </div>
"#,
            index = index,
            id = escape_html(&violation.id),
            impact = impact,
            description = escape_html(&violation.description),
            help = escape_html(&violation.help),
            help_url = escape_html(&violation.help_url),
            refs = render_references(refs),
        );
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

fn render_node(
    html: &mut String,
    node_id: &str,
    node: &ViolationNode,
    refs: &[WcagReference],
    screenshot: Option<&str>,
) {
    let targets = node
        .target
        .iter()
        .map(|t| format!("<span class=\"target\">{}</span>", escape_html(t)))
        .collect::<Vec<_>>()
        .join(", ");

    let screenshot_tab = match screenshot {
        Some(_) => format!(
            "            <button class=\"tab\" onclick=\"switchTab(event, '{node_id}-screenshot')\">Screenshot</button>\n"
        ),
        None => String::new(),
    };

    let _ = write!(
        html,
        r#"        <div class="node">
          <div class="tabs">
            <button class="tab active" onclick="switchTab(event, '{node_id}-code')">Code</button>
            <button class="tab" onclick="switchTab(event, '{node_id}-failure')">Failure Summary</button>
{screenshot_tab}            <button class="tab" onclick="switchTab(event, '{node_id}-wcag')">WCAG</button>
          </div>
          <div id="{node_id}-code" class="tab-content active">
            <div class="html-snippet">{snippet}</div>
            <div><strong>Target:</strong> {targets}</div>
          </div>
          <div id="{node_id}-failure" class="tab-content">
            <div class="failure-summary"><pre>{failure}</pre></div>
          </div>
"#,
        node_id = node_id,
        screenshot_tab = screenshot_tab,
        snippet = escape_html(&node.html),
        targets = targets,
        failure = escape_html(&node.failure_summary),
    );

    if let Some(relative_path) = screenshot {
        let _ = write!(
            html,
            r#"          <div id="{node_id}-screenshot" class="tab-content">
            <div class="screenshot-container">
              <div class="screenshot-title">Element Screenshot:</div>
              <img src="{src}" alt="Screenshot of element with accessibility issue" class="screenshot">
              <div class="wcag-reference">
                <p><strong>WCAG Violation:</strong> {criterion}</p>
              </div>
            </div>
          </div>
"#,
            node_id = node_id,
            src = escape_html(relative_path),
            criterion = escape_html(refs[0].criteria),
        );
    }

    let _ = write!(
        html,
        r#"          <div id="{node_id}-wcag" class="tab-content">
            <div class="wcag-references">
{refs}            </div>
          </div>
        </div>
"#,
        node_id = node_id,
        refs = render_references(refs),
    );
}

fn render_references(refs: &[WcagReference]) -> String {
    let mut out = String::new();
    for reference in refs {
        let _ = write!(
            out,
            r#"          <div class="wcag-reference">
            <a href="{url}" target="_blank" class="wcag-criteria">{criteria}</a>
            <div class="wcag-description">{description}</div>
          </div>
"#,
            url = escape_html(reference.url),
            criteria = escape_html(reference.criteria),
            description = escape_html(reference.description),
        );
    }
    out
}

fn impact_summary(violations: &[Violation]) -> String {
    let mut counts: Vec<(Impact, usize)> = Vec::new();
    for impact in [
        Impact::Critical,
        Impact::Serious,
        Impact::Moderate,
        Impact::Minor,
    ] {
        let count = violations
            .iter()
            .filter(|v| v.impact == Some(impact))
            .count();
        if count > 0 {
            counts.push((impact, count));
        }
    }

    counts
        .iter()
        .map(|(impact, count)| {
            format!(
                "<span class=\"impact {imp}\">{imp}: {count}</span>",
                imp = impact.as_str(),
                count = count
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Timestamp safe for use in filenames (no colons or periods).
fn fs_safe_timestamp() -> String {
    Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// Escape text for interpolation into HTML.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
