//! Playwright page driver
//!
//! Each operation generates a small Node script against the Playwright API,
//! runs it with `node` from a scratch directory, and parses a marked JSON
//! line from stdout. Navigation is raced against a fixed deadline; the
//! script child is spawned with `kill_on_drop`, so the losing side of the
//! race is reaped rather than left running.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};

/// Prefix marking the JSON result line in script output.
const RESULT_MARKER: &str = "A11Y_RESULT:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(HarnessError::Spec(format!("unknown browser: {}", other))),
        }
    }
}

/// Configuration for a page handle
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub browser: Browser,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub headless: bool,

    /// Hard deadline for `goto`; also set as the browsing context's
    /// default navigation timeout.
    pub navigation_timeout: Duration,

    /// Bounded wait for a selector before an element screenshot.
    pub selector_timeout_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            viewport_width: 1280,
            viewport_height: 720,
            headless: true,
            navigation_timeout: Duration::from_secs(30),
            selector_timeout_ms: 5000,
        }
    }
}

/// Handle to a page under test
///
/// Remembers the most recently navigated URL; scan and screenshot
/// operations re-open that URL in a fresh browser, so state does not leak
/// between operations or between concurrently running page scans.
pub struct PageHandle {
    config: PageConfig,
    current_url: Option<String>,
}

impl PageHandle {
    pub fn new(config: PageConfig) -> Self {
        Self {
            config,
            current_url: None,
        }
    }

    /// Check if Playwright is installed
    pub fn check_playwright_installed() -> HarnessResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(HarnessError::PlaywrightNotFound),
        }
    }

    pub fn browser_name(&self) -> &'static str {
        self.config.browser.as_str()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn selector_timeout_ms(&self) -> u64 {
        self.config.selector_timeout_ms
    }

    /// Navigate to an absolute URL.
    ///
    /// The navigation script is raced against the configured deadline; on
    /// timeout the error names the target URL and the in-flight script is
    /// killed when its future is dropped.
    pub async fn goto(&mut self, url: &str) -> HarnessResult<()> {
        let body = format!(
            "    await page.goto({}, {{ waitUntil: 'load' }});\n",
            js_string(url)
        );
        let script = self.build_script(&body);

        debug!("Navigating to {}", url);

        match tokio::time::timeout(self.config.navigation_timeout, self.run_script(&script)).await
        {
            Ok(result) => {
                result?;
                self.current_url = Some(url.to_string());
                Ok(())
            }
            Err(_) => Err(HarnessError::NavigationTimeout {
                url: url.to_string(),
                seconds: self.config.navigation_timeout.as_secs(),
            }),
        }
    }

    /// Capture a screenshot of the first element matching `selector`,
    /// waiting up to `wait_ms` for it to appear.
    pub async fn screenshot_element(
        &self,
        selector: &str,
        out_path: &Path,
        wait_ms: u64,
    ) -> HarnessResult<()> {
        let url = self.current_url.as_deref().ok_or(HarnessError::NoPage)?;

        let body = format!(
            "    await page.goto({url}, {{ waitUntil: 'load' }});\n\
             \x20   const element = await page.waitForSelector({sel}, {{ timeout: {wait_ms} }});\n\
             \x20   await element.screenshot({{ path: {path} }});\n",
            url = js_string(url),
            sel = js_string(selector),
            wait_ms = wait_ms,
            path = js_string(&out_path.to_string_lossy()),
        );

        debug!("Capturing element screenshot for {}", selector);

        self.run_script(&self.build_script(&body)).await?;
        Ok(())
    }

    /// Inject axe-core into the current page and run it with the given
    /// `axe.run` options, returning the raw result object.
    pub async fn run_axe(&self, options: &serde_json::Value) -> HarnessResult<serde_json::Value> {
        let url = self.current_url.as_deref().ok_or(HarnessError::NoPage)?;
        let opts = serde_json::to_string(options)?;

        let body = format!(
            "    const axe = require('axe-core');\n\
             \x20   await page.goto({url}, {{ waitUntil: 'load' }});\n\
             \x20   await page.evaluate(axe.source);\n\
             \x20   const results = await page.evaluate((opts) => axe.run(document, opts), {opts});\n\
             \x20   console.log('{marker}' + JSON.stringify(results));\n",
            url = js_string(url),
            opts = opts,
            marker = RESULT_MARKER,
        );

        let stdout = self.run_script(&self.build_script(&body)).await?;

        let line = stdout
            .lines()
            .rev()
            .find(|line| line.starts_with(RESULT_MARKER))
            .ok_or_else(|| {
                HarnessError::ScanOutput("no result line in script output".to_string())
            })?;

        Ok(serde_json::from_str(&line[RESULT_MARKER.len()..])?)
    }

    /// Wrap a script body in the browser launch/teardown boilerplate
    fn build_script(&self, body: &str) -> String {
        let mut script = format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  context.setDefaultNavigationTimeout({nav_ms});
  const page = await context.newPage();

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
            nav_ms = self.config.navigation_timeout.as_millis(),
        );

        script.push_str(body);

        script.push_str(
            r#"  } catch (error) {
    console.error(JSON.stringify({ success: false, error: error.message }));
    process.exit(1);
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Write the script to a scratch dir, run it with node, return stdout
    async fn run_script(&self, script: &str) -> HarnessResult<String> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("page.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(HarnessError::Script(format!(
                "stdout: {}\nstderr: {}",
                stdout.trim(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Encode a Rust string as a JS string literal
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_names() {
        assert_eq!(Browser::Chromium.as_str(), "chromium");
        assert_eq!("webkit".parse::<Browser>().unwrap(), Browser::Webkit);
        assert!("safari".parse::<Browser>().is_err());
    }

    #[test]
    fn script_contains_launch_and_body() {
        let page = PageHandle::new(PageConfig::default());
        let script = page.build_script("    await page.goto(\"https://example.com\");\n");

        assert!(script.contains("chromium.launch({ headless: true })"));
        assert!(script.contains("setDefaultNavigationTimeout(30000)"));
        assert!(script.contains("await page.goto(\"https://example.com\");"));
        assert!(script.contains("await browser.close();"));
    }

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(js_string("a'b\"c"), "\"a'b\\\"c\"");
    }

    #[tokio::test]
    async fn screenshot_without_navigation_is_an_error() {
        let page = PageHandle::new(PageConfig::default());
        let err = page
            .screenshot_element("img#logo", Path::new("/tmp/x.png"), 100)
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::NoPage));
    }
}
