//! Error types for the accessibility harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright script failed: {0}")]
    Script(String),

    #[error("Navigation to {url} timed out after {seconds}s")]
    NavigationTimeout { url: String, seconds: u64 },

    #[error("No page loaded - navigate before scanning or capturing screenshots")]
    NoPage,

    #[error("Scan produced no parseable result: {0}")]
    ScanOutput(String),

    #[error("Page spec error: {0}")]
    Spec(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_timeout_names_the_url() {
        let err = HarnessError::NavigationTimeout {
            url: "https://example.com/slow".to_string(),
            seconds: 30,
        };
        let message = err.to_string();
        assert!(message.contains("https://example.com/slow"));
        assert!(message.contains("timed out"));
    }
}
