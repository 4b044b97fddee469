//! Declarative YAML page specifications

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HarnessResult;
use crate::scan::ScanOptions;

/// A page to scan, parsed from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    /// Unique name; doubles as the test title for report naming.
    pub name: String,

    /// Path relative to the base URL.
    #[serde(default = "default_path")]
    pub path: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Scan options; engine defaults when absent.
    #[serde(default)]
    pub scan: Option<ScanOptions>,

    /// Whether violations fail the page (reports are generated either way).
    #[serde(default = "default_fail_on_violations")]
    pub fail_on_violations: bool,
}

fn default_path() -> String {
    "/".to_string()
}

fn default_fail_on_violations() -> bool {
    true
}

impl PageSpec {
    /// Parse a page spec from a YAML string
    pub fn from_yaml(yaml: &str) -> HarnessResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a page spec from a YAML file
    pub fn from_file(path: &Path) -> HarnessResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all page specs from a directory
    pub fn load_all(dir: &Path) -> HarnessResult<Vec<Self>> {
        let mut specs = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            specs.push(Self::from_file(entry.path())?);
        }

        Ok(specs)
    }

    /// Absolute URL for this spec against a base origin.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Impact;

    #[test]
    fn parses_a_minimal_spec() {
        let yaml = r#"
name: Homepage
"#;
        let spec = PageSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "Homepage");
        assert_eq!(spec.path, "/");
        assert!(spec.fail_on_violations);
        assert!(spec.scan.is_none());
    }

    #[test]
    fn parses_scan_options() {
        let yaml = r#"
name: Critical checks
path: /checkout
tags:
  - smoke
scan:
  included_impacts:
    - critical
    - serious
  exclude_rules:
    - color-contrast
"#;
        let spec = PageSpec::from_yaml(yaml).unwrap();
        let scan = spec.scan.unwrap();
        assert_eq!(
            scan.included_impacts,
            Some(vec![Impact::Critical, Impact::Serious])
        );
        assert_eq!(scan.exclude_rules, Some(vec!["color-contrast".to_string()]));
    }

    #[test]
    fn urls_join_without_doubled_slashes() {
        let spec = PageSpec::from_yaml("name: About\npath: /about").unwrap();
        assert_eq!(spec.url("https://example.com/"), "https://example.com/about");

        let bare = PageSpec::from_yaml("name: About\npath: about").unwrap();
        assert_eq!(bare.url("https://example.com"), "https://example.com/about");
    }
}
