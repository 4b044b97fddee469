//! a11yscan accessibility test harness
//!
//! This crate drives Playwright from Rust to run axe-core accessibility
//! scans against live pages and renders the findings as self-contained
//! HTML reports with element screenshots and WCAG cross-references.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     A11yRunner                                │
//! │   ├── cleanup_reports()          session-start housekeeping  │
//! │   ├── PageSpec::load_all()       declarative YAML page specs │
//! │   └── per spec:                                              │
//! │         PageHandle::goto(url)    30 s navigation deadline    │
//! │         scan(page, options)      axe-core via Playwright     │
//! │         ScanContext::store()     per-test result capture     │
//! │         ScanContext::finish()    report iff violations       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ReportWriter                                                 │
//! │    ├── wcag::lookup(rule_id)     static WCAG reference table │
//! │    ├── PageHandle::screenshot_element()  per-node, degrades  │
//! │    └── a11y-reports/{page}-{browser}-{timestamp}.html        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod cleanup;
pub mod error;
pub mod page;
pub mod report;
pub mod runner;
pub mod scan;
pub mod spec;
pub mod wcag;

pub use cleanup::cleanup_reports;
pub use error::{HarnessError, HarnessResult};
pub use page::{Browser, PageConfig, PageHandle};
pub use report::{ReportConfig, ReportWriter};
pub use runner::{A11yRunner, PageResult, RunnerConfig, ScanContext, SuiteResult};
pub use scan::{scan, Impact, ScanOptions, ScanResult, Violation, ViolationNode};
pub use spec::PageSpec;
