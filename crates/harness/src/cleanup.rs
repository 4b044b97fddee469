//! Report directory housekeeping
//!
//! Run once at session start: removes the previous session's HTML reports
//! and the whole screenshot tree so a run only ever contains its own
//! artifacts.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::HarnessResult;

/// Delete prior reports under `report_dir`.
///
/// Removes every `*.html` directly under the root and the `screenshots/`
/// subtree, returning the number of report files removed. A missing root
/// is a no-op. Safe to call repeatedly.
pub fn cleanup_reports(report_dir: &Path) -> HarnessResult<usize> {
    if !report_dir.exists() {
        return Ok(0);
    }

    info!("Cleaning up existing accessibility reports...");

    let mut removed = 0;
    for entry in fs::read_dir(report_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().map(|ext| ext == "html").unwrap_or(false) {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }

    let screenshots_dir = report_dir.join("screenshots");
    if screenshots_dir.exists() {
        fs::remove_dir_all(&screenshots_dir)?;
    }

    info!("Cleaned up {} report file(s) and screenshots", removed);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert_eq!(cleanup_reports(&missing).unwrap(), 0);
    }

    #[test]
    fn removes_only_reports_and_screenshots() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("old-chromium-1.html"), "<html></html>").unwrap();
        fs::write(root.join("old-chromium-2.html"), "<html></html>").unwrap();
        fs::write(root.join("notes.txt"), "keep me").unwrap();
        fs::create_dir_all(root.join("screenshots/Homepage")).unwrap();
        fs::write(root.join("screenshots/Homepage/shot.png"), [0u8; 4]).unwrap();

        assert_eq!(cleanup_reports(root).unwrap(), 2);
        assert!(root.join("notes.txt").exists());
        assert!(!root.join("screenshots").exists());
    }
}
