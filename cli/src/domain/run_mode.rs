//! Run-mode assertion over a `key=value` properties file.
//!
//! Pure functions only; the caller reads the file.

use regex::Regex;

use crate::domain::config::RunModeConfig;
use crate::domain::error::AbortError;

/// Result of scanning a properties file for the run-mode key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunModeStatus {
    /// The first matching line declares the expected mode.
    Confirmed(String),
    /// The first matching line declares some other mode.
    Mismatch(String),
    /// No line declares the key.
    Missing,
}

/// Scan `contents` for the first `key=value` line and compare its value.
///
/// The key is matched literally (dots are not wildcards), surrounding
/// whitespace is ignored, and the comparison is case-insensitive.
#[must_use]
pub fn scan(contents: &str, cfg: &RunModeConfig) -> RunModeStatus {
    let Ok(pattern) = Regex::new(&format!(r"^\s*{}\s*=\s*(.+?)\s*$", regex::escape(&cfg.key)))
    else {
        return RunModeStatus::Missing;
    };

    let value = contents
        .lines()
        .find_map(|line| pattern.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    match value {
        Some(v) if v.eq_ignore_ascii_case(&cfg.expected) => RunModeStatus::Confirmed(v),
        Some(v) => RunModeStatus::Mismatch(v),
        None => RunModeStatus::Missing,
    }
}

/// Turn a scan result into a pass/abort decision.
///
/// A missing key passes unless `require_key` is set; the caller is expected
/// to warn about it.
///
/// # Errors
///
/// Returns [`AbortError::RunModeMismatch`] or [`AbortError::RunModeMissing`].
pub fn enforce(status: &RunModeStatus, cfg: &RunModeConfig) -> Result<(), AbortError> {
    match status {
        RunModeStatus::Confirmed(_) => Ok(()),
        RunModeStatus::Mismatch(value) => Err(AbortError::RunModeMismatch {
            key: cfg.key.clone(),
            value: value.clone(),
            expected: cfg.expected.clone(),
        }),
        RunModeStatus::Missing if cfg.require_key => Err(AbortError::RunModeMissing {
            key: cfg.key.clone(),
            expected: cfg.expected.clone(),
        }),
        RunModeStatus::Missing => Ok(()),
    }
}
