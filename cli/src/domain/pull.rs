//! Classification of `git pull` output.

use std::sync::LazyLock;

use regex::Regex;

static UP_TO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^Already .*").expect("valid regex")
});

static PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^remote: (Counting|Enumerating) .*").expect("valid regex")
});

/// What a successful pull did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// Nothing new on the remote. Carries git's own message.
    UpToDate { message: String },
    /// New commits were fetched. Carries the lines to echo to the operator.
    NewChanges { lines: Vec<String> },
}

impl PullOutcome {
    #[must_use]
    pub fn has_new_changes(&self) -> bool {
        matches!(self, Self::NewChanges { .. })
    }
}

/// Classify the combined output of a pull that exited successfully.
///
/// `git --progress` writes `\r`-separated progress updates; each segment is
/// treated as its own line.
#[must_use]
pub fn classify(output: &str) -> PullOutcome {
    let normalized = output.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized
        .split(['\n', '\r'])
        .map(str::trim_end)
        .collect();

    if let Some(line) = lines.iter().find(|l| UP_TO_DATE.is_match(l)) {
        return PullOutcome::UpToDate {
            message: (*line).to_string(),
        };
    }

    let start = lines.iter().position(|l| PROGRESS.is_match(l)).unwrap_or(0);
    let lines = lines[start..]
        .iter()
        .skip_while(|l| l.is_empty())
        .take_while(|l| !l.is_empty())
        .map(|l| (*l).to_string())
        .collect();
    PullOutcome::NewChanges { lines }
}
