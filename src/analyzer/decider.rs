use serde::{Deserialize, Serialize};

use crate::analyzer::outcome::{BumpDetails, BumpOutcome};
use crate::domain::{Commit, VersionBump};

/// Maps the relevant commits since the last release to a bump.
///
/// Invoked exactly once per recommendation, possibly with an empty slice.
/// Returning `None` yields an empty recommendation.
pub trait BumpDecider: Send + Sync {
    fn what_bump(&self, commits: &[Commit]) -> Option<BumpOutcome>;
}

impl<F> BumpDecider for F
where
    F: Fn(&[Commit]) -> Option<BumpOutcome> + Send + Sync,
{
    fn what_bump(&self, commits: &[Commit]) -> Option<BumpOutcome> {
        self(commits)
    }
}

/// Decider used when neither the caller nor a preset supplies one
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecider;

impl BumpDecider for NoopDecider {
    fn what_bump(&self, _commits: &[Commit]) -> Option<BumpOutcome> {
        None
    }
}

fn default_field() -> String {
    "type".to_string()
}

fn default_minor() -> Vec<String> {
    vec!["feat".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_level() -> Option<u8> {
    Some(VersionBump::Patch.level())
}

/// Declarative decider, loadable from the `[what_bump]` table of a config file.
///
/// Starts at `default_level` and lets each commit raise the severity:
/// - a note (when `breaking_notes`), a non-empty `breaking_field`, or a
///   `field` value listed in `major` means major;
/// - a value listed in `minor` means at least minor;
/// - a value listed in `patch` means at least patch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleDecider {
    #[serde(default = "default_field")]
    pub field: String,

    #[serde(default)]
    pub major: Vec<String>,

    #[serde(default = "default_minor")]
    pub minor: Vec<String>,

    #[serde(default)]
    pub patch: Vec<String>,

    #[serde(default = "default_true")]
    pub breaking_notes: bool,

    #[serde(default)]
    pub breaking_field: Option<String>,

    #[serde(default = "default_level")]
    pub default_level: Option<u8>,
}

impl Default for RuleDecider {
    fn default() -> Self {
        RuleDecider {
            field: default_field(),
            major: Vec::new(),
            minor: default_minor(),
            patch: Vec::new(),
            breaking_notes: default_true(),
            breaking_field: None,
            default_level: default_level(),
        }
    }
}

impl RuleDecider {
    /// Number of breaking changes this commit carries
    fn breakings(&self, commit: &Commit) -> usize {
        let mut count = 0;
        if self.breaking_notes {
            count += commit.notes.len();
        }
        if let Some(field) = &self.breaking_field {
            if commit.field(field).is_some_and(|v| !v.is_empty()) {
                count = count.max(1);
            }
        }
        if Self::listed(&self.major, commit.field(&self.field)) {
            count = count.max(1);
        }
        count
    }

    fn listed(values: &[String], value: Option<&str>) -> bool {
        value.is_some_and(|v| values.iter().any(|listed| listed == v))
    }
}

impl BumpDecider for RuleDecider {
    fn what_bump(&self, commits: &[Commit]) -> Option<BumpOutcome> {
        let mut level = self.default_level;
        let mut breakings = 0;
        let mut features = 0;

        let mut raise = |to: u8| {
            level = Some(level.map_or(to, |current| current.min(to)));
        };

        for commit in commits {
            let value = commit.field(&self.field);
            let commit_breakings = self.breakings(commit);

            if commit_breakings > 0 {
                breakings += commit_breakings;
                raise(VersionBump::Major.level());
            } else if Self::listed(&self.minor, value) {
                features += 1;
                raise(VersionBump::Minor.level());
            } else if Self::listed(&self.patch, value) {
                raise(VersionBump::Patch.level());
            }
        }

        let details = BumpDetails {
            level,
            ..Default::default()
        }
        .reason(format!(
            "There are {} BREAKING CHANGES and {} features",
            breakings, features
        ));
        Some(BumpOutcome::Detailed(details))
    }
}
