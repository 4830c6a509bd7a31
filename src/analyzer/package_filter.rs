use regex::Regex;
use std::sync::LazyLock;

use crate::domain::Commit;

static AFFECTS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^affects: (.+)$").expect("Invalid affects regex"));

static LIST_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s+").expect("Invalid separator regex"));

/// Decides whether a commit is relevant to one package of a multi-package repo.
///
/// A commit is relevant when its body carries an `affects:` line listing the
/// package, e.g. `affects: pkg-a, pkg-b`. Only the first such line counts and
/// names must match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFilter {
    package_name: String,
}

impl PackageFilter {
    pub fn new(package_name: impl Into<String>) -> Self {
        PackageFilter {
            package_name: package_name.into(),
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn is_relevant(&self, commit: &Commit) -> bool {
        let Some(body) = commit.body.as_deref() else {
            return false;
        };
        let Some(caps) = AFFECTS_LINE_RE.captures(body) else {
            return false;
        };
        LIST_SEPARATOR_RE
            .split(&caps[1])
            .any(|name| name == self.package_name)
    }
}

/// Predicate form of [`PackageFilter`] for use with `Iterator::filter`
pub fn package_filter(package_name: impl Into<String>) -> impl Fn(&Commit) -> bool {
    let filter = PackageFilter::new(package_name);
    move |commit| filter.is_relevant(commit)
}
