//! Git collaborators of the recommendation pipeline
//!
//! The pipeline only talks to git through two traits:
//!
//! - [TagResolver]: finds the latest release tag of a package
//! - [CommitSource]: streams raw, formatted commits since a tag
//!
//! Implementations:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! Most code should depend on the traits rather than concrete implementations.

pub mod format;
pub mod mock;
pub mod repository;

pub use format::{format_entry, LogEntry, DEFAULT_FORMAT};
pub use mock::MockRepository;
pub use repository::Git2Repository;

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::cmp::Ordering;

use crate::domain::{RawCommit, Tag};
use crate::error::{RecommendError, Result};

/// Which commits to retrieve and how to format them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Log format, see [format_entry]
    pub format: String,
    /// Exclusive lower bound; `None` means the whole history
    pub from: Option<Tag>,
}

impl CommitRange {
    pub fn since(from: Option<Tag>) -> Self {
        CommitRange {
            format: DEFAULT_FORMAT.to_string(),
            from,
        }
    }
}

/// Resolves the most recent release tag of a package
///
/// ## Errors
///
/// Any failure (including an ambiguous result) aborts the recommendation
/// and is surfaced unchanged.
#[async_trait]
pub trait TagResolver: Send + Sync {
    /// Latest `<package>@<semver>` tag reachable from HEAD, or `None`
    async fn resolve_latest_tag(&self, package_name: &str) -> Result<Option<Tag>>;
}

/// Produces raw commits from the tip of history back to a boundary tag
///
/// Commits are yielded newest first. An empty history yields an empty
/// stream, not an error.
pub trait CommitSource: Send + Sync {
    /// Must be called from within a tokio runtime.
    fn stream_commits(&self, range: CommitRange) -> BoxStream<'static, Result<RawCommit>>;
}

/// Pick the highest-precedence release among candidate tags.
///
/// Each candidate carries the commit its tag points at. Tags sharing the top
/// precedence are aliases when they point at the same commit (e.g.
/// `pkg@1.0.0` and `pkg@v1.0.0`), and the first by name is returned. When
/// they point at different commits the boundary is ambiguous.
pub fn pick_latest<T: PartialEq>(
    mut candidates: Vec<(Tag, semver::Version, T)>,
) -> Result<Option<Tag>> {
    candidates.sort_by(|a, b| {
        b.1.cmp_precedence(&a.1)
            .then_with(|| a.0.name.cmp(&b.0.name))
    });

    let Some((first, rest)) = candidates.split_first() else {
        return Ok(None);
    };

    let conflicting = rest
        .iter()
        .take_while(|other| other.1.cmp_precedence(&first.1) == Ordering::Equal)
        .find(|other| other.2 != first.2);
    if let Some(other) = conflicting {
        return Err(RecommendError::tag(format!(
            "ambiguous latest release: '{}' and '{}' have the same version on different commits",
            first.0, other.0
        )));
    }

    Ok(candidates.into_iter().next().map(|(tag, _, _)| tag))
}
