use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Mutex;

use crate::domain::{RawCommit, Tag};
use crate::error::{RecommendError, Result};
use crate::git::{format_entry, pick_latest, CommitRange, CommitSource, LogEntry, TagResolver};

#[derive(Debug, Clone)]
struct MockCommit {
    hash: String,
    message: String,
}

/// In-memory repository for testing without actual git operations.
///
/// History is linear. Each tag remembers how many commits existed when it was
/// added, so everything added afterwards counts as "since" that tag.
#[derive(Debug, Default)]
pub struct MockRepository {
    history: Vec<MockCommit>,
    tags: Vec<(String, usize)>,
    tag_error: Option<String>,
    commit_error: Option<String>,
    tag_lookups: Mutex<Vec<String>>,
    ranges: Mutex<Vec<CommitRange>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of history
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.history.push(MockCommit {
            hash: hash.into(),
            message: message.into(),
        });
        self
    }

    /// Tag the current tip of history
    pub fn add_tag(&mut self, name: impl Into<String>) -> &mut Self {
        self.tags.push((name.into(), self.history.len()));
        self
    }

    /// Make tag resolution fail with the given message
    pub fn fail_tag_resolution(&mut self, message: impl Into<String>) -> &mut Self {
        self.tag_error = Some(message.into());
        self
    }

    /// Make commit retrieval fail with the given message
    pub fn fail_commit_retrieval(&mut self, message: impl Into<String>) -> &mut Self {
        self.commit_error = Some(message.into());
        self
    }

    /// Package names the pipeline asked a tag for
    pub fn tag_lookups(&self) -> Vec<String> {
        self.tag_lookups
            .lock()
            .map(|lookups| lookups.clone())
            .unwrap_or_default()
    }

    /// Ranges the pipeline asked commits for
    pub fn requested_ranges(&self) -> Vec<CommitRange> {
        self.ranges
            .lock()
            .map(|ranges| ranges.clone())
            .unwrap_or_default()
    }

    fn commits_since(&self, tag: Option<&Tag>) -> Vec<&MockCommit> {
        let start = tag
            .and_then(|tag| {
                self.tags
                    .iter()
                    .find(|(name, _)| *name == tag.name)
                    .map(|(_, position)| *position)
            })
            .unwrap_or(0);
        self.history[start..].iter().rev().collect()
    }
}

#[async_trait]
impl TagResolver for MockRepository {
    async fn resolve_latest_tag(&self, package_name: &str) -> Result<Option<Tag>> {
        if let Ok(mut lookups) = self.tag_lookups.lock() {
            lookups.push(package_name.to_string());
        }
        if let Some(message) = &self.tag_error {
            return Err(RecommendError::tag(message.clone()));
        }

        let candidates = self
            .tags
            .iter()
            .map(|(name, position)| (Tag::new(name.clone()), *position))
            .filter(|(tag, _)| tag.is_release_of(package_name))
            .filter_map(|(tag, position)| tag.version().map(|version| (tag, version, position)))
            .collect();
        pick_latest(candidates)
    }
}

impl CommitSource for MockRepository {
    fn stream_commits(&self, range: CommitRange) -> BoxStream<'static, Result<RawCommit>> {
        if let Ok(mut ranges) = self.ranges.lock() {
            ranges.push(range.clone());
        }
        if let Some(message) = &self.commit_error {
            let err = RecommendError::commit_retrieval(message.clone());
            return stream::iter(vec![Err(err)]).boxed();
        }

        let raws: Vec<Result<RawCommit>> = self
            .commits_since(range.from.as_ref())
            .into_iter()
            .map(|commit| {
                let entry = LogEntry {
                    message: &commit.message,
                    hash: &commit.hash,
                    ..Default::default()
                };
                Ok(format_entry(&range.format, &entry))
            })
            .collect();
        stream::iter(raws).boxed()
    }
}
