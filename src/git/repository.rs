use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::domain::{RawCommit, Tag};
use crate::error::{RecommendError, Result};
use crate::git::{format_entry, pick_latest, CommitRange, CommitSource, LogEntry, TagResolver};

/// Raw commits buffered between the blocking walker and the async consumer
const COMMIT_CHANNEL_CAPACITY: usize = 64;

/// Tag resolver and commit source backed by `git2`.
///
/// `git2::Repository` is not `Sync`, so each operation reopens the repository
/// on a blocking thread.
#[derive(Debug, Clone)]
pub struct Git2Repository {
    git_dir: PathBuf,
    workdir: Option<PathBuf>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository {
            git_dir: repo.path().to_path_buf(),
            workdir: repo.workdir().map(Path::to_path_buf),
        })
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Working tree root; `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }
}

/// HEAD commit, or `None` for a repository without commits
fn head_commit(repo: &Git2Repo) -> std::result::Result<Option<Oid>, git2::Error> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

fn latest_release_tag(git_dir: &Path, package_name: &str) -> Result<Option<Tag>> {
    let tag_error = |e: git2::Error| RecommendError::tag(e.to_string());
    let repo = Git2Repo::open(git_dir).map_err(tag_error)?;

    let mut candidates: HashMap<Oid, Vec<(Tag, semver::Version)>> = HashMap::new();
    let names = repo.tag_names(None).map_err(tag_error)?;
    for name in names.iter().flatten() {
        let tag = Tag::new(name);
        if !tag.is_release_of(package_name) {
            continue;
        }
        let Some(version) = tag.version() else {
            continue;
        };
        // Tags on non-commit objects are not releases
        let target = repo
            .find_reference(&format!("refs/tags/{}", name))
            .and_then(|r| r.peel_to_commit());
        if let Ok(commit) = target {
            candidates
                .entry(commit.id())
                .or_default()
                .push((tag, version));
        }
    }

    if candidates.is_empty() {
        return Ok(None);
    }

    let Some(head) = head_commit(&repo).map_err(tag_error)? else {
        return Ok(None);
    };

    let mut revwalk = repo.revwalk().map_err(tag_error)?;
    revwalk.push(head).map_err(tag_error)?;

    let mut reachable = Vec::new();
    for oid in revwalk {
        let oid = oid.map_err(tag_error)?;
        if let Some(tags) = candidates.remove(&oid) {
            reachable.extend(tags.into_iter().map(|(tag, version)| (tag, version, oid)));
        }
        if candidates.is_empty() {
            break;
        }
    }

    pick_latest(reachable)
}

fn walk_commits(
    git_dir: &Path,
    range: &CommitRange,
    tx: &mpsc::Sender<Result<RawCommit>>,
) -> Result<()> {
    let retrieval_error = |e: git2::Error| RecommendError::commit_retrieval(e.to_string());
    let repo = Git2Repo::open(git_dir).map_err(retrieval_error)?;

    let Some(head) = head_commit(&repo).map_err(retrieval_error)? else {
        return Ok(());
    };

    let mut revwalk = repo.revwalk().map_err(retrieval_error)?;
    revwalk.set_sorting(Sort::TIME).map_err(retrieval_error)?;
    revwalk.push(head).map_err(retrieval_error)?;

    if let Some(tag) = &range.from {
        let boundary = repo
            .revparse_single(&format!("refs/tags/{}", tag.name))
            .and_then(|obj| obj.peel_to_commit())
            .map_err(retrieval_error)?;
        revwalk.hide(boundary.id()).map_err(retrieval_error)?;
    }

    for oid in revwalk {
        let commit = repo
            .find_commit(oid.map_err(retrieval_error)?)
            .map_err(retrieval_error)?;
        let hash = commit.id().to_string();
        let author = commit.author();
        let entry = LogEntry {
            message: commit.message().unwrap_or_default(),
            hash: &hash,
            author_name: author.name().unwrap_or_default(),
            author_email: author.email().unwrap_or_default(),
        };

        if tx.blocking_send(Ok(format_entry(&range.format, &entry))).is_err() {
            // Consumer went away
            break;
        }
    }

    Ok(())
}

#[async_trait]
impl TagResolver for Git2Repository {
    async fn resolve_latest_tag(&self, package_name: &str) -> Result<Option<Tag>> {
        let git_dir = self.git_dir.clone();
        let package_name = package_name.to_string();

        tokio::task::spawn_blocking(move || latest_release_tag(&git_dir, &package_name))
            .await
            .map_err(|e| RecommendError::tag(format!("tag lookup task failed: {}", e)))?
    }
}

impl CommitSource for Git2Repository {
    fn stream_commits(&self, range: CommitRange) -> BoxStream<'static, Result<RawCommit>> {
        let git_dir = self.git_dir.clone();
        let (tx, rx) = mpsc::channel(COMMIT_CHANNEL_CAPACITY);

        tokio::task::spawn_blocking(move || {
            if let Err(err) = walk_commits(&git_dir, &range, &tx) {
                let _ = tx.blocking_send(Err(err));
            }
        });

        stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) }).boxed()
    }
}
