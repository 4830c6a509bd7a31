// Helpers shared by tests that need a real repository on disk
#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

/// Temporary git repository with linear history.
///
/// Commit times increase by one minute per commit so time-sorted walks are
/// deterministic.
pub struct TestRepo {
    pub dir: TempDir,
    repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        TestRepo {
            dir,
            repo,
            clock: 1_700_000_000,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn commit(&mut self, message: &str) -> Oid {
        self.clock += 60;
        let sig = Signature::new("Test User", "test@example.com", &Time::new(self.clock, 0))
            .expect("Could not build signature");

        let tree_id = self
            .repo
            .treebuilder(None)
            .and_then(|builder| builder.write())
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    /// Lightweight tag on HEAD
    pub fn tag(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .expect("Could not resolve HEAD");
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .expect("Could not create tag");
    }

    /// Annotated tag on HEAD
    pub fn annotated_tag(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .expect("Could not resolve HEAD");
        let sig = Signature::new("Test User", "test@example.com", &Time::new(self.clock, 0))
            .expect("Could not build signature");
        self.repo
            .tag(name, head.as_object(), &sig, name, false)
            .expect("Could not create tag");
    }
}
