//! Domain types - commits, tags and bump levels independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{Commit, Note, RawCommit, Reference};
pub use tag::Tag;
pub use version::VersionBump;
