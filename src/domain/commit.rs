use serde::Serialize;
use std::collections::BTreeMap;

/// A raw formatted log entry as produced by a commit source
pub type RawCommit = String;

/// A note in a commit footer (e.g. `BREAKING CHANGE: ...`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

/// An issue reference found in a commit message (e.g. `Closes #42`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub action: Option<String>,
    pub owner: Option<String>,
    pub repository: Option<String>,
    pub issue: String,
    pub prefix: String,
    pub raw: String,
}

/// Structured representation of a commit parsed under a configurable grammar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub header: Option<String>,
    pub body: Option<String>,
    pub footer: Option<String>,
    pub hash: Option<String>,
    pub notes: Vec<Note>,
    pub references: Vec<Reference>,
    pub mentions: Vec<String>,
    /// Fields identifying the commit this one reverts, if it is a revert
    pub revert: Option<BTreeMap<String, Option<String>>>,
    /// Header-correspondence fields (`type`, `scope`, ...) and custom field blocks
    pub fields: BTreeMap<String, Option<String>>,
}

impl Commit {
    /// Read a grammar field such as `type` or `scope`
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|value| value.as_deref())
    }

    /// Read any attribute by name, including the fixed ones
    ///
    /// Used when matching revert correspondences, which may name either.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "header" => self.header.as_deref(),
            "body" => self.body.as_deref(),
            "footer" => self.footer.as_deref(),
            "hash" => self.hash.as_deref(),
            other => self.field(other),
        }
    }

    pub fn is_revert(&self) -> bool {
        self.revert.is_some()
    }
}
