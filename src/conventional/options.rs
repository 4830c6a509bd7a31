use serde::{Deserialize, Serialize};

use crate::warning::Warn;

pub const DEFAULT_HEADER_PATTERN: &str = r"^(\w*)(?:\(([\w$.\-* ]*)\))?: (.*)$";
pub const DEFAULT_FIELD_PATTERN: &str = r"^-(.*?)-$";
pub const DEFAULT_REVERT_PATTERN: &str =
    r#"^(?:Revert|revert:)\s"?([\s\S]+?)"?\s*This reverts commit (\w*)\."#;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Grammar used to parse raw commits into structured [`Commit`]s.
///
/// Every key is optional: presets and config files supply a base set and the
/// caller's options override it key by key (see [`ParserOptions::merge`]).
/// Absent keys fall back to the conventional defaults.
///
/// [`Commit`]: crate::domain::Commit
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserOptions {
    pub header_pattern: Option<String>,
    pub header_correspondence: Option<Vec<String>>,
    pub field_pattern: Option<String>,
    pub note_keywords: Option<Vec<String>>,
    pub reference_actions: Option<Vec<String>>,
    pub issue_prefixes: Option<Vec<String>>,
    pub revert_pattern: Option<String>,
    pub revert_correspondence: Option<Vec<String>>,
    pub merge_pattern: Option<String>,
    pub merge_correspondence: Option<Vec<String>>,
    /// Fail on the first unparsable commit instead of warning and skipping it
    pub strict: Option<bool>,
    #[serde(skip)]
    pub warn: Option<Warn>,
}

impl ParserOptions {
    /// Overlay `overrides` on top of `self`; keys set in `overrides` win.
    pub fn merge(self, overrides: ParserOptions) -> ParserOptions {
        ParserOptions {
            header_pattern: overrides.header_pattern.or(self.header_pattern),
            header_correspondence: overrides
                .header_correspondence
                .or(self.header_correspondence),
            field_pattern: overrides.field_pattern.or(self.field_pattern),
            note_keywords: overrides.note_keywords.or(self.note_keywords),
            reference_actions: overrides.reference_actions.or(self.reference_actions),
            issue_prefixes: overrides.issue_prefixes.or(self.issue_prefixes),
            revert_pattern: overrides.revert_pattern.or(self.revert_pattern),
            revert_correspondence: overrides
                .revert_correspondence
                .or(self.revert_correspondence),
            merge_pattern: overrides.merge_pattern.or(self.merge_pattern),
            merge_correspondence: overrides
                .merge_correspondence
                .or(self.merge_correspondence),
            strict: overrides.strict.or(self.strict),
            warn: overrides.warn.or(self.warn),
        }
    }

    pub fn header_pattern(&self) -> &str {
        self.header_pattern
            .as_deref()
            .unwrap_or(DEFAULT_HEADER_PATTERN)
    }

    pub fn header_correspondence(&self) -> Vec<String> {
        self.header_correspondence
            .clone()
            .unwrap_or_else(|| strings(&["type", "scope", "subject"]))
    }

    pub fn field_pattern(&self) -> &str {
        self.field_pattern.as_deref().unwrap_or(DEFAULT_FIELD_PATTERN)
    }

    pub fn note_keywords(&self) -> Vec<String> {
        self.note_keywords
            .clone()
            .unwrap_or_else(|| strings(&["BREAKING CHANGE", "BREAKING-CHANGE"]))
    }

    pub fn reference_actions(&self) -> Vec<String> {
        self.reference_actions.clone().unwrap_or_else(|| {
            strings(&[
                "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves",
                "resolved",
            ])
        })
    }

    pub fn issue_prefixes(&self) -> Vec<String> {
        self.issue_prefixes
            .clone()
            .unwrap_or_else(|| strings(&["#"]))
    }

    pub fn revert_pattern(&self) -> &str {
        self.revert_pattern
            .as_deref()
            .unwrap_or(DEFAULT_REVERT_PATTERN)
    }

    pub fn revert_correspondence(&self) -> Vec<String> {
        self.revert_correspondence
            .clone()
            .unwrap_or_else(|| strings(&["header", "hash"]))
    }

    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}
