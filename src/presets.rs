//! Built-in named presets: a commit grammar plus a bump decider

use std::sync::Arc;

use crate::analyzer::{BumpDecider, RuleDecider};
use crate::conventional::ParserOptions;
use crate::error::{RecommendError, Result};

/// Grammar and decider bundled under a name
#[derive(Clone)]
pub struct Preset {
    pub name: String,
    pub parser_opts: ParserOptions,
    pub what_bump: Arc<dyn BumpDecider>,
}

impl std::fmt::Debug for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preset")
            .field("name", &self.name)
            .field("parser_opts", &self.parser_opts)
            .finish_non_exhaustive()
    }
}

fn strings(values: &[&str]) -> Option<Vec<String>> {
    Some(values.iter().map(|s| s.to_string()).collect())
}

fn angular() -> Preset {
    Preset {
        name: "angular".to_string(),
        parser_opts: ParserOptions {
            header_pattern: Some(r"^(\w*)(?:\((.*)\))?: (.*)$".to_string()),
            header_correspondence: strings(&["type", "scope", "subject"]),
            note_keywords: strings(&["BREAKING CHANGE", "BREAKING CHANGES"]),
            revert_pattern: Some(
                r"^revert:\s([\s\S]*?)\s*This reverts commit (\w*)\.".to_string(),
            ),
            revert_correspondence: strings(&["header", "hash"]),
            ..Default::default()
        },
        what_bump: Arc::new(RuleDecider::default()),
    }
}

fn conventional_commits() -> Preset {
    Preset {
        name: "conventionalcommits".to_string(),
        parser_opts: ParserOptions {
            header_pattern: Some(r"^(\w*)(?:\((.*)\))?(!?): (.*)$".to_string()),
            header_correspondence: strings(&["type", "scope", "breaking", "subject"]),
            note_keywords: strings(&["BREAKING CHANGE", "BREAKING-CHANGE"]),
            revert_pattern: Some(
                r#"^(?:Revert|revert:)\s"?([\s\S]+?)"?\s*This reverts commit (\w*)\."#
                    .to_string(),
            ),
            revert_correspondence: strings(&["header", "hash"]),
            ..Default::default()
        },
        what_bump: Arc::new(RuleDecider {
            breaking_field: Some("breaking".to_string()),
            ..Default::default()
        }),
    }
}

fn eslint() -> Preset {
    Preset {
        name: "eslint".to_string(),
        parser_opts: ParserOptions {
            header_pattern: Some(r"^(\w*):\s*(.*?)(?:\((.*)\))?$".to_string()),
            header_correspondence: strings(&["tag", "message"]),
            note_keywords: Some(Vec::new()),
            ..Default::default()
        },
        what_bump: Arc::new(RuleDecider {
            field: "tag".to_string(),
            major: vec!["Breaking".to_string()],
            minor: vec!["New".to_string(), "Update".to_string()],
            breaking_notes: false,
            ..Default::default()
        }),
    }
}

/// Names accepted by [`load_preset`]
pub const PRESET_NAMES: [&str; 3] = ["angular", "conventionalcommits", "eslint"];

/// Resolve a preset by name
pub fn load_preset(name: &str) -> Result<Preset> {
    match name {
        "angular" => Ok(angular()),
        "conventionalcommits" => Ok(conventional_commits()),
        "eslint" => Ok(eslint()),
        other => Err(RecommendError::PresetNotFound(other.to_string())),
    }
}
