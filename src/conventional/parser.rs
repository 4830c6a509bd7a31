use regex::Regex;
use std::collections::BTreeMap;

use crate::conventional::ParserOptions;
use crate::domain::{Commit, Note, Reference};
use crate::error::{RecommendError, Result};
use crate::warning::{RecommendWarning, Warn};

fn compile(what: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| RecommendError::parse(format!("invalid {}: {}", what, e)))
}

fn alternation(values: &[String]) -> String {
    values
        .iter()
        .map(|v| regex::escape(v))
        .collect::<Vec<_>>()
        .join("|")
}

fn joined_text(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn correspond(
    captures: &regex::Captures<'_>,
    names: &[String],
) -> BTreeMap<String, Option<String>> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let value = captures.get(i + 1).map(|m| m.as_str().to_string());
            (name.clone(), value)
        })
        .collect()
}

/// Parses raw commits into structured [`Commit`]s under a configurable grammar.
///
/// Keyword, action and prefix lists are matched literally.
pub struct CommitParser {
    header: Regex,
    header_correspondence: Vec<String>,
    field: Regex,
    note: Option<Regex>,
    reference: Regex,
    reference_line: Option<Regex>,
    mention: Regex,
    revert: Regex,
    revert_correspondence: Vec<String>,
    merge: Option<Regex>,
    merge_correspondence: Vec<String>,
    strict: bool,
    warn: Warn,
}

impl CommitParser {
    /// Compile the grammar. An invalid pattern is fatal for the whole run.
    pub fn new(options: &ParserOptions) -> Result<Self> {
        let note_keywords = options.note_keywords();
        let note = if note_keywords.is_empty() {
            None
        } else {
            Some(compile(
                "note keywords",
                &format!(r"(?i)^[\s*]*({})[:\s]+(.*)$", alternation(&note_keywords)),
            )?)
        };

        let issue_prefixes = options.issue_prefixes();
        if issue_prefixes.is_empty() {
            return Err(RecommendError::parse("issue prefixes must not be empty"));
        }
        let prefixes = alternation(&issue_prefixes);

        let actions = options.reference_actions();
        let (reference, reference_line) = if actions.is_empty() {
            let reference = compile(
                "reference grammar",
                &format!(r"()(?:([\w-]+)/([\w.-]+))?({})(\d+)", prefixes),
            )?;
            (reference, None)
        } else {
            let actions = alternation(&actions);
            let reference = compile(
                "reference grammar",
                &format!(
                    r"(?i)(?:\b({})\s+)?(?:([\w-]+)/([\w.-]+))?({})(\d+)",
                    actions, prefixes
                ),
            )?;
            let line = compile(
                "reference grammar",
                &format!(
                    r"(?i)^\s*(?:{})\s+(?:[\w-]+/[\w.-]+)?(?:{})\d+",
                    actions, prefixes
                ),
            )?;
            (reference, Some(line))
        };

        let merge = options
            .merge_pattern
            .as_deref()
            .map(|pattern| compile("merge pattern", pattern))
            .transpose()?;

        Ok(CommitParser {
            header: compile("header pattern", options.header_pattern())?,
            header_correspondence: options.header_correspondence(),
            field: compile("field pattern", options.field_pattern())?,
            note,
            reference,
            reference_line,
            mention: compile("mention grammar", r"@([\w-]+)")?,
            revert: compile("revert pattern", options.revert_pattern())?,
            revert_correspondence: options.revert_correspondence(),
            merge,
            merge_correspondence: options.merge_correspondence.clone().unwrap_or_default(),
            strict: options.is_strict(),
            warn: options.warn.clone().unwrap_or_default(),
        })
    }

    /// Parse one raw commit.
    pub fn parse(&self, raw: &str) -> Result<Commit> {
        if raw.trim().is_empty() {
            return Err(RecommendError::parse("Expected a raw commit"));
        }

        // Split the message from trailing `-field-` blocks
        let mut message: Vec<&str> = Vec::new();
        let mut blocks: Vec<(String, Vec<&str>)> = Vec::new();
        for line in raw.lines() {
            if let Some(caps) = self.field.captures(line) {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                blocks.push((name.to_string(), Vec::new()));
            } else if let Some((_, values)) = blocks.last_mut() {
                values.push(line);
            } else {
                message.push(line);
            }
        }

        let mut commit = Commit::default();
        let mut lines = message.iter().copied().skip_while(|l| l.trim().is_empty());

        let mut header = lines.next();
        if let (Some(merge), Some(line)) = (&self.merge, header) {
            if let Some(caps) = merge.captures(line) {
                commit
                    .fields
                    .extend(correspond(&caps, &self.merge_correspondence));
                header = lines.by_ref().find(|l| !l.trim().is_empty());
            }
        }

        match header.and_then(|h| self.header.captures(h)) {
            Some(caps) => commit
                .fields
                .extend(correspond(&caps, &self.header_correspondence)),
            None => {
                for name in &self.header_correspondence {
                    commit.fields.insert(name.clone(), None);
                }
            }
        }
        commit.header = header.map(|h| h.trim().to_string());

        let mut body: Vec<&str> = Vec::new();
        let mut footer: Vec<&str> = Vec::new();
        let mut in_footer = false;
        let mut current_note: Option<usize> = None;

        for line in lines {
            if let Some(caps) = self.note.as_ref().and_then(|re| re.captures(line)) {
                in_footer = true;
                commit.notes.push(Note {
                    title: caps[1].to_string(),
                    text: caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
                });
                current_note = Some(commit.notes.len() - 1);
                footer.push(line);
                continue;
            }

            if self
                .reference_line
                .as_ref()
                .is_some_and(|re| re.is_match(line))
            {
                in_footer = true;
                current_note = None;
                footer.push(line);
                continue;
            }

            if in_footer {
                footer.push(line);
                if let Some(idx) = current_note {
                    let note = &mut commit.notes[idx];
                    note.text.push('\n');
                    note.text.push_str(line);
                }
            } else {
                body.push(line);
            }
        }

        for note in &mut commit.notes {
            note.text = note.text.trim().to_string();
        }
        commit.body = joined_text(&body);
        commit.footer = joined_text(&footer);

        let sections = [commit.header.clone(), commit.body.clone(), commit.footer.clone()];
        for text in sections.iter().flatten() {
            commit.references.extend(self.references_in(text));
            commit.mentions.extend(
                self.mention
                    .captures_iter(text)
                    .map(|caps| caps[1].to_string()),
            );
        }

        let full_message = message.join("\n");
        if let Some(caps) = self.revert.captures(full_message.trim()) {
            commit.revert = Some(correspond(&caps, &self.revert_correspondence));
        }

        for (name, values) in blocks {
            let value = joined_text(&values);
            if name == "hash" {
                commit.hash = value;
            } else {
                commit.fields.insert(name, value);
            }
        }

        Ok(commit)
    }

    /// Parse one raw commit, routing a failure to the warning sink.
    ///
    /// Returns `Ok(None)` when the commit was skipped; in strict mode the
    /// failure is returned instead.
    pub fn parse_or_skip(&self, raw: &str) -> Result<Option<Commit>> {
        match self.parse(raw) {
            Ok(commit) => Ok(Some(commit)),
            Err(err) if self.strict => Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unparsable commit");
                self.warn.emit(&RecommendWarning::UnparsableCommit {
                    reason: err.to_string(),
                });
                Ok(None)
            }
        }
    }

    /// Parse a whole sequence, keeping source order.
    pub fn parse_all<I, S>(&self, raws: I) -> Result<Vec<Commit>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut commits = Vec::new();
        for raw in raws {
            if let Some(commit) = self.parse_or_skip(raw.as_ref())? {
                commits.push(commit);
            }
        }
        Ok(commits)
    }

    fn references_in(&self, text: &str) -> Vec<Reference> {
        self.reference
            .captures_iter(text)
            .map(|caps| {
                let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
                Reference {
                    action: group(1).filter(|a| !a.is_empty()),
                    owner: group(2),
                    repository: group(3),
                    prefix: group(4).unwrap_or_default(),
                    issue: group(5).unwrap_or_default(),
                    raw: caps[0].trim().to_string(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn parser() -> CommitParser {
        CommitParser::new(&ParserOptions::default()).unwrap()
    }

    #[test]
    fn test_parse_header_fields() {
        let commit = parser()
            .parse("feat(api): add endpoint\n-hash-\nabc123")
            .unwrap();
        assert_eq!(commit.header.as_deref(), Some("feat(api): add endpoint"));
        assert_eq!(commit.field("type"), Some("feat"));
        assert_eq!(commit.field("scope"), Some("api"));
        assert_eq!(commit.field("subject"), Some("add endpoint"));
        assert_eq!(commit.hash.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parse_non_matching_header() {
        let commit = parser().parse("Update README\n-hash-\nabc").unwrap();
        assert_eq!(commit.header.as_deref(), Some("Update README"));
        assert_eq!(commit.field("type"), None);
        assert!(commit.fields.contains_key("type"));
    }

    #[test]
    fn test_parse_body_and_notes() {
        let raw = "fix: rename field\n\nSome context.\naffects: pkg-a, pkg-b\n\nBREAKING CHANGE: field renamed\nfrom X to Y\n-hash-\ndef456";
        let commit = parser().parse(raw).unwrap();

        assert_eq!(
            commit.body.as_deref(),
            Some("Some context.\naffects: pkg-a, pkg-b")
        );
        assert_eq!(commit.notes.len(), 1);
        assert_eq!(commit.notes[0].title, "BREAKING CHANGE");
        assert_eq!(commit.notes[0].text, "field renamed\nfrom X to Y");
        assert_eq!(
            commit.footer.as_deref(),
            Some("BREAKING CHANGE: field renamed\nfrom X to Y")
        );
    }

    #[test]
    fn test_parse_references() {
        let raw = "fix: crash on start #7\n\nCloses #42, fixes octo/repo#9\n-hash-\n1";
        let commit = parser().parse(raw).unwrap();

        assert_eq!(commit.references.len(), 3);
        assert_eq!(commit.references[0].issue, "7");
        assert_eq!(commit.references[0].action, None);
        assert_eq!(commit.references[1].action.as_deref(), Some("Closes"));
        assert_eq!(commit.references[1].issue, "42");
        assert_eq!(commit.references[2].owner.as_deref(), Some("octo"));
        assert_eq!(commit.references[2].repository.as_deref(), Some("repo"));
        assert_eq!(commit.body, None);
        assert!(commit.footer.is_some());
    }

    #[test]
    fn test_parse_mentions() {
        let commit = parser()
            .parse("docs: thanks @alice\n\ncc @bob-smith")
            .unwrap();
        assert_eq!(commit.mentions, vec!["alice", "bob-smith"]);
    }

    #[test]
    fn test_parse_revert() {
        let raw = "revert: feat(api): add endpoint\n\nThis reverts commit abc123.\n-hash-\nfff";
        let commit = parser().parse(raw).unwrap();
        let revert = commit.revert.expect("should be a revert");
        assert_eq!(
            revert.get("header"),
            Some(&Some("feat(api): add endpoint".to_string()))
        );
        assert_eq!(revert.get("hash"), Some(&Some("abc123".to_string())));
    }

    #[test]
    fn test_parse_custom_field_block() {
        let raw = "chore: tidy\n-hash-\nabc\n-author-\nJane";
        let commit = parser().parse(raw).unwrap();
        assert_eq!(commit.field("author"), Some("Jane"));
    }

    #[test]
    fn test_parse_merge_header() {
        let opts = ParserOptions {
            merge_pattern: Some(r"^Merge pull request #(\d+) from (.*)$".to_string()),
            merge_correspondence: Some(vec!["id".to_string(), "source".to_string()]),
            ..Default::default()
        };
        let parser = CommitParser::new(&opts).unwrap();
        let commit = parser
            .parse("Merge pull request #3 from me/branch\n\nfeat: merged thing")
            .unwrap();
        assert_eq!(commit.field("id"), Some("3"));
        assert_eq!(commit.field("type"), Some("feat"));
        assert_eq!(commit.header.as_deref(), Some("feat: merged thing"));
    }

    #[test]
    fn test_empty_raw_is_error() {
        let err = parser().parse("  \n ").unwrap_err();
        assert!(err.to_string().contains("Expected a raw commit"));
    }

    #[test]
    fn test_invalid_grammar_is_fatal() {
        let opts = ParserOptions {
            header_pattern: Some("(unclosed".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            CommitParser::new(&opts),
            Err(RecommendError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_all_warns_and_skips() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let opts = ParserOptions {
            warn: Some(Warn::new(move |m| sink.lock().unwrap().push(m.to_string()))),
            ..Default::default()
        };
        let parser = CommitParser::new(&opts).unwrap();

        let commits = parser.parse_all(["feat: a", "", "fix: b"]).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_all_strict_fails() {
        let opts = ParserOptions {
            strict: Some(true),
            ..Default::default()
        };
        let parser = CommitParser::new(&opts).unwrap();
        assert!(parser.parse_all(["feat: a", ""]).is_err());
    }
}
