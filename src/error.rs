use thiserror::Error;

/// Unified error type for bump recommendation
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Preset: \"{0}\" does not exist")]
    PresetNotFound(String),

    #[error("Tag resolution failed: {0}")]
    Tag(String),

    #[error("Commit retrieval failed: {0}")]
    CommitRetrieval(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    TomlDe(#[from] toml::de::Error),
}

/// Convenience type alias for Results in recommended-bump
pub type Result<T> = std::result::Result<T, RecommendError>;

impl RecommendError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RecommendError::Config(msg.into())
    }

    /// Create a tag resolution error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        RecommendError::Tag(msg.into())
    }

    /// Create a commit retrieval error with context
    pub fn commit_retrieval(msg: impl Into<String>) -> Self {
        RecommendError::CommitRetrieval(msg.into())
    }

    /// Create a parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        RecommendError::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RecommendError::config("packageName is required");
        assert_eq!(
            err.to_string(),
            "Configuration error: packageName is required"
        );
    }

    #[test]
    fn test_preset_not_found_names_preset() {
        let err = RecommendError::PresetNotFound("does-not-exist".to_string());
        assert_eq!(err.to_string(), "Preset: \"does-not-exist\" does not exist");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RecommendError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_git() {
        let git_err = git2::Error::from_str("object not found");
        let err: RecommendError = git_err.into();
        assert!(err.to_string().starts_with("Git operation failed"));
        assert!(err.to_string().contains("object not found"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Value>("not = = toml").unwrap_err();
        let err: RecommendError = toml_err.into();
        assert!(err.to_string().starts_with("Invalid configuration file"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (RecommendError::config("x"), "Configuration error"),
            (RecommendError::tag("x"), "Tag resolution failed"),
            (
                RecommendError::commit_retrieval("x"),
                "Commit retrieval failed",
            ),
            (RecommendError::parse("x"), "Parse error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_special_characters_in_messages() {
        let special_chars = vec![
            "message with\nnewline",
            "message with 'quotes'",
            "message with \"double quotes\"",
            "message with unicode: ñ",
        ];

        for msg in special_chars {
            let err = RecommendError::parse(msg);
            assert!(err.to_string().contains(msg));
        }
    }
}
