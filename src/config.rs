use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::RuleDecider;
use crate::conventional::ParserOptions;
use crate::error::Result;

/// File name looked up in the repository root or working directory
pub const LOCAL_CONFIG_FILE: &str = ".recommended-bump.toml";

/// Inline configuration: a commit grammar plus an optional rule-based decider.
///
/// Loaded from TOML, e.g.
///
/// ```toml
/// [parser_opts]
/// header_pattern = '^(\w*)(?:\((.*)\))?: (.*)$'
/// note_keywords = ["BREAKING CHANGE"]
///
/// [what_bump]
/// minor = ["feat"]
/// patch = ["fix", "perf"]
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BumpConfig {
    #[serde(default)]
    pub parser_opts: ParserOptions,

    #[serde(default)]
    pub what_bump: Option<RuleDecider>,
}

/// Location of the per-user configuration file, if a config dir exists
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("recommended-bump").join("config.toml"))
}

/// Parse a configuration file at a known path
pub fn read_config(path: impl AsRef<Path>) -> Result<BumpConfig> {
    let config_str = fs::read_to_string(path)?;
    let config: BumpConfig = toml::from_str(&config_str)?;
    Ok(config)
}

/// Loads configuration from file, if any, looking in the current directory.
///
/// See [`load_config_in`].
pub fn load_config(config_path: Option<&str>) -> Result<Option<BumpConfig>> {
    load_config_in(config_path, Path::new("."))
}

/// Loads configuration from file, if any.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.recommended-bump.toml` in `dir`
/// 3. `recommended-bump/config.toml` in the user config directory
///
/// # Returns
/// * `Ok(Some(BumpConfig))` - Loaded configuration
/// * `Ok(None)` - No explicit path given and no file found
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config_in(config_path: Option<&str>, dir: &Path) -> Result<Option<BumpConfig>> {
    if let Some(path) = config_path {
        return read_config(path).map(Some);
    }

    let local = dir.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        tracing::debug!(path = %local.display(), "using local configuration");
        return read_config(local).map(Some);
    }

    match user_config_path() {
        Some(path) if path.exists() => read_config(path).map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = BumpConfig::default();
        assert!(config.parser_opts.header_pattern.is_none());
        assert!(config.what_bump.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: BumpConfig = toml::from_str(
            r##"
[parser_opts]
header_pattern = '^(\w*): (.*)$'
header_correspondence = ["type", "subject"]
issue_prefixes = ["#", "GH-"]

[what_bump]
minor = ["feat"]
patch = ["fix"]
"##,
        )
        .unwrap();

        assert_eq!(
            config.parser_opts.header_correspondence(),
            vec!["type", "subject"]
        );
        assert_eq!(config.parser_opts.issue_prefixes(), vec!["#", "GH-"]);
        let decider = config.what_bump.unwrap();
        assert_eq!(decider.patch, vec!["fix"]);
        assert!(decider.breaking_notes);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        assert!(load_config(Some("/definitely/not/here.toml")).is_err());
    }
}
