use futures::StreamExt;
use std::fmt;
use std::sync::Arc;

use crate::analyzer::decider::{BumpDecider, NoopDecider};
use crate::analyzer::outcome::Recommendation;
use crate::analyzer::package_filter::PackageFilter;
use crate::config::BumpConfig;
use crate::conventional::{filter_reverted, CommitParser, ParserOptions};
use crate::error::{RecommendError, Result};
use crate::git::{CommitRange, CommitSource, TagResolver};
use crate::presets::load_preset;
use crate::warning::{RecommendWarning, Warn};

/// Options for one recommendation run.
///
/// Construct with [`RecommendOptions::new`], which rejects an empty package
/// name before any I/O happens.
#[derive(Clone)]
pub struct RecommendOptions {
    package_name: String,
    /// Named preset; takes precedence over `config`
    pub preset: Option<String>,
    /// Inline grammar and decider
    pub config: Option<BumpConfig>,
    /// Caller decider, overrides the preset's or config's
    pub what_bump: Option<Arc<dyn BumpDecider>>,
    /// Drop reverted commits (and their reverts) before deciding
    pub ignore_reverted: bool,
    pub warn: Warn,
}

impl RecommendOptions {
    pub fn new(package_name: impl Into<String>) -> Result<Self> {
        let package_name = package_name.into();
        if package_name.is_empty() {
            return Err(RecommendError::config("package name is required"));
        }

        Ok(RecommendOptions {
            package_name,
            preset: None,
            config: None,
            what_bump: None,
            ignore_reverted: true,
            warn: Warn::noop(),
        })
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    pub fn config(mut self, config: BumpConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn what_bump(mut self, decider: impl BumpDecider + 'static) -> Self {
        self.what_bump = Some(Arc::new(decider));
        self
    }

    pub fn ignore_reverted(mut self, ignore: bool) -> Self {
        self.ignore_reverted = ignore;
        self
    }

    pub fn warn(mut self, warn: Warn) -> Self {
        self.warn = warn;
        self
    }
}

impl fmt::Debug for RecommendOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecommendOptions")
            .field("package_name", &self.package_name)
            .field("preset", &self.preset)
            .field("config", &self.config)
            .field("what_bump", &self.what_bump.as_ref().map(|_| ".."))
            .field("ignore_reverted", &self.ignore_reverted)
            .field("warn", &self.warn)
            .finish()
    }
}

/// Grammar and decider in effect for one run
struct ResolvedConfig {
    parser_opts: ParserOptions,
    what_bump: Arc<dyn BumpDecider>,
}

fn resolve_config(options: &RecommendOptions, parser_opts: ParserOptions) -> Result<ResolvedConfig> {
    let (base_opts, base_decider): (ParserOptions, Option<Arc<dyn BumpDecider>>) =
        if let Some(name) = &options.preset {
            let preset = load_preset(name)?;
            (preset.parser_opts, Some(preset.what_bump))
        } else if let Some(config) = &options.config {
            let decider = config
                .what_bump
                .clone()
                .map(|rules| Arc::new(rules) as Arc<dyn BumpDecider>);
            (config.parser_opts.clone(), decider)
        } else {
            (ParserOptions::default(), None)
        };

    let mut merged = base_opts.merge(parser_opts);
    if merged.warn.is_none() {
        merged.warn = Some(options.warn.clone());
    }

    let what_bump = options
        .what_bump
        .clone()
        .or(base_decider)
        .unwrap_or_else(|| Arc::new(NoopDecider));

    Ok(ResolvedConfig {
        parser_opts: merged,
        what_bump,
    })
}

/// Recommend a bump for `options.package_name()` from the commits since its
/// latest release tag.
///
/// `parser_opts` override the preset's or config's grammar key by key.
///
/// Must be awaited inside a tokio runtime: [`Git2Repository`] walks history on
/// a blocking thread and panics without one.
///
/// [`Git2Repository`]: crate::git::Git2Repository
///
/// # Errors
/// Unknown presets and invalid grammars fail before touching the repository.
/// Tag resolution, commit retrieval and parse failures are returned as
/// produced. An empty history or a decider returning nothing are not errors.
pub async fn recommend<R>(
    repo: &R,
    options: &RecommendOptions,
    parser_opts: ParserOptions,
) -> Result<Recommendation>
where
    R: TagResolver + CommitSource,
{
    let resolved = resolve_config(options, parser_opts)?;
    let parser = CommitParser::new(&resolved.parser_opts)?;
    let package_name = options.package_name();

    let tag = repo.resolve_latest_tag(package_name).await?;
    match &tag {
        Some(tag) => tracing::debug!(package = package_name, %tag, "found latest release tag"),
        None => tracing::debug!(package = package_name, "no release tag, reading full history"),
    }

    let mut raws = repo.stream_commits(CommitRange::since(tag));
    let mut commits = Vec::new();
    while let Some(raw) = raws.next().await {
        if let Some(commit) = parser.parse_or_skip(&raw?)? {
            commits.push(commit);
        }
    }
    tracing::debug!(count = commits.len(), "parsed commits since release");

    if options.ignore_reverted {
        commits = filter_reverted(commits);
    }

    let filter = PackageFilter::new(package_name);
    commits.retain(|commit| filter.is_relevant(commit));
    tracing::debug!(
        count = commits.len(),
        package = package_name,
        "commits affecting package"
    );

    if commits.is_empty() {
        options.warn.emit(&RecommendWarning::NoCommitsSinceRelease);
    }

    let recommendation = Recommendation::normalize(resolved.what_bump.what_bump(&commits));
    if let (Some(level), None) = (recommendation.level, recommendation.release_as) {
        tracing::warn!(level, "bump level out of range, no release type");
    }

    Ok(recommendation)
}
