use std::fmt;
use std::sync::Arc;

/// Non-fatal conditions met while recommending a bump.
/// They never abort the pipeline; they are routed through [`Warn`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendWarning {
    /// No relevant commits since the package's last release
    NoCommitsSinceRelease,
    /// A single raw commit could not be parsed and was skipped
    UnparsableCommit { reason: String },
}

impl fmt::Display for RecommendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendWarning::NoCommitsSinceRelease => {
                write!(f, "No commits since last release")
            }
            RecommendWarning::UnparsableCommit { reason } => {
                write!(f, "Skipping unparsable commit: {}", reason)
            }
        }
    }
}

/// Side-effecting warning sink supplied by the caller
#[derive(Clone)]
pub struct Warn(Arc<dyn Fn(&str) + Send + Sync>);

impl Warn {
    pub fn new(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Warn(Arc::new(sink))
    }

    /// A sink that drops every message
    pub fn noop() -> Self {
        Warn::new(|_| {})
    }

    pub fn call(&self, message: &str) {
        (self.0)(message)
    }

    pub fn emit(&self, warning: &RecommendWarning) {
        self.call(&warning.to_string())
    }
}

impl Default for Warn {
    fn default() -> Self {
        Warn::noop()
    }
}

impl fmt::Debug for Warn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Warn(..)")
    }
}
