pub mod analyzer;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod presets;
pub mod ui;
pub mod warning;

pub use analyzer::{recommend, BumpDecider, BumpOutcome, Recommendation, RecommendOptions};
pub use conventional::ParserOptions;
pub use error::{RecommendError, Result};
pub use warning::{RecommendWarning, Warn};
