//! Recommendation engine: package scoping, bump deciders and the pipeline

pub mod decider;
pub mod outcome;
pub mod package_filter;
pub mod recommender;

pub use decider::{BumpDecider, NoopDecider, RuleDecider};
pub use outcome::{BumpDetails, BumpOutcome, Recommendation};
pub use package_filter::{package_filter, PackageFilter};
pub use recommender::{recommend, RecommendOptions};
