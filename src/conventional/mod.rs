//! Commit grammar: parsing raw commits and filtering reverted ones

pub mod options;
pub mod parser;
pub mod revert;

pub use options::ParserOptions;
pub use parser::CommitParser;
pub use revert::filter_reverted;
