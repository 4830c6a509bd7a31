//! Terminal output for the CLI.
//!
//! Formatting lives in plain functions returning strings so it can be tested
//! without a terminal. The `display_*` functions print.

use console::style;

use crate::analyzer::Recommendation;

/// Lines printed for a recommendation: the release type, then the reason
/// when `verbose` is set.
pub fn format_recommendation(recommendation: &Recommendation, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(release_as) = recommendation.release_as {
        lines.push(release_as.to_string());
    }
    if verbose {
        if let Some(reason) = &recommendation.reason {
            lines.push(format!("Reason: {}", reason));
        }
    }
    lines
}

pub fn display_recommendation(recommendation: &Recommendation, verbose: bool) {
    for line in format_recommendation(recommendation, verbose) {
        println!("{}", line);
    }
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("WARN:").yellow().for_stderr(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{BumpDetails, BumpOutcome};

    fn minor() -> Recommendation {
        Recommendation::normalize(Some(BumpOutcome::Detailed(
            BumpDetails::with_level(1).reason("There are 0 BREAKING CHANGES and 1 features"),
        )))
    }

    #[test]
    fn test_format_release_type_only() {
        assert_eq!(format_recommendation(&minor(), false), vec!["minor"]);
    }

    #[test]
    fn test_format_verbose_adds_reason() {
        assert_eq!(
            format_recommendation(&minor(), true),
            vec![
                "minor".to_string(),
                "Reason: There are 0 BREAKING CHANGES and 1 features".to_string()
            ]
        );
    }

    #[test]
    fn test_format_empty_recommendation() {
        let empty = Recommendation::normalize(None);
        assert!(format_recommendation(&empty, true).is_empty());
    }
}
