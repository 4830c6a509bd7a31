use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use recommended_bump::config;
use recommended_bump::git::Git2Repository;
use recommended_bump::ui;
use recommended_bump::{recommend, ParserOptions, RecommendOptions, Warn};

#[derive(clap::Parser, Debug)]
#[command(
    name = "recommended-bump",
    version,
    about = "Recommend a semver bump for a package from its conventional commits",
    disable_help_flag = true
)]
struct Args {
    #[arg(help = "Package whose release tags and commits are analyzed")]
    package: String,

    #[arg(short, long, help = "Name of a built-in preset")]
    preset: Option<String>,

    #[arg(short = 'g', long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'h', long, value_name = "REGEX", help = "Regex to match the commit header")]
    header_pattern: Option<String>,

    #[arg(
        short = 'c',
        long,
        value_delimiter = ',',
        help = "Comma-separated names for the header pattern's capture groups"
    )]
    header_correspondence: Option<Vec<String>>,

    #[arg(short, long, value_delimiter = ',', help = "Comma-separated reference actions")]
    reference_actions: Option<Vec<String>>,

    #[arg(short, long, value_delimiter = ',', help = "Comma-separated issue prefixes")]
    issue_prefixes: Option<Vec<String>>,

    #[arg(short, long, value_delimiter = ',', help = "Comma-separated note keywords")]
    note_keywords: Option<Vec<String>>,

    #[arg(short, long, value_name = "REGEX", help = "Regex to match other fields")]
    field_pattern: Option<String>,

    #[arg(short, long, help = "Print warnings, debug logs and the reason")]
    verbose: bool,

    #[arg(long, help = "Keep reverted commits and their reverts")]
    no_ignore_reverted: bool,

    #[arg(short = 'C', long, default_value = ".", help = "Path inside the repository")]
    repo: String,

    #[arg(long, action = ArgAction::Help, help = "Print help")]
    help: Option<bool>,
}

/// Trim list entries and drop empty ones, so `"a, b,"` means `["a", "b"]`
fn list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.map(|values| {
        values
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    })
}

impl Args {
    fn parser_opts(&self) -> ParserOptions {
        ParserOptions {
            header_pattern: self.header_pattern.clone(),
            header_correspondence: list(self.header_correspondence.clone()),
            field_pattern: self.field_pattern.clone(),
            note_keywords: list(self.note_keywords.clone()),
            reference_actions: list(self.reference_actions.clone()),
            issue_prefixes: list(self.issue_prefixes.clone()),
            ..Default::default()
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let mut options =
        RecommendOptions::new(args.package.clone())?.ignore_reverted(!args.no_ignore_reverted);

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Cannot open git repository at '{}'", args.repo))?;

    if let Some(preset) = &args.preset {
        options = options.preset(preset.clone());
    } else {
        let config_dir = repo.workdir().unwrap_or_else(|| Path::new(&args.repo));
        if let Some(config) = config::load_config_in(args.config.as_deref(), config_dir)
            .context("Failed to load configuration")?
        {
            options = options.config(config);
        }
    }

    if args.verbose {
        options = options.warn(Warn::new(ui::display_warning));
    }

    let recommendation = recommend(&repo, &options, args.parser_opts()).await?;
    ui::display_recommendation(&recommendation, args.verbose);

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
