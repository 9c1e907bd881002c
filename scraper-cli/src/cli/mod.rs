//! # Command Line Interface
//!
//! Defines the CLI arguments for the scraper and turns them into a
//! [`ScrapeConfig`].

use std::io;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser};
use scraper_core::{ColorMode, RepoCoordinates};
use scraper_gh::consts::GRAPHQL_API_URL;

use crate::scrape::{ScrapeConfig, run_scrape};

/// Top-level CLI command for the issue URL scraper
#[derive(Parser, Debug)]
#[command(name = "issue-url-scraper")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "List URLs mentioned in a GitHub issue and the issues that reference it")]
#[command(long_about = "Collects the URLs mentioned in the body and comments of a GitHub issue and of\n\
        every issue that cross-references it, and prints each unique URL once.\n\n\
        Only the first URL of each body or comment is considered. Links to github.com\n\
        and localhost are skipped.")]
#[command(after_help = "The API token is read from --token or the GH_TOKEN_ISSUE_SCRAPER environment variable.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Number of the issue to scan
  #[arg(value_name = "ISSUE", value_parser = clap::value_parser!(u64).range(1..))]
  pub issue: u64,

  /// Repository containing the issue
  #[arg(long, value_name = "OWNER/NAME", default_value_t = RepoCoordinates::default())]
  pub repo: RepoCoordinates,

  /// GitHub token (defaults to the GH_TOKEN_ISSUE_SCRAPER environment variable)
  #[arg(long, value_name = "TOKEN")]
  pub token: Option<String>,

  /// GraphQL endpoint to query
  #[arg(long, value_name = "URL", default_value = GRAPHQL_API_URL)]
  pub api_url: String,

  /// Additional host to skip when collecting URLs (can be used multiple times)
  #[arg(long = "exclude-host", value_name = "HOST")]
  pub exclude_hosts: Vec<String>,

  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,
}

impl From<Cli> for ScrapeConfig {
  fn from(cli: Cli) -> Self {
    Self {
      issue_number: cli.issue,
      repo: cli.repo,
      token: cli.token,
      api_url: cli.api_url,
      excluded_hosts: cli.exclude_hosts,
    }
  }
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let config = ScrapeConfig::from(cli);
  let stdout = io::stdout();
  let mut out = stdout.lock();
  run_scrape(config, &mut out)
}
