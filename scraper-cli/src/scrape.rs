//! # Scrape Orchestration
//!
//! Drives a scrape end to end: fetch the root issue's timeline, build the list
//! of issues to scan, pull URLs out of every body and comment, and print the
//! report. Requests are made one at a time.

use std::io::Write;

use anyhow::{Context, Result};
use scraper_core::output::{format_count, format_title, format_url};
use scraper_core::{RepoCoordinates, UrlExtractor, UrlSet};
use scraper_gh::auth::create_github_runtime_and_client;
use scraper_gh::{GitHubClient, IssueRef};
use tracing::{debug, info, instrument};

/// Everything a scrape needs, resolved up front
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
  pub issue_number: u64,
  pub repo: RepoCoordinates,
  pub token: Option<String>,
  pub api_url: String,
  /// Hosts skipped in addition to the default exclusions
  pub excluded_hosts: Vec<String>,
}

impl ScrapeConfig {
  /// The extractor for this scrape
  pub fn extractor(&self) -> UrlExtractor {
    self
      .excluded_hosts
      .iter()
      .fold(UrlExtractor::default(), |extractor, host| extractor.with_excluded_host(host))
  }
}

/// The root issue's title and the issues to scan, root first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
  pub title: String,
  pub issues: Vec<IssueRef>,
}

/// Put the root issue in front of the issues that reference it.
///
/// Repeated references are kept, so an issue that references the root twice
/// is scanned twice.
pub fn build_scan_list(root: u64, referencing: Vec<IssueRef>) -> Vec<IssueRef> {
  let mut issues = Vec::with_capacity(referencing.len() + 1);
  issues.push(IssueRef::new(root));
  issues.extend(referencing);
  issues
}

/// Fetch the root issue's title and work out which issues to scan.
#[instrument(skip(client), level = "debug")]
pub async fn plan_scan(client: &GitHubClient, root: u64) -> Result<ScanPlan> {
  let timeline = client.get_issue_timeline(root).await?;
  let referencing = timeline.referencing_issues();
  debug!("Issue #{} is referenced by {} issue(s)", root, referencing.len());

  Ok(ScanPlan {
    title: timeline.title,
    issues: build_scan_list(root, referencing),
  })
}

/// Scan every issue in order and collect the first URL of each body.
pub async fn collect_urls(client: &GitHubClient, issues: &[IssueRef], extractor: &UrlExtractor) -> Result<UrlSet> {
  let mut urls = UrlSet::new();

  for issue in issues {
    match &issue.title {
      Some(title) => info!("Scanning issue #{} ({})", issue.number, title),
      None => info!("Scanning issue #{}", issue.number),
    }

    let comments = client.get_issue_comments(issue.number).await?;
    let before = urls.len();
    urls.extend(comments.iter().filter_map(|comment| extractor.extract(comment)));
    debug!(
      "Issue #{}: {} bodies, {} new URL(s)",
      issue.number,
      comments.len(),
      urls.len() - before
    );
  }

  Ok(urls)
}

/// Write the title line and the issue count line.
pub fn write_header(out: &mut impl Write, plan: &ScanPlan) -> Result<()> {
  writeln!(out, "title: {}", format_title(&plan.title))?;
  writeln!(out, "parsing {} issues for URLs", format_count(plan.issues.len()))?;
  Ok(())
}

/// Write one URL per line in first-insertion order.
pub fn write_urls(out: &mut impl Write, urls: &UrlSet) -> Result<()> {
  for url in urls {
    writeln!(out, "{}", format_url(url))?;
  }
  out.flush().context("Failed to flush output")?;
  Ok(())
}

/// Run a scrape with an existing client, writing the report to `out`.
pub async fn scrape(client: &GitHubClient, config: &ScrapeConfig, out: &mut impl Write) -> Result<UrlSet> {
  info!("Scraping issue #{} in {}", config.issue_number, client.repo());

  let plan = plan_scan(client, config.issue_number).await?;
  write_header(out, &plan)?;

  let urls = collect_urls(client, &plan.issues, &config.extractor()).await?;
  write_urls(out, &urls)?;

  info!("Found {} unique URL(s)", urls.len());
  Ok(urls)
}

/// Build the runtime and client for `config` and run the scrape.
pub fn run_scrape(config: ScrapeConfig, out: &mut impl Write) -> Result<()> {
  let (rt, client) = create_github_runtime_and_client(config.token.clone(), config.repo.clone())?;
  let client = client.with_api_url(config.api_url.clone());

  rt.block_on(scrape(&client, &config, out))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use scraper_test_utils::{comments_response, mount_comments, mount_timeline, not_found_response, timeline_response};
  use serde_json::json;
  use wiremock::matchers::{body_partial_json, body_string_contains, method};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn test_config(issue_number: u64, api_url: String) -> ScrapeConfig {
    ScrapeConfig {
      issue_number,
      repo: RepoCoordinates::new("owner", "repo"),
      token: Some("test_token".to_string()),
      api_url,
      excluded_hosts: Vec::new(),
    }
  }

  fn test_client(config: &ScrapeConfig) -> GitHubClient {
    scraper_gh::create_github_client(config.token.as_deref(), config.repo.clone()).with_api_url(config.api_url.clone())
  }

  #[test]
  fn test_build_scan_list_without_references() {
    let issues = build_scan_list(10, Vec::new());
    assert_eq!(issues, vec![IssueRef::new(10)]);
  }

  #[test]
  fn test_build_scan_list_keeps_duplicates() {
    let referencing = vec![
      IssueRef {
        number: 3,
        title: Some("Three".to_string()),
      },
      IssueRef {
        number: 3,
        title: Some("Three".to_string()),
      },
    ];

    let numbers: Vec<u64> = build_scan_list(1, referencing).iter().map(|issue| issue.number).collect();
    assert_eq!(numbers, vec![1, 3, 3]);
  }

  #[test]
  fn test_config_extractor_adds_hosts() {
    let mut config = test_config(1, String::new());
    config.excluded_hosts = vec!["example.org".to_string()];

    let extractor = config.extractor();
    assert_eq!(extractor.excluded_hosts(), ["localhost", "github.com", "example.org"]);
  }

  #[test]
  fn test_write_header_and_urls() -> Result<()> {
    scraper_core::ColorMode::Never.apply();
    let plan = ScanPlan {
      title: "Slow page".to_string(),
      issues: build_scan_list(1, vec![IssueRef::new(2)]),
    };
    let mut urls = UrlSet::new();
    urls.insert("https://b.example/".to_string());
    urls.insert("https://a.example/".to_string());

    let mut out = Vec::new();
    write_header(&mut out, &plan)?;
    write_urls(&mut out, &urls)?;

    assert_eq!(
      String::from_utf8(out)?,
      "title: Slow page\nparsing 2 issues for URLs\nhttps://b.example/\nhttps://a.example/\n"
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_scrape_root_only() -> Result<()> {
    scraper_core::ColorMode::Never.apply();
    let mock_server = MockServer::start().await;
    mount_timeline(&mock_server, 1, timeline_response("Lonely issue", &[])).await;
    mount_comments(
      &mock_server,
      1,
      comments_response(
        "Repro: https://example.com/repro",
        &["Still broken on https://example.com/other", "see http://localhost:3000/"],
      ),
    )
    .await;

    let config = test_config(1, format!("{}/graphql", mock_server.uri()));
    let client = test_client(&config);
    let mut out = Vec::new();
    let urls = scrape(&client, &config, &mut out).await?;

    assert_eq!(urls.len(), 2);
    assert_eq!(
      String::from_utf8(out)?,
      "title: Lonely issue\n\
       parsing 1 issues for URLs\n\
       https://example.com/repro\n\
       https://example.com/other\n"
    );
    Ok(())
  }

  #[tokio::test]
  async fn test_scrape_referenced_issues_deduplicates_urls() -> Result<()> {
    scraper_core::ColorMode::Never.apply();
    let mock_server = MockServer::start().await;
    mount_timeline(
      &mock_server,
      100,
      timeline_response("Root issue", &[(200, "First ref"), (300, "Second ref")]),
    )
    .await;
    mount_comments(
      &mock_server,
      100,
      comments_response("Site: https://site.example/a", &["https://github.com/owner/repo/issues/200"]),
    )
    .await;
    mount_comments(
      &mock_server,
      200,
      comments_response("", &["Same site https://site.example/a", "www.docs.example/page"]),
    )
    .await;
    mount_comments(
      &mock_server,
      300,
      comments_response("file:///tmp/trace.json", &[]),
    )
    .await;

    let config = test_config(100, format!("{}/graphql", mock_server.uri()));
    let client = test_client(&config);
    let mut out = Vec::new();
    let urls = scrape(&client, &config, &mut out).await?;

    let collected: Vec<&String> = urls.iter().collect();
    assert_eq!(
      collected,
      vec![
        "https://site.example/a",
        "http://www.docs.example/page",
        "file:///tmp/trace.json",
      ]
    );

    let output = String::from_utf8(out)?;
    assert!(output.starts_with("title: Root issue\nparsing 3 issues for URLs\n"));
    Ok(())
  }

  #[tokio::test]
  async fn test_scrape_scans_repeated_reference_twice() -> Result<()> {
    let mock_server = MockServer::start().await;
    mount_timeline(
      &mock_server,
      1,
      timeline_response("Root", &[(2, "Twice"), (2, "Twice")]),
    )
    .await;
    mount_comments(&mock_server, 1, comments_response("no links", &[])).await;

    Mock::given(method("POST"))
      .and(body_string_contains("comments(first"))
      .and(body_partial_json(json!({ "variables": { "number": 2 } })))
      .respond_with(ResponseTemplate::new(200).set_body_json(comments_response("https://example.com/dup", &[])))
      .expect(2)
      .mount(&mock_server)
      .await;

    let config = test_config(1, format!("{}/graphql", mock_server.uri()));
    let client = test_client(&config);
    let mut out = Vec::new();
    let urls = scrape(&client, &config, &mut out).await?;

    assert_eq!(urls.len(), 1);
    assert!(urls.contains("https://example.com/dup"));
    Ok(())
  }

  #[tokio::test]
  async fn test_scrape_aborts_when_a_referenced_issue_fails() -> Result<()> {
    scraper_core::ColorMode::Never.apply();
    let mock_server = MockServer::start().await;
    mount_timeline(&mock_server, 1, timeline_response("Root", &[(404, "Gone")])).await;
    mount_comments(&mock_server, 1, comments_response("https://example.com/", &[])).await;
    mount_comments(&mock_server, 404, not_found_response(404)).await;

    let config = test_config(1, format!("{}/graphql", mock_server.uri()));
    let client = test_client(&config);
    let mut out = Vec::new();
    let error = scrape(&client, &config, &mut out).await.unwrap_err();

    assert!(format!("{error:#}").contains("issue #404"));
    let output = String::from_utf8(out)?;
    assert!(output.contains("parsing 2 issues for URLs"));
    assert!(!output.contains("https://example.com/"));
    Ok(())
  }

  #[tokio::test]
  async fn test_scrape_honors_extra_excluded_hosts() -> Result<()> {
    let mock_server = MockServer::start().await;
    mount_timeline(&mock_server, 8, timeline_response("Root", &[])).await;
    mount_comments(
      &mock_server,
      8,
      comments_response("https://internal.corp.example/x", &["https://public.example/y"]),
    )
    .await;

    let mut config = test_config(8, format!("{}/graphql", mock_server.uri()));
    config.excluded_hosts = vec!["corp.example".to_string()];
    let client = test_client(&config);
    let mut out = Vec::new();
    let urls = scrape(&client, &config, &mut out).await?;

    let collected: Vec<&String> = urls.iter().collect();
    assert_eq!(collected, vec!["https://public.example/y"]);
    Ok(())
  }
}
