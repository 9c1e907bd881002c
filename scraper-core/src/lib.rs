//! # Scraper Core Library
//!
//! Shared building blocks for the issue URL scraper: URL extraction and
//! deduplication, repository coordinates, and terminal output helpers. The
//! GitHub client and the CLI both build on this crate.

pub mod config;
pub mod output;
pub mod url;

pub use config::{DEFAULT_OWNER, DEFAULT_REPO, ENV_GITHUB_TOKEN, RepoCoordinates};
pub use output::ColorMode;
pub use url::{DEFAULT_EXCLUDED_HOSTS, UrlExtractor, UrlSet, extract_url};
