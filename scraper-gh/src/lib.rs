//! # GitHub API Client
//!
//! Provides GitHub GraphQL API integration for the issue URL scraper: a query
//! executor bound to one repository, typed response schemas, and the issue
//! timeline and comment queries.

pub mod auth;
pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;

// Re-export the client
pub use client::{GitHubClient, create_github_client};
// Re-export models
pub use models::{GitHubAuth, IssueComments, IssueRef, IssueTimeline};
