//! Test utilities shared across the scraper workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - GraphQL response fixtures and mock mounting helpers ([`graphql`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod graphql;

// Re-export commonly used items
pub use env::EnvVarGuard;
pub use graphql::{
  comments_response, graphql_error_response, mount_comments, mount_timeline, not_found_response, timeline_response,
};
