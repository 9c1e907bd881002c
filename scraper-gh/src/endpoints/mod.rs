//! # GitHub API Endpoints
//!
//! The GraphQL query executor and the issue queries built on it.

pub mod graphql;
pub mod issues;
