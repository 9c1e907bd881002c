//! Constants for the scraper-gh client

/// GraphQL endpoint of the official SaaS GitHub API
pub const GRAPHQL_API_URL: &str = "https://api.github.com/graphql";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for GraphQL responses
pub const ACCEPT: &str = "application/json";

/// Number of timeline items fetched for the root issue
pub const TIMELINE_PAGE_SIZE: u32 = 250;

/// Number of comments fetched per issue
pub const COMMENTS_PAGE_SIZE: u32 = 100;
