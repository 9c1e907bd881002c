//! # Issue URL Scraper CLI Library
//!
//! Argument parsing and the scrape orchestrator behind the
//! `issue-url-scraper` binary.

pub mod cli;
pub mod scrape;
