//! URL extraction helpers shared across crates.
//!
//! Comment bodies are free text. The extractor pulls the first URL-shaped
//! substring out of a body, normalizes it through [`Url`], and drops links
//! that point back at the issue tracker itself or at a local machine.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::trace;
use url::Url;

/// Hosts whose links are never reported.
pub const DEFAULT_EXCLUDED_HOSTS: &[&str] = &["localhost", "github.com"];

// Case folding is ASCII-only so letters like U+017F or U+212A end a match.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  RegexBuilder::new(
    r"(?:(?:https?|file)://|www\.)(?:\([-A-Z0-9+&@#/%=~_|$?!:,.]*\)|[-A-Z0-9+&@#/%=~_|$?!:,.])*(?:\([-A-Z0-9+&@#/%=~_|$?!:,.]*\)|[A-Z0-9+&@#/%=~_|$])",
  )
  .case_insensitive(true)
  .multi_line(true)
  .unicode(false)
  .build()
  .expect("Failed to compile URL regex")
});

/// Pulls the first non-excluded URL out of a text blob.
#[derive(Debug, Clone)]
pub struct UrlExtractor {
  excluded_hosts: Vec<String>,
}

impl Default for UrlExtractor {
  fn default() -> Self {
    Self::new(DEFAULT_EXCLUDED_HOSTS.iter().copied())
  }
}

impl UrlExtractor {
  /// Create an extractor that excludes exactly the given hosts.
  pub fn new<I, S>(excluded_hosts: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self {
      excluded_hosts: excluded_hosts
        .into_iter()
        .map(|host| host.as_ref().trim().to_ascii_lowercase())
        .filter(|host| !host.is_empty())
        .collect(),
    }
  }

  /// Add another host to the exclusion list.
  pub fn with_excluded_host(mut self, host: &str) -> Self {
    let host = host.trim().to_ascii_lowercase();
    if !host.is_empty() && !self.excluded_hosts.contains(&host) {
      self.excluded_hosts.push(host);
    }
    self
  }

  /// Hosts currently excluded, in the order they were added.
  pub fn excluded_hosts(&self) -> &[String] {
    &self.excluded_hosts
  }

  /// Return the first URL in `text` as a normalized absolute URL.
  ///
  /// Only the first match is considered: if it fails to parse or points at an
  /// excluded host the result is `None`, even when later URLs would qualify.
  /// Bare `www.` matches are given an `http://` scheme.
  pub fn extract(&self, text: &str) -> Option<String> {
    let matched = URL_REGEX.find(text)?.as_str();

    let candidate = if has_www_prefix(matched) {
      format!("http://{matched}")
    } else {
      matched.to_string()
    };

    let url = match Url::parse(&candidate) {
      Ok(url) => url,
      Err(err) => {
        trace!("Discarding unparseable URL '{}': {}", candidate, err);
        return None;
      }
    };

    if self.is_excluded(&url) {
      trace!("Discarding excluded URL '{}'", url);
      return None;
    }

    Some(url.as_str().to_string())
  }

  fn is_excluded(&self, url: &Url) -> bool {
    let Some(host) = url.host_str() else {
      return false;
    };
    let host = host.to_ascii_lowercase();
    self.excluded_hosts.iter().any(|excluded| host.contains(excluded.as_str()))
  }
}

fn has_www_prefix(matched: &str) -> bool {
  matched.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("www."))
}

/// Extract the first URL from `text` using the default exclusions.
pub fn extract_url(text: &str) -> Option<String> {
  UrlExtractor::default().extract(text)
}

/// A set of URLs that remembers first-insertion order.
#[derive(Debug, Default, Clone)]
pub struct UrlSet {
  seen: HashSet<String>,
  ordered: Vec<String>,
}

impl UrlSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a URL, returning `false` if it was already present.
  pub fn insert(&mut self, url: String) -> bool {
    if self.seen.contains(&url) {
      return false;
    }
    self.seen.insert(url.clone());
    self.ordered.push(url);
    true
  }

  pub fn contains(&self, url: &str) -> bool {
    self.seen.contains(url)
  }

  pub fn len(&self) -> usize {
    self.ordered.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ordered.is_empty()
  }

  /// Iterate in first-insertion order.
  pub fn iter(&self) -> std::slice::Iter<'_, String> {
    self.ordered.iter()
  }
}

impl Extend<String> for UrlSet {
  fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
    for url in iter {
      self.insert(url);
    }
  }
}

impl IntoIterator for UrlSet {
  type Item = String;
  type IntoIter = std::vec::IntoIter<String>;

  fn into_iter(self) -> Self::IntoIter {
    self.ordered.into_iter()
  }
}

impl<'a> IntoIterator for &'a UrlSet {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.ordered.iter()
  }
}
