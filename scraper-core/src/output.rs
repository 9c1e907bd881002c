//! # Output Formatting
//!
//! Terminal styling for the scraper's report. Styling is only
//! applied when the target stream supports it, so piped output stays plain.

use owo_colors::{OwoColorize, Stream};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the process-wide color override.
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      ColorMode::Auto => {
        // Let owo_colors detect the terminal itself
      }
    }
  }
}

/// Format an issue title for the report header
pub fn format_title(title: &str) -> String {
  title.if_supports_color(Stream::Stdout, |text| text.bold()).to_string()
}

/// Format an issue count for the report header
pub fn format_count(count: usize) -> String {
  count.if_supports_color(Stream::Stdout, |text| text.cyan()).to_string()
}

/// Format an extracted URL
pub fn format_url(url: &str) -> String {
  url.if_supports_color(Stream::Stdout, |text| text.bright_green()).to_string()
}
