//! Terminal styling helpers - colors degrade gracefully when unsupported

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Cross mark for failures
pub const CROSS: &str = "✗";

/// Semantic styling, applied only when stdout supports color
pub trait Stylize: Display + Sized {
    /// Bold, for headings and key phrases
    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |s| s.bold())
            .to_string()
    }

    /// Dimmed, for secondary detail
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string()
    }

    /// Cyan, for names and values worth spotting
    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |s| s.cyan())
            .to_string()
    }

    /// Green, for completed work
    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |s| s.green())
            .to_string()
    }

    /// Yellow, for soft failures and cautions
    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |s| s.yellow())
            .to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled arrow for list items
pub fn arrow() -> String {
    "→".accent()
}

/// Red failure line for stderr
pub fn failure(message: &str) -> String {
    format!(
        "{} {message}",
        CROSS.if_supports_color(Stream::Stderr, |s| s.red())
    )
}

/// Spinner style shared by long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Clickable link when the terminal supports it, plain URL otherwise
pub fn link(text: &str, url: &str) -> String {
    if supports_hyperlinks::supports_hyperlinks() {
        terminal_link::Link::new(text, url).to_string()
    } else {
        url.to_string()
    }
}
