//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Success mark
pub const CHECK: &str = "✓";

/// Failure mark
pub const CROSS: &str = "✗";

/// Semantic colors for terminal output
///
/// Colors are dropped automatically when stdout is not a color terminal.
pub trait Stylize {
    /// De-emphasized text
    fn muted(&self) -> String;
    /// Bold text
    fn emphasis(&self) -> String;
    /// Highlighted values (names, counts)
    fn accent(&self) -> String;
    /// Success text
    fn success(&self) -> String;
    /// Warning text
    fn warn(&self) -> String;
    /// Error text
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    }

    fn error(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.red())
            .to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error()
}

/// Arrow pointing from head to base
pub fn arrow() -> String {
    "<--".muted()
}

/// Spinner style shared by every progress line
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
