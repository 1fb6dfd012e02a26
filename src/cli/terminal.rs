//! Terminal capability detection and colour helpers.

use owo_colors::OwoColorize;

/// Whether stdout supports coloured output.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detected terminal width in columns, when available.
pub fn width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Extension trait for semantic colouring of CLI output.
///
/// Every method degrades to plain text when the terminal does not support
/// colour.
pub trait Colorize {
    /// Green success text.
    fn success(&self) -> String;
    /// Yellow warning text.
    fn warning(&self) -> String;
    /// Red error text.
    fn error(&self) -> String;
    /// Dimmed secondary text.
    fn dim(&self) -> String;
}

impl<T: AsRef<str>> Colorize for T {
    fn success(&self) -> String {
        let text = self.as_ref();
        if supports_color() {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(&self) -> String {
        let text = self.as_ref();
        if supports_color() {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self) -> String {
        let text = self.as_ref();
        if supports_color() {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self) -> String {
        let text = self.as_ref();
        if supports_color() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
