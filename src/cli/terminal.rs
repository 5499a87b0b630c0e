//! Terminal capability detection and colouring.

use std::fmt::Display;

use owo_colors::{OwoColorize, colors::css};

/// Whether stdout should receive ANSI colours.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Width of the attached terminal, if there is one.
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Narrow terminals get fewer table columns.
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 80)
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Accent,
    Dim,
}

fn paint(text: &str, tone: Tone) -> String {
    if !supports_color() {
        return text.to_string();
    }
    match tone {
        Tone::Success => text.fg::<css::Green>().to_string(),
        Tone::Warning => text.fg::<css::Orange>().to_string(),
        Tone::Accent => text.fg::<css::CornflowerBlue>().bold().to_string(),
        Tone::Dim => text.dimmed().to_string(),
    }
}

/// Extension trait for colouring anything printable.
pub trait Colorize: Display {
    /// Green, for completed actions.
    fn success(&self) -> String {
        paint(&self.to_string(), Tone::Success)
    }

    /// Amber, for rejected actions and unavailable items.
    fn warning(&self) -> String {
        paint(&self.to_string(), Tone::Warning)
    }

    /// Bold blue, for headings.
    fn accent(&self) -> String {
        paint(&self.to_string(), Tone::Accent)
    }

    /// Dimmed, for secondary information.
    fn dim(&self) -> String {
        paint(&self.to_string(), Tone::Dim)
    }
}

impl<T: Display + ?Sized> Colorize for T {}
