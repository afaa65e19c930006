//! TUI styles and color themes.

use ratatui::style::{Color, Modifier, Style};
use sentiview_core::Sentiment;

/// Color theme for the TUI.
pub struct ColorTheme {
    pub primary: Color,
    pub positive: Color,
    pub neutral: Color,
    pub negative: Color,
    pub error: Color,
    pub warning: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focus: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            positive: Color::Green,
            neutral: Color::Gray,
            negative: Color::Red,
            error: Color::Red,
            warning: Color::Yellow,
            text: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            focus: Color::Cyan,
        }
    }
}

impl ColorTheme {
    /// Get the style for a header.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get the style for normal text.
    #[must_use]
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Get the style for muted text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get the style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Color of one sentiment class, matching the web palette.
    #[must_use]
    pub fn sentiment_color(&self, sentiment: Sentiment) -> Color {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    /// Border style for a panel, highlighted when it has focus.
    #[must_use]
    pub fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus)
        } else {
            Style::default().fg(self.muted)
        }
    }
}
