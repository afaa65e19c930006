//! Footer panel with keyboard shortcuts for the focused panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::keymap::Focus;
use crate::styles::ColorTheme;

fn hint_spans(focus: Focus, theme: &ColorTheme) -> Vec<Span<'static>> {
    let key = |k: &'static str| Span::styled(k, theme.header_style().fg(theme.warning));
    let sep = |s: &'static str| Span::raw(s);

    match focus {
        Focus::Input => vec![
            key("Enter"),
            sep(": classify | "),
            key("Ctrl+E"),
            sep(": example | "),
            key("Tab"),
            sep(": focus | "),
            key("Esc"),
            sep(": quit"),
        ],
        Focus::Tokens => vec![
            key("←/→"),
            sep(": select token | "),
            key("Space"),
            sep(": toggle | "),
            key("Tab"),
            sep(": focus | "),
            key("q"),
            sep(": quit"),
        ],
        Focus::Tiles => vec![
            key("←/→"),
            sep(": pane | "),
            key("↑/↓"),
            sep(": scroll log | "),
            key("r"),
            sep(": refresh | "),
            key("q"),
            sep(": quit"),
        ],
    }
}

/// Render the footer panel.
pub fn render_footer(frame: &mut Frame, area: Rect, focus: Focus) {
    let theme = ColorTheme::default();
    let text = vec![Line::from(hint_spans(focus, &theme))];
    let block = Block::default().borders(Borders::TOP);
    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
