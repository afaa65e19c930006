//! Dashboard header with the service status line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use sentiview_core::StatusState;

use crate::styles::ColorTheme;

/// Render the header panel.
pub fn render_header(frame: &mut Frame, area: Rect, status: &StatusState) {
    let theme = ColorTheme::default();

    let mut spans = vec![Span::styled("SentiView", theme.header_style())];
    if let Some(neural) = status.neural.as_ref() {
        spans.push(Span::raw(format!(
            " | {} on {} | load {:.0}% | {} MB",
            neural.model,
            neural.graphics_card,
            neural.load * 100.0,
            neural.memory_usage
        )));
    }
    spans.push(Span::raw(" | "));
    if status.online {
        spans.push(Span::styled("● online", Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled("● offline", Style::default().fg(Color::Red)));
    }

    let block = Block::default().borders(Borders::BOTTOM);
    let paragraph = Paragraph::new(vec![Line::from(spans)]).block(block);
    frame.render_widget(paragraph, area);
}
