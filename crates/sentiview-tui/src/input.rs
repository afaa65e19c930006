//! Input bar: the text under edit plus a status or error line.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use sentiview_core::DemoState;

use crate::styles::ColorTheme;

/// Horizontal scroll needed to keep the cursor column visible.
#[must_use]
pub fn scroll_offset(cursor_cols: usize, inner_width: u16) -> u16 {
    let width = inner_width as usize;
    if width == 0 {
        return 0;
    }
    u16::try_from((cursor_cols + 1).saturating_sub(width)).unwrap_or(u16::MAX)
}

/// Render the input panel.
///
/// The second row shows the active error if any (prediction errors first,
/// then example/classes fetch errors), otherwise a progress note or a key
/// hint. The terminal cursor is placed at the edit position while the panel
/// has focus.
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    state: &DemoState,
    cursor_cols: usize,
    focused: bool,
    spinner: Option<char>,
) {
    let theme = ColorTheme::default();
    let title = match spinner {
        Some(c) => format!(" Input {c} "),
        None => " Input ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.panel_border_style(focused));

    let status_line = if let Some(error) = state
        .predictions
        .error
        .as_ref()
        .or(state.input.error.as_ref())
    {
        Line::styled(error.message.clone(), theme.error_style())
    } else if state.predictions.loading || state.input.loading {
        Line::styled("Classifying...", theme.muted_style())
    } else {
        Line::styled(
            "Enter to classify, Ctrl+E for an example",
            theme.muted_style(),
        )
    };

    let inner_width = area.width.saturating_sub(2);
    let scroll = scroll_offset(cursor_cols, inner_width);
    let text = vec![
        Line::styled(state.input.text.clone(), theme.text_style()),
        status_line,
    ];
    let paragraph = Paragraph::new(text).block(block).scroll((0, scroll));
    frame.render_widget(paragraph, area);

    if focused && area.width > 2 && area.height > 1 {
        #[allow(clippy::cast_possible_truncation)]
        let visible = cursor_cols.saturating_sub(scroll as usize) as u16;
        let x = (area.x + 1 + visible).min(area.x + area.width - 2);
        frame.set_cursor_position((x, area.y + 1));
    }
}
