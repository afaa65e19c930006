//! Scrollable activity log panel.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// Scroll state for the activity log.
#[derive(Debug, Clone)]
pub struct LogScrollState {
    /// First visible line index.
    pub offset: usize,
    /// Whether the view follows new entries.
    pub auto_scroll: bool,
}

impl LogScrollState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Handle a new log entry (follow the tail when enabled).
    pub fn on_new_message(&mut self, total: usize) {
        if self.auto_scroll {
            self.offset = total.saturating_sub(1);
        }
    }

    /// Scroll up by one line, detaching from the tail.
    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down by one line; reaching the bottom re-attaches.
    pub fn scroll_down(&mut self, total: usize) {
        self.offset = (self.offset + 1).min(total.saturating_sub(1));
        if self.offset >= total.saturating_sub(1) {
            self.auto_scroll = true;
        }
    }

    /// Page up.
    pub fn page_up(&mut self, page_size: usize) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(page_size);
    }

    /// Page down; reaching the bottom re-attaches.
    pub fn page_down(&mut self, page_size: usize, total: usize) {
        self.offset = (self.offset + page_size).min(total.saturating_sub(1));
        if self.offset >= total.saturating_sub(1) {
            self.auto_scroll = true;
        }
    }

    /// Jump to the first entry.
    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    /// Jump to the last entry and follow.
    pub fn end(&mut self, total: usize) {
        self.auto_scroll = true;
        self.offset = total.saturating_sub(1);
    }
}

impl Default for LogScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the activity log.
pub fn render_logs(frame: &mut Frame, area: Rect, logs: &[String], scroll: &LogScrollState) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let total = logs.len();
    // Keep a full window on screen even when following the tail.
    let start = scroll.offset.min(total.saturating_sub(visible_height));

    let items: Vec<ListItem> = logs
        .iter()
        .skip(start)
        .take(visible_height)
        .map(|log| {
            let style = if log.starts_with("[ERROR]") {
                Style::default().fg(Color::Red)
            } else if log.starts_with("[WARN]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::raw(log.as_str())).style(style)
        })
        .collect();

    let title = if total > visible_height {
        let pct = (scroll.offset * 100) / total.saturating_sub(1).max(1);
        format!(" Activity ({pct}%) ")
    } else {
        " Activity ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn scroll_state_initial() {
        let state = LogScrollState::new();
        assert_eq!(state.offset, 0);
        assert!(state.auto_scroll);
    }

    #[test]
    fn follows_new_messages() {
        let mut state = LogScrollState::new();
        state.on_new_message(10);
        assert_eq!(state.offset, 9);
    }

    #[test]
    fn detached_view_stays_put_on_new_messages() {
        let mut state = LogScrollState::new();
        state.offset = 3;
        state.auto_scroll = false;
        state.on_new_message(10);
        assert_eq!(state.offset, 3);
    }

    #[test]
    fn scroll_up_detaches() {
        let mut state = LogScrollState::new();
        state.offset = 5;
        state.scroll_up();
        assert_eq!(state.offset, 4);
        assert!(!state.auto_scroll);
    }

    #[test]
    fn scroll_up_at_zero() {
        let mut state = LogScrollState::new();
        state.scroll_up();
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn scroll_down_to_bottom_reattaches() {
        let mut state = LogScrollState::new();
        state.auto_scroll = false;
        state.offset = 8;
        state.scroll_down(10);
        assert_eq!(state.offset, 9);
        assert!(state.auto_scroll);
    }

    #[test]
    fn page_up_and_down() {
        let mut state = LogScrollState::new();
        state.offset = 15;
        state.page_up(10);
        assert_eq!(state.offset, 5);
        assert!(!state.auto_scroll);

        state.page_down(100, 20);
        assert_eq!(state.offset, 19);
        assert!(state.auto_scroll);
    }

    #[test]
    fn home_and_end() {
        let mut state = LogScrollState::new();
        state.offset = 50;
        state.home();
        assert_eq!(state.offset, 0);
        assert!(!state.auto_scroll);

        state.end(30);
        assert_eq!(state.offset, 29);
        assert!(state.auto_scroll);
    }

    #[test]
    fn render_logs_shows_entries() {
        let logs = vec!["fetched classes".to_string(), "[ERROR] boom".to_string()];
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_logs(frame, area, &logs, &LogScrollState::new());
            })
            .unwrap();

        let content: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|pos| buf.buffer[pos].symbol().to_string())
            .collect();
        assert!(content.contains("fetched classes"));
        assert!(content.contains("boom"));
    }

    #[test]
    fn tail_follow_shows_a_full_window() {
        let logs: Vec<String> = (0..10).map(|i| format!("log {i}")).collect();
        let mut scroll = LogScrollState::new();
        scroll.on_new_message(logs.len());

        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_logs(frame, area, &logs, &scroll);
            })
            .unwrap();

        let content: String = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|pos| buf.buffer[pos].symbol().to_string())
            .collect();
        // Four rows fit inside the borders: logs 6 through 9.
        assert!(content.contains("log 9"));
        assert!(content.contains("log 6"));
        assert!(!content.contains("log 5"));
    }

    #[test]
    fn render_logs_empty() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_logs(frame, area, &[], &LogScrollState::new());
            })
            .unwrap();
    }
}
