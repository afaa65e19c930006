//! Catalog panes: datasets, models, and evaluation results.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use sentiview_core::CatalogState;

use crate::styles::ColorTheme;

/// Number of side-by-side catalog panes.
pub const PANE_COUNT: usize = 3;

/// Summary lines for the dataset pane.
#[must_use]
pub fn dataset_lines(catalog: &CatalogState) -> Vec<Line<'static>> {
    catalog
        .datasets
        .iter()
        .map(|d| {
            Line::raw(format!(
                "{}  {} rows  (+{} ~{} -{})",
                d.name, d.rows, d.positive, d.neutral, d.negative
            ))
        })
        .collect()
}

/// Summary lines for the model pane.
#[must_use]
pub fn model_lines(catalog: &CatalogState) -> Vec<Line<'static>> {
    catalog
        .models
        .iter()
        .map(|m| {
            Line::raw(format!(
                "{}  acc {:.1}%  ({}, {} epochs)",
                m.name,
                m.accuracy * 100.0,
                m.dataset,
                m.epochs
            ))
        })
        .collect()
}

/// Summary lines for the results pane.
#[must_use]
pub fn result_lines(catalog: &CatalogState) -> Vec<Line<'static>> {
    catalog
        .results
        .iter()
        .map(|r| {
            Line::raw(format!(
                "{}  F1 {:.2}  P {:.2}  R {:.2}",
                r.model, r.f1, r.precision, r.recall
            ))
        })
        .collect()
}

/// Render the three catalog panes side by side.
///
/// `selected` highlights one pane's border while the tiles have focus.
pub fn render_catalog(
    frame: &mut Frame,
    area: Rect,
    catalog: &CatalogState,
    selected: usize,
    focused: bool,
) {
    let theme = ColorTheme::default();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let panes = [
        (" Datasets ", dataset_lines(catalog)),
        (" Models ", model_lines(catalog)),
        (" Results ", result_lines(catalog)),
    ];

    for (i, ((title, lines), chunk)) in panes.into_iter().zip(chunks.iter()).enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.panel_border_style(focused && i == selected));
        let body = if lines.is_empty() {
            Paragraph::new("loading...").style(theme.muted_style())
        } else {
            Paragraph::new(lines)
        };
        frame.render_widget(body.block(block), *chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sentiview_core::{DatasetTile, ModelTile, ResultTile};

    fn sample_catalog() -> CatalogState {
        CatalogState {
            datasets: vec![DatasetTile {
                id: 1,
                name: "airline-tweets".into(),
                rows: 1200,
                positive: 520,
                neutral: 400,
                negative: 280,
            }],
            models: vec![ModelTile {
                id: 1,
                name: "lstm-attention".into(),
                dataset: "airline-tweets".into(),
                epochs: 12,
                accuracy: 0.842,
            }],
            results: vec![ResultTile {
                id: 1,
                model: "lstm-attention".into(),
                accuracy: 0.84,
                precision: 0.85,
                recall: 0.83,
                f1: 0.84,
            }],
        }
    }

    fn draw(catalog: &CatalogState) -> String {
        let backend = TestBackend::new(90, 7);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_catalog(frame, area, catalog, 0, true);
            })
            .unwrap();

        (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .map(|pos| buf.buffer[pos].symbol().to_string())
            .collect()
    }

    #[test]
    fn dataset_lines_summarize_counts() {
        let lines = dataset_lines(&sample_catalog());
        assert_eq!(lines.len(), 1);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("airline-tweets"));
        assert!(text.contains("1200 rows"));
        assert!(text.contains("+520"));
    }

    #[test]
    fn model_lines_show_accuracy() {
        let lines = model_lines(&sample_catalog());
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("acc 84.2%"));
        assert!(text.contains("12 epochs"));
    }

    #[test]
    fn result_lines_show_f1() {
        let lines = result_lines(&sample_catalog());
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("F1 0.84"));
    }

    #[test]
    fn render_catalog_shows_pane_titles() {
        let content = draw(&sample_catalog());
        assert!(content.contains("Datasets"));
        assert!(content.contains("Models"));
        assert!(content.contains("Results"));
    }

    #[test]
    fn render_catalog_empty_shows_loading() {
        let content = draw(&CatalogState::default());
        assert!(content.contains("loading..."));
    }

    #[test]
    fn render_catalog_small_area() {
        let backend = TestBackend::new(12, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_catalog(frame, area, &sample_catalog(), 2, false);
            })
            .unwrap();
    }
}
