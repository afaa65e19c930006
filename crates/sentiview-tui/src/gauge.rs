//! Confidence gauge for the winning class probability.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Gauge};
use ratatui::Frame;

use sentiview_core::Prediction;

use crate::styles::ColorTheme;

/// Band label for a confidence value.
#[must_use]
pub fn confidence_band(confidence: f64) -> &'static str {
    if confidence < 0.33 {
        "Low"
    } else if confidence < 0.66 {
        "Medium"
    } else {
        "High"
    }
}

fn band_color(confidence: f64) -> Color {
    if confidence < 0.33 {
        Color::Red
    } else if confidence < 0.66 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Render the confidence gauge. Empty until a prediction exists.
pub fn render_confidence(frame: &mut Frame, area: Rect, prediction: Option<&Prediction>) {
    let theme = ColorTheme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confidence ")
        .border_style(theme.panel_border_style(false));

    let confidence = prediction.map_or(0.0, Prediction::confidence);
    let ratio = confidence.clamp(0.0, 1.0);
    let label = if prediction.is_some() {
        format!("{:.0}% {}", ratio * 100.0, confidence_band(ratio))
    } else {
        String::new()
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(band_color(ratio)))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sentiview_core::Sentiment;

    #[test]
    fn band_boundaries() {
        assert_eq!(confidence_band(0.0), "Low");
        assert_eq!(confidence_band(0.32), "Low");
        assert_eq!(confidence_band(0.33), "Medium");
        assert_eq!(confidence_band(0.65), "Medium");
        assert_eq!(confidence_band(0.66), "High");
        assert_eq!(confidence_band(1.0), "High");
    }

    #[test]
    fn band_colors_track_bands() {
        assert_eq!(band_color(0.1), Color::Red);
        assert_eq!(band_color(0.5), Color::Yellow);
        assert_eq!(band_color(0.9), Color::Green);
    }

    #[test]
    fn render_confidence_shows_percentage() {
        let pred = Prediction::from_wire(
            vec!["good".into(), "day".into()],
            vec![0.6, 0.4],
            Sentiment::Positive,
            vec![0.7, 0.2, 0.1],
        );
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_confidence(frame, area, Some(&pred));
            })
            .unwrap();

        let row1: String = (0..buf.area.width)
            .map(|x| buf.buffer[(x, 1)].symbol().to_string())
            .collect();
        assert!(row1.contains("70%"));
        assert!(row1.contains("High"));
    }

    #[test]
    fn render_confidence_empty_without_prediction() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_confidence(frame, area, None);
            })
            .unwrap();
    }
}
