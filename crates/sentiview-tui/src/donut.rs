//! Class-probability donut chart drawn on a Braille canvas.

use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use sentiview_core::{Prediction, Sentiment};

use crate::styles::ColorTheme;

const INNER_RADIUS: f64 = 0.55;
const OUTER_RADIUS: f64 = 0.95;

/// One donut slice: class name, share of the ring, and its color.
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSegment {
    pub name: String,
    pub ratio: f64,
    pub color: Color,
}

/// Build one segment per class from the probability vector.
///
/// Names come from the served class map, falling back to the built-in
/// ordering when the map has not arrived yet. Ratios are normalized by the
/// probability sum so a slightly off-sum vector still fills the ring.
#[must_use]
pub fn segments(probs: &[f64], classes: &BTreeMap<u32, String>) -> Vec<DonutSegment> {
    let theme = ColorTheme::default();
    let sum: f64 = probs.iter().filter(|p| p.is_finite()).sum();

    probs
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let index = u32::try_from(i).unwrap_or(u32::MAX);
            let name = classes.get(&index).cloned().unwrap_or_else(|| {
                match i {
                    0 => "positive".to_string(),
                    1 => "neutral".to_string(),
                    2 => "negative".to_string(),
                    _ => format!("class {i}"),
                }
            });
            let color = Sentiment::from_class_name(&name)
                .map_or(Color::Blue, |s| theme.sentiment_color(s));
            let ratio = if sum > 0.0 && p.is_finite() {
                (p / sum).clamp(0.0, 1.0)
            } else {
                0.0
            };
            DonutSegment { name, ratio, color }
        })
        .collect()
}

/// Cumulative (start, end) ring fractions for each segment.
#[must_use]
pub fn arc_bounds(segments: &[DonutSegment]) -> Vec<(f64, f64)> {
    let mut bounds = Vec::with_capacity(segments.len());
    let mut start = 0.0;
    for seg in segments {
        let end = start + seg.ratio;
        bounds.push((start, end));
        start = end;
    }
    bounds
}

/// Legend lines, one per class: a color swatch, the name, and the share.
#[must_use]
pub fn legend_lines(segments: &[DonutSegment]) -> Vec<Line<'static>> {
    segments
        .iter()
        .map(|seg| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(seg.color)),
                Span::raw(format!("{} {:.1}%", seg.name, seg.ratio * 100.0)),
            ])
        })
        .collect()
}

/// Render the classification donut plus its legend.
pub fn render_donut(
    frame: &mut Frame,
    area: Rect,
    prediction: Option<&Prediction>,
    classes: &BTreeMap<u32, String>,
) {
    let theme = ColorTheme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Classification ")
        .border_style(theme.panel_border_style(false));

    let Some(prediction) = prediction else {
        let placeholder = Paragraph::new("No classification yet.")
            .style(theme.muted_style())
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let segs = segments(&prediction.probs, classes);
    let bounds = arc_bounds(&segs);
    let label = prediction.label;
    let label_style = Style::default()
        .fg(theme.sentiment_color(label))
        .add_modifier(Modifier::BOLD);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    #[allow(clippy::cast_possible_truncation)]
    let legend_height = segs.len().min(4) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(legend_height)])
        .split(inner);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.6, 1.6])
        .y_bounds([-1.1, 1.1])
        .paint(|ctx| {
            for (seg, &(start, end)) in segs.iter().zip(&bounds) {
                draw_arc(ctx, start, end, seg.color);
            }
            ctx.print(0.0, 0.0, Line::styled(label.to_string(), label_style));
        });
    frame.render_widget(canvas, chunks[0]);

    let legend = Paragraph::new(legend_lines(&segs));
    frame.render_widget(legend, chunks[1]);
}

/// Fill one ring arc with radial lines, clockwise from 12 o'clock.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_arc(ctx: &mut ratatui::widgets::canvas::Context<'_>, start: f64, end: f64, color: Color) {
    let span = end - start;
    if span <= 0.0 {
        return;
    }
    // One radial line per degree of arc keeps the Braille ring solid.
    let steps = (span * 360.0).ceil().max(1.0) as usize;
    for k in 0..=steps {
        let frac = start + span * (k as f64 / steps as f64);
        let theta = FRAC_PI_2 - TAU * frac;
        let (sin, cos) = theta.sin_cos();
        ctx.draw(&CanvasLine {
            x1: INNER_RADIUS * cos,
            y1: INNER_RADIUS * sin,
            x2: OUTER_RADIUS * cos,
            y2: OUTER_RADIUS * sin,
            color,
        });
    }
}
