//! Attention heat-map: one colored cell per token.
//!
//! Cell backgrounds interpolate between the service palette's low and high
//! anchors in Oklab space, so mid-range weights stay perceptually even
//! instead of washing out the way a raw RGB lerp does. Disabled tokens render
//! without a background but stay selectable so they can be re-enabled.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use sentiview_core::Prediction;

use crate::styles::ColorTheme;

/// Low-weight anchor color (#f2e5f1).
const HEAT_LOW: (u8, u8, u8) = (0xf2, 0xe5, 0xf1);
/// High-weight anchor color (#ff6d77).
const HEAT_HIGH: (u8, u8, u8) = (0xff, 0x6d, 0x77);

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert an sRGB color to Oklab (L, a, b).
fn srgb_to_oklab(rgb: (u8, u8, u8)) -> (f64, f64, f64) {
    let r = srgb_to_linear(f64::from(rgb.0) / 255.0);
    let g = srgb_to_linear(f64::from(rgb.1) / 255.0);
    let b = srgb_to_linear(f64::from(rgb.2) / 255.0);

    let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
    let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
    let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

    (
        0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
        1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
        0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
    )
}

/// Convert an Oklab color back to sRGB with channel clamping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn oklab_to_srgb(lab: (f64, f64, f64)) -> (u8, u8, u8) {
    let (lightness, a, b) = lab;
    let l = (lightness + 0.396_337_777_4 * a + 0.215_803_757_3 * b).powi(3);
    let m = (lightness - 0.105_561_345_8 * a - 0.063_854_172_8 * b).powi(3);
    let s = (lightness - 0.089_484_177_5 * a - 1.291_485_548_0 * b).powi(3);

    let red = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
    let green = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
    let blue = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

    let channel = |c: f64| (linear_to_srgb(c).clamp(0.0, 1.0) * 255.0).round() as u8;
    (channel(red), channel(green), channel(blue))
}

/// Interpolated heat color for a normalized weight in [0, 1].
///
/// Non-finite input falls back to the low anchor.
#[must_use]
pub fn heat_rgb(t: f64) -> (u8, u8, u8) {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let low = srgb_to_oklab(HEAT_LOW);
    let high = srgb_to_oklab(HEAT_HIGH);
    oklab_to_srgb((
        low.0 + (high.0 - low.0) * t,
        low.1 + (high.1 - low.1) * t,
        low.2 + (high.2 - low.2) * t,
    ))
}

/// Background color for one token, scaled by the strongest weight on screen.
#[must_use]
pub fn heat_color(score: f64, max: f64) -> Color {
    let t = if max > 0.0 { score / max } else { 0.0 };
    let (r, g, b) = heat_rgb(t);
    Color::Rgb(r, g, b)
}

/// Lay the token cells out as wrapped lines of styled spans.
///
/// Each cell is the token padded with one space on either side; cells are
/// separated by a single space and wrapped to `width`. The selected cell is
/// reversed when the panel has focus, underlined otherwise.
#[must_use]
pub fn token_lines(
    prediction: &Prediction,
    selected: usize,
    focused: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let max = prediction
        .attention_weights
        .iter()
        .copied()
        .fold(0.0, f64::max);

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut line_width = 0usize;

    for (i, token) in prediction.tokens.iter().enumerate() {
        let enabled = prediction.enabled.get(i).copied().unwrap_or(false);
        let weight = prediction.attention_weights.get(i).copied().unwrap_or(0.0);

        let mut style = if enabled {
            Style::default()
                .fg(Color::Black)
                .bg(heat_color(weight, max))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if i == selected {
            style = style.add_modifier(if focused {
                Modifier::REVERSED
            } else {
                Modifier::UNDERLINED
            });
        }

        let cell = format!(" {token} ");
        let cell_width = cell.chars().count();
        if line_width > 0 && line_width + cell_width + 1 > width as usize {
            lines.push(Line::from(std::mem::take(&mut spans)));
            line_width = 0;
        }
        if line_width > 0 {
            spans.push(Span::raw(" "));
            line_width += 1;
        }
        spans.push(Span::styled(cell, style));
        line_width += cell_width;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Render the attention heat-map panel.
pub fn render_heatmap(
    frame: &mut Frame,
    area: Rect,
    prediction: Option<&Prediction>,
    selected: usize,
    focused: bool,
) {
    let theme = ColorTheme::default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Attention ")
        .border_style(theme.panel_border_style(focused));

    let Some(prediction) = prediction else {
        let placeholder = Paragraph::new("No prediction yet. Enter text and press Enter.")
            .style(theme.muted_style())
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let inner_width = area.width.saturating_sub(2);
    let lines = token_lines(prediction, selected, focused, inner_width);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
