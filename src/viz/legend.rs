//! Legend layout and drawing for external legend panels.
//!
//! `Bottom` flows items into a fixed number of equal-width columns centered
//! under the plot; `Right` stacks items vertically, vertically centered.

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, max_text_width_px, truncate_to_width};
use super::types::LegendMode;
use crate::palette::Rgb8;

/// How an entry's key is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendGlyph {
    /// Filled square (bars, wedges).
    Patch,
    /// Short stroke (lines).
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: Rgb8,
    pub glyph: LegendGlyph,
}

/// Pixel metrics derived from the legend font size; shared by the estimators
/// and the drawing code so they never disagree.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    font_px: u32,
    line_h: i32,
    pad: i32,
    key_w: i32,
    key_gap: i32,
    col_gap: i32,
}

impl Metrics {
    fn new(font_px: u32) -> Self {
        let f = font_px.max(1) as i32;
        Self {
            font_px: font_px.max(1),
            line_h: f + f / 2,
            pad: (f / 2).max(4),
            key_w: f,
            key_gap: (f / 2).max(3),
            col_gap: f,
        }
    }

    fn block_w(&self, text_px: i32) -> i32 {
        self.key_w + self.key_gap + text_px
    }
}

/// Height of the band needed below the plot for `n_items` in `ncol` columns.
pub fn bottom_band_height_px(n_items: usize, ncol: usize, font_px: u32) -> i32 {
    if n_items == 0 {
        return 0;
    }
    let m = Metrics::new(font_px);
    let rows = n_items.div_ceil(ncol.max(1)) as i32;
    2 * m.pad + rows * m.line_h
}

/// Width of the panel needed to the right of the plot, capped at `max_px`.
pub fn right_panel_width_px(items: &[LegendItem], font_px: u32, max_px: i32) -> i32 {
    if items.is_empty() {
        return 0;
    }
    let m = Metrics::new(font_px);
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    let text_w = max_text_width_px(&labels, m.font_px) as i32;
    (2 * m.pad + m.block_w(text_w)).min(max_px)
}

/// Draw the legend items into `area` (the area reserved by the caller).
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    mode: LegendMode,
    font_family: &str,
    font_px: u32,
    text_color: Rgb8,
) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    let m = Metrics::new(font_px);
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let text_style = (font_family, m.font_px as f64)
        .into_font()
        .color(&text_color.to_plotters())
        .pos(Pos::new(HPos::Left, VPos::Center));

    let cells: Vec<(i32, i32, i32)> = match mode {
        LegendMode::Hidden => return Ok(()),
        LegendMode::Right => {
            let total_h = items.len() as i32 * m.line_h;
            let y0 = ((h - total_h) / 2).max(m.pad);
            let text_cap = w - 2 * m.pad - m.block_w(0);
            (0..items.len() as i32)
                .map(|i| (m.pad, y0 + i * m.line_h + m.line_h / 2, text_cap))
                .collect()
        }
        LegendMode::Bottom { ncol } => {
            let ncol = ncol.clamp(1, items.len());
            let usable = w - 2 * m.pad;
            let widest = items
                .iter()
                .map(|i| estimate_text_width_px(&i.label, m.font_px) as i32)
                .max()
                .unwrap_or(0);
            let slot_w = (m.block_w(widest) + m.col_gap).min(usable / ncol as i32).max(1);
            let x0 = m.pad + (usable - slot_w * ncol as i32).max(0) / 2;
            let text_cap = slot_w - m.col_gap - m.block_w(0);
            items
                .iter()
                .enumerate()
                .map(|(idx, _)| {
                    let col = (idx % ncol) as i32;
                    let row = (idx / ncol) as i32;
                    (
                        x0 + col * slot_w,
                        m.pad + row * m.line_h + m.line_h / 2,
                        text_cap,
                    )
                })
                .collect()
        }
    };

    for (item, (x, cy, text_cap)) in items.iter().zip(cells) {
        draw_key(area, item, x, cy, &m)?;
        let label = truncate_to_width(&item.label, m.font_px, text_cap.max(0) as u32);
        if label.is_empty() {
            continue;
        }
        area.draw(&Text::new(label, (x + m.key_w + m.key_gap, cy), text_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_key<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    item: &LegendItem,
    x: i32,
    cy: i32,
    m: &Metrics,
) -> Result<()> {
    let color = item.color.to_plotters();
    let half = m.key_w / 2;
    match item.glyph {
        LegendGlyph::Patch => area.draw(&Rectangle::new(
            [(x, cy - half), (x + m.key_w, cy + half)],
            color.filled(),
        )),
        LegendGlyph::Line => area.draw(&PathElement::new(
            vec![(x, cy), (x + m.key_w, cy)],
            color.stroke_width((m.font_px / 6).max(1)),
        )),
    }
    .map_err(|e| anyhow!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str) -> LegendItem {
        LegendItem {
            label: label.to_string(),
            color: Rgb8::new(0, 0, 0),
            glyph: LegendGlyph::Patch,
        }
    }

    #[test]
    fn band_grows_by_rows() {
        let one_row = bottom_band_height_px(4, 4, 10);
        let two_rows = bottom_band_height_px(5, 4, 10);
        assert_eq!(two_rows - one_row, 15);
        assert_eq!(bottom_band_height_px(0, 4, 10), 0);
    }

    #[test]
    fn right_panel_is_capped() {
        let items = vec![item("short"), item("a considerably longer legend entry")];
        assert_eq!(right_panel_width_px(&items, 10, 120), 120);
        assert!(right_panel_width_px(&items[..1], 10, 500) < 120);
    }
}
