//! Pie chart drawn directly in pixel space.

use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;
use std::path::Path;

use super::frame::{AxesLook, patch_fill};
use super::legend::{LegendGlyph, LegendItem};
use super::types::{LegendMode, PieOptions};
use super::{finish_legend, prepare_root, render_to_file, split_for_legend};
use crate::palette::WHITE;
use crate::style::AxesTrim;
use crate::theme::Theme;

/// Slice names sit just outside the rim.
const LABEL_RADIUS: f64 = 1.1;
/// Percentages sit inside the wedge.
const PCT_RADIUS: f64 = 0.6;
const LABEL_PT: f64 = 14.0;

#[derive(Debug, Clone, PartialEq)]
struct Wedge {
    start: f64,
    end: f64,
    fraction: f64,
    value: f64,
}

/// Angular extents for `values`, counterclockwise from 3 o'clock.
///
/// Values summing to more than 1 are normalized; a smaller sum leaves a gap.
fn wedges(values: &[f64]) -> Result<Vec<Wedge>> {
    if values.is_empty() {
        bail!("no data to plot");
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        bail!("pie values must be finite and non-negative, got {v}");
    }
    let sum: f64 = values.iter().sum();
    if sum <= 0.0 {
        bail!("pie values sum to zero");
    }
    let scale = if sum > 1.0 { sum } else { 1.0 };
    let mut angle = 0.0;
    Ok(values
        .iter()
        .map(|&value| {
            let fraction = value / scale;
            let start = angle;
            angle += fraction * TAU;
            Wedge {
                start,
                end: angle,
                fraction,
                value,
            }
        })
        .collect())
}

/// Percentage text as shown inside a wedge.
fn percent_label(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

fn polar(center: (f64, f64), r: f64, angle: f64) -> (i32, i32) {
    // pixel y grows downward
    (
        (center.0 + r * angle.cos()).round() as i32,
        (center.1 - r * angle.sin()).round() as i32,
    )
}

/// Pie of `percentages`, one slice per entry of `labels`, colored by palette order.
pub fn pie<P: AsRef<Path>>(
    out_path: P,
    theme: &Theme,
    percentages: &[f64],
    labels: &[String],
    opts: &PieOptions,
) -> Result<()> {
    if labels.len() != percentages.len() {
        bail!(
            "got {} labels for {} pie values",
            labels.len(),
            percentages.len()
        );
    }
    let wedges = wedges(percentages)?;
    let look = AxesLook::new(theme, opts.canvas, &AxesTrim::default());
    log::debug!(
        "pie chart: {} slices -> {}",
        wedges.len(),
        out_path.as_ref().display()
    );
    render_to_file!(out_path.as_ref(), opts.canvas.pixels(), |root| {
        draw_pie(&root, theme, &look, &wedges, labels, opts)
    })
}

fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &Theme,
    look: &AxesLook<'_>,
    wedges: &[Wedge],
    labels: &[String],
    opts: &PieOptions,
) -> Result<()> {
    prepare_root(root, theme, look)?;

    let items: Vec<LegendItem> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| LegendItem {
            label: l.clone(),
            color: theme.palette.color(i),
            glyph: LegendGlyph::Patch,
        })
        .collect();
    let mode = if opts.show_legend {
        LegendMode::Right
    } else {
        LegendMode::Hidden
    };
    let (plot_area, legend_area) = split_for_legend(root, mode, &items, look.legend_px);
    let plot_area = match &opts.title {
        Some(title) => plot_area
            .titled(title, look.title_font())
            .map_err(|e| anyhow!("{:?}", e))?,
        None => plot_area,
    };

    let (w, h) = plot_area.dim_in_pixel();
    let center = (w as f64 / 2.0, h as f64 / 2.0);
    let max_explode = opts.explode.iter().copied().fold(0.0f64, f64::max);
    let label_room = if opts.show_labels { LABEL_RADIUS } else { 1.0 };
    let r = (w.min(h) as f64 / 2.0) * 0.9 / (label_room + max_explode);

    let label_px = look.canvas.px(LABEL_PT);
    let pct_px = look.canvas.px(theme.context.font_size);
    let pct_style = (look.family, pct_px)
        .into_font()
        .color(&WHITE.to_plotters())
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (i, wedge) in wedges.iter().enumerate() {
        let mid = (wedge.start + wedge.end) / 2.0;
        let offset = opts.explode.get(i).copied().unwrap_or(0.0) * r;
        let c = (center.0 + offset * mid.cos(), center.1 - offset * mid.sin());

        let steps = ((wedge.end - wedge.start) / TAU * 180.0).ceil().max(2.0) as usize;
        let mut pts = Vec::with_capacity(steps + 2);
        pts.push((c.0.round() as i32, c.1.round() as i32));
        for s in 0..=steps {
            let a = wedge.start + (wedge.end - wedge.start) * s as f64 / steps as f64;
            pts.push(polar(c, r, a));
        }
        plot_area
            .draw(&Polygon::new(pts.clone(), patch_fill(theme.palette.color(i))))
            .map_err(|e| anyhow!("{:?}", e))?;
        if let Some(edge) = look.patch_edge {
            let mut outline = pts;
            outline.push(outline[0]);
            plot_area
                .draw(&PathElement::new(outline, edge))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        let pct = percent_label(wedge.fraction);
        let inner = polar(c, r * PCT_RADIUS, mid);
        if opts.show_values {
            let line = pct_px.round() as i32;
            plot_area
                .draw(&Text::new(pct, (inner.0, inner.1 - line / 2), pct_style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
            let value = theme.tick_format.format(wedge.value);
            plot_area
                .draw(&Text::new(value, (inner.0, inner.1 + line / 2), pct_style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
        } else {
            plot_area
                .draw(&Text::new(pct, inner, pct_style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        if opts.show_labels {
            let h_pos = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
            let style = (look.family, label_px)
                .into_font()
                .color(&look.text_color)
                .pos(Pos::new(h_pos, VPos::Center));
            plot_area
                .draw(&Text::new(
                    labels[i].clone(),
                    polar(c, r * LABEL_RADIUS, mid),
                    style,
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    finish_legend(legend_area.as_ref(), &items, mode, look, theme)
}
