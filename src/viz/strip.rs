//! Strip plot: numeric values scattered over categories.

use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use super::frame::{AxesLook, draw_spines};
use super::types::StripOptions;
use super::{
    MeshSpec, category_label, category_range, draw_mesh, prepare_root, render_to_file,
    value_range,
};
use crate::palette::Rgb8;
use crate::style::AxesTrim;
use crate::table::{Selection, Table};
use crate::theme::Theme;

struct StripSpec<'a> {
    categories: Vec<String>,
    /// (x position, y value, color) per point.
    points: Vec<(f64, f64, Rgb8)>,
    title: Option<&'a str>,
    x_desc: String,
    y_desc: String,
}

/// Categories in first-appearance order and the slot index of every row.
fn category_slots(labels: &[String]) -> (Vec<String>, Vec<usize>) {
    let mut categories: Vec<String> = Vec::new();
    let slots = labels
        .iter()
        .map(|l| match categories.iter().position(|c| c == l) {
            Some(i) => i,
            None => {
                categories.push(l.clone());
                categories.len() - 1
            }
        })
        .collect();
    (categories, slots)
}

fn stable_hash64<T: Hash>(t: T) -> u64 {
    let mut hasher = DefaultHasher::new();
    t.hash(&mut hasher);
    hasher.finish()
}

/// Offset in `[-width/2, width/2]` derived from the row, so reruns look the same.
fn jitter_offset(row: usize, width: f64) -> f64 {
    let unit = (stable_hash64(row) % 10_000) as f64 / 9_999.0;
    (unit - 0.5) * width
}

/// Usable jitter span in category units; non-finite requests disable jitter.
fn jitter_width(requested: f64) -> f64 {
    if requested.is_finite() {
        requested.clamp(0.0, 0.9)
    } else {
        0.0
    }
}

/// Strip plot of `y` grouped by the categories of `x`, one palette color per category.
pub fn stripplot<P: AsRef<Path>>(
    out_path: P,
    theme: &Theme,
    table: &Table,
    x: &Selection,
    y: &Selection,
    opts: &StripOptions,
) -> Result<()> {
    let labels = table.labels(x.column())?;
    let values = table.numeric(y.column())?;
    let (categories, slots) = category_slots(&labels);
    let width = jitter_width(opts.jitter);
    let points: Vec<(f64, f64, Rgb8)> = slots
        .iter()
        .zip(values)
        .enumerate()
        .filter(|(_, (_, v))| v.is_finite())
        .map(|(row, (&slot, &v))| {
            (
                slot as f64 + jitter_offset(row, width),
                v,
                theme.palette.color(slot),
            )
        })
        .collect();
    if points.is_empty() {
        bail!("no data to plot");
    }

    let spec = StripSpec {
        categories,
        points,
        title: opts.title.as_deref(),
        x_desc: x.label().to_string(),
        y_desc: y.label().to_string(),
    };
    let look = AxesLook::new(theme, opts.canvas, &AxesTrim::default());
    log::debug!(
        "strip plot: {} points in {} categories -> {}",
        spec.points.len(),
        spec.categories.len(),
        out_path.as_ref().display()
    );
    render_to_file!(out_path.as_ref(), opts.canvas.pixels(), |root| {
        draw_strip(&root, theme, &look, &spec)
    })
}

fn draw_strip<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &Theme,
    look: &AxesLook<'_>,
    spec: &StripSpec<'_>,
) -> Result<()> {
    prepare_root(root, theme, look)?;

    let n = spec.categories.len();
    let y_range = value_range(spec.points.iter().map(|p| p.1));
    let y_fmt = |v: &f64| theme.tick_format.format(*v);
    let x_fmt = |v: &f64| category_label(&spec.categories, *v);
    let y_samples: Vec<String> = [y_range.start, y_range.end].iter().map(&y_fmt).collect();

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(look.margin_px())
        .x_label_area_size(look.category_label_area_px(&spec.categories, true))
        .y_label_area_size(look.value_label_area_px(&y_samples, true));
    if let Some(title) = spec.title {
        builder.caption(title, look.title_font());
    }
    let mut chart = builder
        .build_cartesian_2d(category_range(n), y_range)
        .map_err(|e| anyhow!("{:?}", e))?;

    draw_mesh(
        &mut chart,
        look,
        MeshSpec {
            x_labels: n + 1,
            y_labels: 8,
            x_fmt: &x_fmt,
            y_fmt: &y_fmt,
            x_desc: Some(spec.x_desc.clone()),
            y_desc: Some(spec.y_desc.clone()),
            grid_x: false,
            grid_y: true,
        },
    )?;

    let radius = (look.canvas.px(theme.context.marker_size) / 2.0).round().max(1.0) as i32;
    chart
        .draw_series(
            spec.points
                .iter()
                .map(|&(x, y, color)| Circle::new((x, y), radius, color.to_plotters().filled())),
        )
        .map_err(|e| anyhow!("{:?}", e))?;
    draw_spines(root, look, chart.plotting_area().get_pixel_range())
}
