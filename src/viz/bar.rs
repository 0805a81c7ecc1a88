//! Bar and stacked bar charts.

use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use super::frame::{AxesLook, draw_spines, patch_fill};
use super::legend::{LegendGlyph, LegendItem};
use super::types::{BarOptions, LegendMode, StackBarOptions};
use super::{
    MeshSpec, category_label, category_range, draw_mesh, finish_legend, prepare_root,
    render_to_file, split_for_legend, value_range,
};
use crate::palette::Rgb8;
use crate::stack::{StackedSeries, stack_bounds};
use crate::style::{AxesTrim, Side, ThinSpine};
use crate::table::{Selection, Table};
use crate::theme::Theme;

/// Half the bar thickness, in category slots.
const HALF_BAR: f64 = 0.4;

struct BarLayer {
    name: String,
    color: Rgb8,
    bottom: Vec<f64>,
    top: Vec<f64>,
}

struct BarChart<'a> {
    categories: Vec<String>,
    layers: Vec<BarLayer>,
    horizontal: bool,
    title: Option<&'a str>,
    category_desc: Option<String>,
    value_desc: Option<String>,
    legend: LegendMode,
}

/// Simple bar chart: one bar per row of `x`, height from `y`, in the first palette color.
pub fn bar<P: AsRef<Path>>(
    out_path: P,
    theme: &Theme,
    table: &Table,
    x: &Selection,
    y: &Selection,
    opts: &BarOptions,
) -> Result<()> {
    let categories = table.labels(x.column())?;
    let values = table.numeric(y.column())?.to_vec();
    if categories.is_empty() {
        bail!("no data to plot");
    }
    let spec = BarChart {
        layers: vec![BarLayer {
            name: y.label().to_string(),
            color: theme.palette.color(0),
            bottom: vec![0.0; values.len()],
            top: values,
        }],
        categories,
        horizontal: false,
        title: opts.title.as_deref(),
        category_desc: Some(x.label().to_string()),
        value_desc: Some(y.label().to_string()),
        legend: if opts.show_legend {
            LegendMode::Bottom { ncol: 1 }
        } else {
            LegendMode::Hidden
        },
    };
    let trim = AxesTrim {
        rotate_x_labels: opts.rotate_x_labels,
        ..AxesTrim::default()
    };
    let look = AxesLook::new(theme, opts.canvas, &trim);
    log::debug!(
        "bar chart: {} categories -> {}",
        spec.categories.len(),
        out_path.as_ref().display()
    );
    render_to_file!(out_path.as_ref(), opts.canvas.pixels(), |root| {
        draw_bars(&root, theme, &look, &spec)
    })
}

/// Stacked bar chart: each series drawn on top of the sum of the previous ones,
/// legend below in one row, minimal frame.
pub fn stackbar<P: AsRef<Path>>(
    out_path: P,
    theme: &Theme,
    stack: &StackedSeries,
    opts: &StackBarOptions,
) -> Result<()> {
    if stack.base.is_empty() {
        bail!("no data to plot");
    }
    let bounds = stack_bounds(&stack.series)?;
    let layers = stack
        .series
        .iter()
        .zip(bounds)
        .enumerate()
        .map(|(i, (s, (bottom, top)))| BarLayer {
            name: s.name.clone(),
            color: theme.palette.color(i),
            bottom,
            top,
        })
        .collect();
    let spec = BarChart {
        categories: stack.base.clone(),
        layers,
        horizontal: opts.horizontal,
        title: opts.title.as_deref(),
        category_desc: None,
        value_desc: None,
        legend: LegendMode::Bottom {
            ncol: stack.series.len(),
        },
    };
    let base_side = if opts.horizontal { Side::Left } else { Side::Bottom };
    let trim = AxesTrim {
        despine: vec![Side::Left, Side::Right, Side::Bottom, Side::Top],
        thin_spine: Some(ThinSpine::on(base_side)),
        tight_ticks: true,
        rotate_x_labels: !opts.horizontal,
    };
    let look = AxesLook::new(theme, opts.canvas, &trim);
    log::debug!(
        "stacked bar chart: {} series x {} categories -> {}",
        stack.series.len(),
        stack.base.len(),
        out_path.as_ref().display()
    );
    render_to_file!(out_path.as_ref(), opts.canvas.pixels(), |root| {
        draw_bars(&root, theme, &look, &spec)
    })
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &Theme,
    look: &AxesLook<'_>,
    spec: &BarChart<'_>,
) -> Result<()> {
    prepare_root(root, theme, look)?;

    let items: Vec<LegendItem> = spec
        .layers
        .iter()
        .map(|l| LegendItem {
            label: l.name.clone(),
            color: l.color,
            glyph: LegendGlyph::Patch,
        })
        .collect();
    let (plot_area, legend_area) = split_for_legend(root, spec.legend, &items, look.legend_px);

    let n = spec.categories.len();
    let cat_range = category_range(n);
    let val_range = value_range(
        spec.layers
            .iter()
            .flat_map(|l| l.bottom.iter().chain(l.top.iter()).copied()),
    );

    let value_fmt = |v: &f64| theme.tick_format.format(*v);
    let samples: Vec<String> = [val_range.start, val_range.end, (val_range.start + val_range.end) / 2.0]
        .iter()
        .map(&value_fmt)
        .collect();
    let cat_area = look.category_label_area_px(&spec.categories, spec.category_desc.is_some());
    let val_area = look.value_label_area_px(&samples, spec.value_desc.is_some());

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(look.margin_px());
    if let Some(title) = spec.title {
        builder.caption(title, look.title_font());
    }

    if spec.horizontal {
        // first category at the top
        let cat_fmt = |v: &f64| {
            let flipped = (n as f64 - 1.0) - *v;
            category_label(&spec.categories, flipped)
        };
        let mut chart = builder
            .x_label_area_size(val_area)
            .y_label_area_size(cat_area)
            .build_cartesian_2d(val_range, cat_range)
            .map_err(|e| anyhow!("{:?}", e))?;
        draw_mesh(
            &mut chart,
            look,
            MeshSpec {
                x_labels: 8,
                y_labels: n + 1,
                x_fmt: &value_fmt,
                y_fmt: &cat_fmt,
                x_desc: spec.value_desc.clone(),
                y_desc: spec.category_desc.clone(),
                grid_x: true,
                grid_y: false,
            },
        )?;
        for layer in &spec.layers {
            let style = patch_fill(layer.color);
            let rect = |(i, b, t): (usize, f64, f64)| {
                let c = (n - 1 - i) as f64;
                [(b, c - HALF_BAR), (t, c + HALF_BAR)]
            };
            chart
                .draw_series(bar_spans(layer).map(|s| Rectangle::new(rect(s), style)))
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(edge) = look.patch_edge {
                chart
                    .draw_series(bar_spans(layer).map(|s| Rectangle::new(rect(s), edge)))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        draw_spines(root, look, chart.plotting_area().get_pixel_range())?;
    } else {
        let cat_fmt = |v: &f64| category_label(&spec.categories, *v);
        let mut chart = builder
            .x_label_area_size(cat_area)
            .y_label_area_size(val_area)
            .build_cartesian_2d(cat_range, val_range)
            .map_err(|e| anyhow!("{:?}", e))?;
        draw_mesh(
            &mut chart,
            look,
            MeshSpec {
                x_labels: n + 1,
                y_labels: 8,
                x_fmt: &cat_fmt,
                y_fmt: &value_fmt,
                x_desc: spec.category_desc.clone(),
                y_desc: spec.value_desc.clone(),
                grid_x: false,
                grid_y: true,
            },
        )?;
        for layer in &spec.layers {
            let style = patch_fill(layer.color);
            let rect = |(i, b, t): (usize, f64, f64)| {
                let c = i as f64;
                [(c - HALF_BAR, b), (c + HALF_BAR, t)]
            };
            chart
                .draw_series(bar_spans(layer).map(|s| Rectangle::new(rect(s), style)))
                .map_err(|e| anyhow!("{:?}", e))?;
            if let Some(edge) = look.patch_edge {
                chart
                    .draw_series(bar_spans(layer).map(|s| Rectangle::new(rect(s), edge)))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }
        draw_spines(root, look, chart.plotting_area().get_pixel_range())?;
    }

    finish_legend(legend_area.as_ref(), &items, spec.legend, look, theme)
}

/// (category index, bottom, top) for every drawable bar of a layer.
fn bar_spans(layer: &BarLayer) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
    layer
        .bottom
        .iter()
        .zip(&layer.top)
        .enumerate()
        .filter(|(_, (b, t))| b.is_finite() && t.is_finite() && b != t)
        .map(|(i, (b, t))| (i, *b, *t))
}
