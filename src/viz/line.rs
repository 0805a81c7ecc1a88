//! Multi-series line chart.

use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

use super::frame::{AxesLook, draw_spines};
use super::legend::{LegendGlyph, LegendItem};
use super::types::{LegendMode, LineOptions};
use super::{
    MeshSpec, category_label, category_range, draw_mesh, finish_legend, prepare_root,
    render_to_file, split_for_legend,
};
use crate::style::{AxesTrim, Side, ThinSpine};
use crate::table::{ColumnData, Selection, Table};
use crate::theme::Theme;
use crate::ticks::TickFormat;

const LEGEND: LegendMode = LegendMode::Bottom { ncol: 4 };

enum XAxis {
    Numeric,
    Categories(Vec<String>),
}

struct LineSpec<'a> {
    x_axis: XAxis,
    x_range: Range<f64>,
    y_range: Range<f64>,
    series: Vec<(String, Vec<(f64, f64)>)>,
    title: Option<&'a str>,
    markers: bool,
}

/// Line chart of one or more `ys` columns against `x`.
///
/// A numeric `x` is used as-is (rows sorted by x); a text `x` becomes evenly
/// spaced categories in row order.
pub fn line<P: AsRef<Path>>(
    out_path: P,
    theme: &Theme,
    table: &Table,
    x: &Selection,
    ys: &[Selection],
    opts: &LineOptions,
) -> Result<()> {
    if ys.is_empty() || table.n_rows() == 0 {
        bail!("no data to plot");
    }
    let restyled;
    let theme = match opts.style {
        Some(style) if style != theme.style => {
            restyled = theme.with_style(style);
            &restyled
        }
        _ => theme,
    };

    let (x_axis, xs): (XAxis, Vec<f64>) = match &table.column(x.column())?.data {
        ColumnData::Numeric(v) => (XAxis::Numeric, v.clone()),
        ColumnData::Text(labels) => (
            XAxis::Categories(labels.clone()),
            (0..labels.len()).map(|i| i as f64).collect(),
        ),
    };

    let mut series = Vec::with_capacity(ys.len());
    for y in ys {
        let mut pts: Vec<(f64, f64)> = xs
            .iter()
            .zip(table.numeric(y.column())?)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| (*a, *b))
            .collect();
        pts.sort_by(|a, b| a.0.total_cmp(&b.0));
        series.push((y.label().to_string(), pts));
    }

    let x_range = match &x_axis {
        XAxis::Numeric => data_range(xs.iter().copied(), 0.0)
            .ok_or_else(|| anyhow!("no numeric x values to plot"))?,
        XAxis::Categories(labels) => category_range(labels.len()),
    };
    let y_range = data_range(series.iter().flat_map(|(_, p)| p.iter().map(|(_, y)| *y)), 0.05)
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;

    let spec = LineSpec {
        x_axis,
        x_range,
        y_range,
        series,
        title: opts.title.as_deref(),
        markers: opts.markers,
    };
    let trim = AxesTrim {
        despine: vec![Side::Left, Side::Top, Side::Right],
        thin_spine: Some(ThinSpine::on(Side::Bottom)),
        tight_ticks: true,
        rotate_x_labels: opts.rotate_x_labels,
    };
    let look = AxesLook::new(theme, opts.canvas, &trim);
    log::debug!(
        "line chart: {} series -> {}",
        spec.series.len(),
        out_path.as_ref().display()
    );
    render_to_file!(out_path.as_ref(), opts.canvas.pixels(), |root| {
        draw_lines(&root, theme, &look, &spec)
    })
}

/// Finite min..max, padded by `pad` of the span; a flat range is widened by 1.
fn data_range(values: impl Iterator<Item = f64>, pad: f64) -> Option<Range<f64>> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if (hi - lo).abs() < f64::EPSILON {
        return Some((lo - 1.0)..(hi + 1.0));
    }
    let p = (hi - lo) * pad;
    Some((lo - p)..(hi + p))
}

fn draw_lines<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &Theme,
    look: &AxesLook<'_>,
    spec: &LineSpec<'_>,
) -> Result<()> {
    prepare_root(root, theme, look)?;

    let items: Vec<LegendItem> = spec
        .series
        .iter()
        .enumerate()
        .map(|(i, (name, _))| LegendItem {
            label: name.clone(),
            color: theme.palette.color(i),
            glyph: LegendGlyph::Line,
        })
        .collect();
    let (plot_area, legend_area) = split_for_legend(root, LEGEND, &items, look.legend_px);

    let y_fmt = |v: &f64| theme.tick_format.format(*v);
    let x_fmt = |v: &f64| match &spec.x_axis {
        XAxis::Numeric => TickFormat::Plain.format(*v),
        XAxis::Categories(labels) => category_label(labels, *v),
    };
    let x_labels = match &spec.x_axis {
        XAxis::Numeric => 8,
        XAxis::Categories(labels) => labels.len() + 1,
    };
    let x_samples: Vec<String> = match &spec.x_axis {
        XAxis::Numeric => vec![x_fmt(&spec.x_range.start), x_fmt(&spec.x_range.end)],
        XAxis::Categories(labels) => labels.clone(),
    };
    let y_samples: Vec<String> = [spec.y_range.start, spec.y_range.end]
        .iter()
        .map(&y_fmt)
        .collect();

    let mut builder = ChartBuilder::on(&plot_area);
    builder
        .margin(look.margin_px())
        .x_label_area_size(look.category_label_area_px(&x_samples, false))
        .y_label_area_size(look.value_label_area_px(&y_samples, false));
    if let Some(title) = spec.title {
        builder.caption(title, look.title_font());
    }
    let mut chart = builder
        .build_cartesian_2d(spec.x_range.clone(), spec.y_range.clone())
        .map_err(|e| anyhow!("{:?}", e))?;

    draw_mesh(
        &mut chart,
        look,
        MeshSpec {
            x_labels,
            y_labels: 6,
            x_fmt: &x_fmt,
            y_fmt: &y_fmt,
            x_desc: None,
            y_desc: None,
            grid_x: false,
            grid_y: true,
        },
    )?;

    let stroke = look.canvas.px_u32(theme.context.line_width);
    let radius = (look.canvas.px(theme.context.marker_size) / 2.0).round().max(1.0) as i32;
    for (i, (_, pts)) in spec.series.iter().enumerate() {
        let color = theme.palette.color(i).to_plotters();
        chart
            .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(stroke)))
            .map_err(|e| anyhow!("{:?}", e))?;
        if spec.markers {
            chart
                .draw_series(pts.iter().map(|p| Circle::new(*p, radius, color.filled())))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }
    draw_spines(root, look, chart.plotting_area().get_pixel_range())?;

    finish_legend(legend_area.as_ref(), &items, LEGEND, look, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_range_pads_and_widens() {
        assert_eq!(data_range([1.0, 3.0].into_iter(), 0.0), Some(1.0..3.0));
        assert_eq!(data_range([2.0, 2.0].into_iter(), 0.05), Some(1.0..3.0));
        assert_eq!(data_range([f64::NAN].into_iter(), 0.0), None);
        let r = data_range([0.0, 10.0].into_iter(), 0.1).unwrap();
        assert_eq!((r.start, r.end), (-1.0, 11.0));
    }
}
