//! Brand-styled charts rendered to **SVG** or **PNG** with plotters.
//!
//! - Output format follows the file extension: `.svg` is SVG, anything else PNG
//! - Every chart takes an explicit [`Theme`]; nothing is configured globally
//!   apart from font registration for the `ab_glyph` text path
//! - Value axes are labelled with the theme's [`TickFormat`](crate::ticks::TickFormat)
//!   (abbreviated `4.5k` / `4M` by default)
//! - Chart kinds: pie, bar, stacked bar, line, strip

pub mod bar;
pub mod frame;
pub mod legend;
pub mod line;
pub mod pie;
pub mod strip;
pub mod text;
pub mod types;

pub use bar::{bar, stackbar};
pub use line::line;
pub use pie::pie;
pub use strip::stripplot;
pub use types::{BarOptions, LegendMode, LineOptions, PieOptions, StackBarOptions, StripOptions};

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

use crate::theme::Theme;
use frame::{AxesLook, ensure_fonts_registered};
use legend::{LegendItem, bottom_band_height_px, draw_legend, right_panel_width_px};

pub(crate) fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Open an SVG or bitmap backend for `$path`, bind its root area to `$root`,
/// evaluate `$body` (a `Result`), then present.
macro_rules! render_to_file {
    ($path:expr, $dims:expr, |$root:ident| $body:expr) => {{
        let path: &::std::path::Path = $path;
        let path_string = path.to_string_lossy().into_owned();
        if $crate::viz::is_svg(path) {
            let $root = ::plotters_svg::SVGBackend::new(path_string.as_str(), $dims)
                .into_drawing_area();
            $body?;
            $root.present().map_err(|e| ::anyhow::anyhow!("{:?}", e))?;
        } else {
            let $root = ::plotters_bitmap::BitMapBackend::new(path_string.as_str(), $dims)
                .into_drawing_area();
            $body?;
            $root.present().map_err(|e| ::anyhow::anyhow!("{:?}", e))?;
        }
        ::anyhow::Ok(())
    }};
}
pub(crate) use render_to_file;

/// Prepare the root area: register fonts, paint the figure background.
pub(crate) fn prepare_root<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    theme: &Theme,
    look: &AxesLook<'_>,
) -> Result<()> {
    ensure_fonts_registered(theme);
    root.fill(&look.figure_face).map_err(|e| anyhow!("{:?}", e))
}

/// Split off the legend panel; returns (plot area, legend area).
pub(crate) fn split_for_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    mode: LegendMode,
    items: &[LegendItem],
    font_px: u32,
) -> (DrawingArea<DB, Shift>, Option<DrawingArea<DB, Shift>>) {
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    if items.is_empty() {
        return (root.clone(), None);
    }
    match mode {
        LegendMode::Hidden => (root.clone(), None),
        LegendMode::Bottom { ncol } => {
            let band = bottom_band_height_px(items.len(), ncol, font_px).min(h / 2);
            let (plot, legend) = root.split_vertically((h - band).max(40));
            (plot, Some(legend))
        }
        LegendMode::Right => {
            let panel = right_panel_width_px(items, font_px, w * 2 / 5);
            let (plot, legend) = root.split_horizontally((w - panel).max(40));
            (plot, Some(legend))
        }
    }
}

pub(crate) fn finish_legend<DB: DrawingBackend>(
    legend_area: Option<&DrawingArea<DB, Shift>>,
    items: &[LegendItem],
    mode: LegendMode,
    look: &AxesLook<'_>,
    theme: &Theme,
) -> Result<()> {
    match legend_area {
        Some(area) => draw_legend(
            area,
            items,
            mode,
            look.family,
            look.legend_px,
            theme.params.text_color,
        ),
        None => Ok(()),
    }
}

/// Axis labelling for one chart.
pub(crate) struct MeshSpec<'f, XT, YT> {
    pub x_labels: usize,
    pub y_labels: usize,
    pub x_fmt: &'f dyn Fn(&XT) -> String,
    pub y_fmt: &'f dyn Fn(&YT) -> String,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
    /// Vertical grid lines (along x key points).
    pub grid_x: bool,
    /// Horizontal grid lines (along y key points).
    pub grid_y: bool,
}

/// Fill the axes background and draw labels, grid, and axis lines per the look.
pub(crate) fn draw_mesh<DB, X, Y, XT, YT>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    look: &AxesLook<'_>,
    spec: MeshSpec<'_, XT, YT>,
) -> Result<()>
where
    DB: DrawingBackend,
    X: Ranged<ValueType = XT> + ValueFormatter<XT>,
    Y: Ranged<ValueType = YT> + ValueFormatter<YT>,
{
    chart
        .plotting_area()
        .fill(&look.axes_face)
        .map_err(|e| anyhow!("{:?}", e))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(spec.x_labels)
        .y_labels(spec.y_labels)
        .x_label_formatter(spec.x_fmt)
        .y_label_formatter(spec.y_fmt)
        .x_label_style(look.x_tick_font())
        .y_label_style(look.tick_font())
        .axis_desc_style(look.axis_desc_font())
        .axis_style(look.axis_style())
        .set_tick_mark_size(LabelAreaPosition::Bottom, look.tick_mark_px)
        .set_tick_mark_size(LabelAreaPosition::Left, look.tick_mark_px)
        .max_light_lines(0);
    if let Some(d) = spec.x_desc {
        mesh.x_desc(d);
    }
    if let Some(d) = spec.y_desc {
        mesh.y_desc(d);
    }
    match look.grid {
        Some(grid) => {
            mesh.bold_line_style(grid);
            if !spec.grid_x {
                mesh.disable_x_mesh();
            }
            if !spec.grid_y {
                mesh.disable_y_mesh();
            }
        }
        None => {
            mesh.disable_mesh();
        }
    }
    if look.axis_lines.is_none() {
        mesh.disable_x_axis().disable_y_axis();
    }
    mesh.draw().map_err(|e| anyhow!("{:?}", e))
}

/// Padded value-axis range that always includes zero.
pub(crate) fn value_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (mut lo, mut hi) = (0.0f64, 0.0f64);
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return lo..(lo + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    let lo = if lo < 0.0 { lo - pad } else { lo };
    let hi = if hi > 0.0 { hi + pad } else { hi };
    lo..hi
}

/// Category axis spanning `n` slots centered on 0..n-1.
pub(crate) fn category_range(n: usize) -> Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

/// Label for a category-axis key point; non-integral positions stay blank.
pub(crate) fn category_label(labels: &[String], v: f64) -> String {
    let i = v.round();
    if (v - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}
