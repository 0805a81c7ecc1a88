//! Public option types for the chart functions.

use crate::style::AxesStyle;
use crate::theme::Canvas;

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    /// No legend.
    Hidden,
    /// Vertical list to the right of the plot.
    Right,
    /// Centered band below the plot, items flowing into `ncol` columns.
    Bottom { ncol: usize },
}

/// Options for [`crate::viz::pie`].
#[derive(Debug, Clone, PartialEq)]
pub struct PieOptions {
    pub canvas: Canvas,
    pub title: Option<String>,
    /// Legend to the right of the pie.
    pub show_legend: bool,
    /// Slice names drawn next to each wedge.
    pub show_labels: bool,
    /// Add the raw value under the percentage.
    pub show_values: bool,
    /// Per-slice radial offset as a fraction of the radius.
    pub explode: Vec<f64>,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            title: None,
            show_legend: true,
            show_labels: true,
            show_values: false,
            explode: Vec::new(),
        }
    }
}

/// Options for [`crate::viz::bar`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarOptions {
    pub canvas: Canvas,
    pub title: Option<String>,
    pub show_legend: bool,
    pub rotate_x_labels: bool,
}

/// Options for [`crate::viz::stackbar`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackBarOptions {
    pub canvas: Canvas,
    pub title: Option<String>,
    /// Horizontal bars growing from the left axis.
    pub horizontal: bool,
}

/// Options for [`crate::viz::line`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineOptions {
    pub canvas: Canvas,
    pub title: Option<String>,
    /// Axes style for this chart; `None` keeps the theme's style.
    pub style: Option<AxesStyle>,
    pub rotate_x_labels: bool,
    /// Draw a marker at every data point.
    pub markers: bool,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            title: None,
            style: Some(AxesStyle::Shadow),
            rotate_x_labels: false,
            markers: false,
        }
    }
}

/// Options for [`crate::viz::stripplot`].
#[derive(Debug, Clone, PartialEq)]
pub struct StripOptions {
    pub canvas: Canvas,
    pub title: Option<String>,
    /// Horizontal spread of points within a category, as a fraction of the slot width.
    pub jitter: f64,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            title: None,
            jitter: 0.2,
        }
    }
}
