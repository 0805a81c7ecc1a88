//! preso
//!
//! Presentation-ready charts on top of plotters: a brand color palette,
//! named axes styles, compact tick labels, and chart helpers that apply all of
//! it. Pairs with the `preso` CLI.
//!
//! ### Features
//! - 18-color brand palette (`#00A0DF` Core Blue first), hex and `[0, 1]` forms
//! - Axes styles `white`, `dark`, `whitegrid`, `darkgrid`, `ticks`, `shadow`
//! - Abbreviated tick labels (`4.5k`, `4M`, `4.5B`)
//! - Stacked-series helpers (`sum_series`, `stacked_series`, pivoting long data)
//! - Pie, bar, stacked bar, line and strip charts to SVG or PNG
//! - Themes loadable from JSON
//!
//! ### Example
//! ```no_run
//! use preso::{Selection, Table, Theme, viz};
//!
//! let table = Table::from_csv_path("sales.csv")?;
//! let theme = Theme::default();
//! viz::bar(
//!     "sales.svg",
//!     &theme,
//!     &table,
//!     &Selection::from("region"),
//!     &Selection::renamed("revenue", "Revenue"),
//!     &viz::BarOptions::default(),
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod palette;
pub mod stack;
pub mod style;
pub mod table;
pub mod theme;
pub mod ticks;
pub mod viz;

pub use config::{ConfigError, ThemeConfig, load_theme};
pub use palette::{BRAND_PALETTE, Palette, Rgb8, brand_hex, rgb_scaled, scaled_palette};
pub use stack::{
    NamedSeries, SeriesSource, StackError, StackedSeries, stack_bounds, stacked_series,
    sum_series,
};
pub use style::{AxesStyle, AxesTrim, Side, StyleParams, UnknownStyle};
pub use table::{Column, ColumnData, Selection, Table, TableError};
pub use theme::{Canvas, DEFAULT_DPI, FigureSize, PlotContext, Theme};
pub use ticks::{TickFormat, abbreviate_tick_value};
