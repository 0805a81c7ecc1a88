//! The immutable theme value handed to every chart call.

use crate::palette::Palette;
use crate::style::{AxesStyle, StyleParams};
use crate::ticks::TickFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Sizes in points; widths in points as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotContext {
    pub font_size: f64,
    pub axes_label_size: f64,
    pub title_size: f64,
    pub tick_label_size: f64,
    pub legend_font_size: f64,
    pub axes_line_width: f64,
    pub grid_line_width: f64,
    pub line_width: f64,
    pub marker_size: f64,
    /// Outline width of bars and wedges; 0 draws them borderless.
    pub patch_line_width: f64,
}

impl Default for PlotContext {
    /// Notebook context with hairline grid and borderless patches.
    fn default() -> Self {
        Self {
            font_size: 12.0,
            axes_label_size: 12.0,
            title_size: 12.0,
            tick_label_size: 11.0,
            legend_font_size: 11.0,
            axes_line_width: 1.25,
            grid_line_width: 0.5,
            line_width: 1.5,
            marker_size: 6.0,
            patch_line_width: 0.0,
        }
    }
}

/// Common presentation layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureSize {
    /// 6 x 4 inches.
    #[default]
    Default,
    /// 8 x 4 inches (2:1).
    Wide,
}

impl FigureSize {
    pub fn inches(&self) -> (f64, f64) {
        match self {
            FigureSize::Default => (6.0, 4.0),
            FigureSize::Wide => (8.0, 4.0),
        }
    }

    pub fn pixels(&self, dpi: u32) -> (u32, u32) {
        let (w, h) = self.inches();
        (
            (w * dpi as f64).round() as u32,
            (h * dpi as f64).round() as u32,
        )
    }
}

impl FromStr for FigureSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(FigureSize::Default),
            "wide" | "2:1" => Ok(FigureSize::Wide),
            other => Err(format!("unknown figure size {other:?}, expected default or 2:1")),
        }
    }
}

/// Figure dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Where a chart is rendered and how large.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub size: FigureSize,
    pub dpi: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            size: FigureSize::Default,
            dpi: DEFAULT_DPI,
        }
    }
}

impl Canvas {
    pub fn new(size: FigureSize, dpi: u32) -> Self {
        Self { size, dpi: dpi.max(1) }
    }

    pub fn pixels(&self) -> (u32, u32) {
        self.size.pixels(self.dpi)
    }

    /// Points to pixels.
    pub fn px(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }

    /// Points to whole pixels, at least 1 for any positive size.
    pub fn px_u32(&self, pt: f64) -> u32 {
        if pt <= 0.0 {
            0
        } else {
            self.px(pt).round().max(1.0) as u32
        }
    }
}

/// Everything a chart needs to look on-brand.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub style: AxesStyle,
    pub params: StyleParams,
    pub palette: Palette,
    pub context: PlotContext,
    pub tick_format: TickFormat,
    /// Family name used for all text.
    pub font_family: String,
    /// Optional TrueType file registered under `font_family` before drawing.
    pub font_path: Option<PathBuf>,
}

impl Theme {
    pub fn new(style: AxesStyle) -> Self {
        Self {
            style,
            params: style.params(),
            palette: Palette::default(),
            context: PlotContext::default(),
            tick_format: TickFormat::default(),
            font_family: "sans-serif".to_string(),
            font_path: None,
        }
    }

    /// Same theme with a different axes style; other settings are kept.
    pub fn with_style(&self, style: AxesStyle) -> Self {
        Self {
            style,
            params: style.params(),
            ..self.clone()
        }
    }

    pub fn with_palette(&self, palette: Palette) -> Self {
        Self {
            palette,
            ..self.clone()
        }
    }

    pub fn with_tick_format(&self, tick_format: TickFormat) -> Self {
        Self {
            tick_format,
            ..self.clone()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(AxesStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_sizes_scale_with_dpi() {
        assert_eq!(FigureSize::Default.pixels(100), (600, 400));
        assert_eq!(FigureSize::Wide.pixels(300), (2400, 1200));
        assert_eq!("2:1".parse::<FigureSize>().unwrap(), FigureSize::Wide);
    }

    #[test]
    fn points_to_pixels() {
        let c = Canvas::new(FigureSize::Default, 144);
        assert_eq!(c.px(12.0), 24.0);
        assert_eq!(c.px_u32(0.5), 1);
        assert_eq!(c.px_u32(0.0), 0);
    }

    #[test]
    fn with_style_keeps_palette() {
        let t = Theme::default().with_palette(Palette::from_hex(&["#000000"]).unwrap());
        let grid = t.with_style(AxesStyle::WhiteGrid);
        assert!(grid.params.grid);
        assert_eq!(grid.palette.len(), 1);
    }
}
