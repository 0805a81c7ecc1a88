//! Turns a [`Theme`] plus per-chart [`AxesTrim`] into plotters styles, and
//! draws the parts plotters has no switch for (individual spines).

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontStyle, FontTransform, register_font};
use std::collections::HashSet;
use std::fs;
use std::ops::Range;
use std::path::PathBuf;
use std::sync::{Mutex, Once, OnceLock};

use super::text::max_text_width_px;
use crate::palette::Rgb8;
use crate::style::{AxesTrim, Side, TIGHT_TICK_LABEL_PT, TIGHT_TICK_PAD_PT};
use crate::theme::{Canvas, Theme};

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn registered() -> &'static Mutex<HashSet<(String, Option<PathBuf>)>> {
    static REGISTERED: OnceLock<Mutex<HashSet<(String, Option<PathBuf>)>>> = OnceLock::new();
    REGISTERED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Make the theme's font family resolvable by the text renderer.
pub(crate) fn ensure_fonts_registered(theme: &Theme) {
    INIT_FONTS.call_once(|| {
        let _ = register_font("sans-serif", FontStyle::Normal, BUNDLED_FONT);
    });

    let key = (theme.font_family.clone(), theme.font_path.clone());
    let mut seen = registered().lock().unwrap_or_else(|e| e.into_inner());
    if seen.contains(&key) {
        return;
    }

    let bytes: &'static [u8] = match &theme.font_path {
        Some(path) => match fs::read(path) {
            // registered fonts must live for the whole process
            Ok(b) => Box::leak(b.into_boxed_slice()),
            Err(e) => {
                log::warn!("cannot read font {}: {e}; using bundled font", path.display());
                BUNDLED_FONT
            }
        },
        None => BUNDLED_FONT,
    };
    if theme.font_path.is_some() || theme.font_family != "sans-serif" {
        if register_font(&theme.font_family, FontStyle::Normal, bytes).is_err() {
            log::warn!(
                "font for family {:?} is not a valid TrueType font; using bundled font",
                theme.font_family
            );
            let _ = register_font(&theme.font_family, FontStyle::Normal, BUNDLED_FONT);
        }
    }
    seen.insert(key);
}

/// Resolved pixel-level look of one chart's axes.
pub(crate) struct AxesLook<'t> {
    pub family: &'t str,
    pub canvas: Canvas,
    pub figure_face: RGBColor,
    pub axes_face: RGBColor,
    pub grid: Option<ShapeStyle>,
    pub text_color: RGBColor,
    pub label_color: RGBColor,
    pub tick_color: RGBColor,
    pub tick_label_px: f64,
    pub title_px: f64,
    pub axis_desc_px: f64,
    pub legend_px: u32,
    /// Tick mark length; 0 when tick marks are hidden.
    pub tick_mark_px: i32,
    pub label_offset_px: i32,
    pub rotate_x_labels: bool,
    /// When set, plotters draws the left/bottom axis lines (and tick marks) with this style.
    pub axis_lines: Option<ShapeStyle>,
    /// Spines drawn by hand, with their style.
    pub manual_spines: Vec<(Side, ShapeStyle)>,
    /// Outline of bars and wedges; `None` when patches are borderless.
    pub patch_edge: Option<ShapeStyle>,
}

impl<'t> AxesLook<'t> {
    pub fn new(theme: &'t Theme, canvas: Canvas, trim: &AxesTrim) -> Self {
        let p = &theme.params;
        let ctx = &theme.context;

        let grid = p.grid.then(|| {
            p.grid_color
                .to_plotters()
                .stroke_width(canvas.px_u32(ctx.grid_line_width))
        });

        let (tick_label_pt, pad_pt) = if trim.tight_ticks {
            (TIGHT_TICK_LABEL_PT, TIGHT_TICK_PAD_PT)
        } else {
            (ctx.tick_label_size, 3.5)
        };
        let show_tick_marks = !trim.tight_ticks && (p.xtick_bottom || p.ytick_left);
        let tick_mark_px = if show_tick_marks {
            canvas.px(3.5).round() as i32
        } else {
            0
        };

        let spines = p.spines.without(&trim.despine);
        let edge = p
            .axes_edge
            .to_plotters()
            .stroke_width(canvas.px_u32(ctx.axes_line_width));
        let thin = trim
            .thin_spine
            .map(|t| (t.side, t.color.to_plotters().stroke_width(canvas.px_u32(t.width))));

        let style_for = |side: Side| -> Option<ShapeStyle> {
            match thin {
                Some((s, st)) if s == side => Some(st),
                _ if spines.get(side) => Some(edge),
                _ => None,
            }
        };

        // plotters only draws tick marks along its own axis lines, so hand the
        // left/bottom spines to plotters when tick marks are wanted.
        let axis_lines = (show_tick_marks
            && style_for(Side::Left).is_some()
            && style_for(Side::Bottom).is_some())
        .then_some(edge);

        let manual_spines = [Side::Left, Side::Bottom, Side::Right, Side::Top]
            .into_iter()
            .filter(|s| axis_lines.is_none() || matches!(s, Side::Right | Side::Top))
            .filter_map(|s| style_for(s).map(|st| (s, st)))
            .collect();

        Self {
            family: theme.font_family.as_str(),
            canvas,
            figure_face: p.figure_face.to_plotters(),
            axes_face: p.axes_face.to_plotters(),
            grid,
            text_color: p.text_color.to_plotters(),
            label_color: p.label_color.to_plotters(),
            tick_color: p.tick_color.to_plotters(),
            tick_label_px: canvas.px(tick_label_pt),
            title_px: canvas.px(ctx.title_size),
            axis_desc_px: canvas.px(ctx.axes_label_size),
            legend_px: canvas.px_u32(ctx.legend_font_size),
            tick_mark_px,
            label_offset_px: canvas.px(pad_pt).round() as i32,
            rotate_x_labels: trim.rotate_x_labels,
            axis_lines,
            manual_spines,
            patch_edge: (ctx.patch_line_width > 0.0).then(|| {
                p.patch_edge
                    .to_plotters()
                    .stroke_width(canvas.px_u32(ctx.patch_line_width))
            }),
        }
    }

    pub fn title_font(&self) -> TextStyle<'t> {
        (self.family, self.title_px).into_font().color(&self.text_color)
    }

    pub fn tick_font(&self) -> TextStyle<'t> {
        (self.family, self.tick_label_px).into_font().color(&self.tick_color)
    }

    /// Tick labels for the category axis, rotated when requested.
    pub fn x_tick_font(&self) -> TextStyle<'t> {
        if self.rotate_x_labels {
            (self.family, self.tick_label_px)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&self.tick_color)
        } else {
            self.tick_font()
        }
    }

    pub fn axis_desc_font(&self) -> TextStyle<'t> {
        (self.family, self.axis_desc_px).into_font().color(&self.label_color)
    }

    pub fn axis_style(&self) -> ShapeStyle {
        self.axis_lines
            .unwrap_or_else(|| self.tick_color.stroke_width(1))
    }

    /// Room under (or beside) an axis whose tick labels are `labels`.
    /// Rotated labels need their full width; upright ones one line height.
    pub fn category_label_area_px(&self, labels: &[String], with_desc: bool) -> u32 {
        let font = self.tick_label_px.round() as u32;
        let text = if self.rotate_x_labels {
            max_text_width_px(labels, font)
        } else {
            font
        };
        text + self.label_gap_px(with_desc)
    }

    /// Room beside a value axis, sized from sample tick labels.
    pub fn value_label_area_px(&self, samples: &[String], with_desc: bool) -> u32 {
        let font = self.tick_label_px.round() as u32;
        max_text_width_px(samples, font) + self.label_gap_px(with_desc)
    }

    fn label_gap_px(&self, with_desc: bool) -> u32 {
        let desc = if with_desc {
            (self.axis_desc_px * 1.6).round() as u32
        } else {
            0
        };
        self.tick_mark_px.max(0) as u32 + self.label_offset_px.max(0) as u32 + self.canvas.px_u32(2.0) + desc
    }

    pub fn margin_px(&self) -> u32 {
        self.canvas.px_u32(8.0)
    }
}

/// Draw hand-made spines around the plotting area (absolute pixel ranges).
pub(crate) fn draw_spines<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    look: &AxesLook<'_>,
    plot_px: (Range<i32>, Range<i32>),
) -> Result<()> {
    let (xr, yr) = plot_px;
    let (x0, x1, y0, y1) = (xr.start, xr.end, yr.start, yr.end);
    for (side, style) in &look.manual_spines {
        let pts = match side {
            Side::Left => vec![(x0, y0), (x0, y1)],
            Side::Right => vec![(x1, y0), (x1, y1)],
            Side::Bottom => vec![(x0, y1), (x1, y1)],
            Side::Top => vec![(x0, y0), (x1, y0)],
        };
        root.draw(&PathElement::new(pts, *style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Palette color as a fill (bars, wedges); outlines come from [`AxesLook::patch_edge`].
pub(crate) fn patch_fill(color: Rgb8) -> ShapeStyle {
    color.to_plotters().filled()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::AxesStyle;

    #[test]
    fn patches_are_borderless_by_default() {
        let theme = Theme::default();
        let look = AxesLook::new(&theme, Canvas::default(), &AxesTrim::default());
        assert!(look.patch_edge.is_none());
    }

    #[test]
    fn patch_line_width_outlines_in_patch_edge_color() {
        let mut theme = Theme::new(AxesStyle::Dark);
        theme.context.patch_line_width = 1.0;
        let canvas = Canvas::default();
        let look = AxesLook::new(&theme, canvas, &AxesTrim::default());
        let edge = look.patch_edge.expect("outline style");
        assert_eq!(edge.stroke_width, canvas.px_u32(1.0));
        assert!(!edge.filled);
        let e = theme.params.patch_edge;
        assert_eq!(edge.color.rgb(), (e.r, e.g, e.b));
    }

    #[test]
    fn ticks_style_hands_axis_lines_to_plotters() {
        let theme = Theme::new(AxesStyle::Ticks);
        let look = AxesLook::new(&theme, Canvas::default(), &AxesTrim::default());
        assert!(look.axis_lines.is_some());
        assert!(look.tick_mark_px > 0);
        let tight = AxesTrim {
            tight_ticks: true,
            ..AxesTrim::default()
        };
        let look = AxesLook::new(&theme, Canvas::default(), &tight);
        assert!(look.axis_lines.is_none());
        assert_eq!(look.tick_mark_px, 0);
    }
}
