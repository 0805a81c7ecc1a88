//! Axes style parameter sets.
//!
//! Each [`AxesStyle`] resolves to a [`StyleParams`] value controlling the
//! background, grid, spines, and tick marks of a chart. Shared across styles:
//! dark gray text, labels and ticks, white figure background, white patch
//! edges. Tick marks are only drawn by the `ticks` style.

use crate::palette::{DARK_FACE, DARK_GRAY, LIGHT_GRAY, Rgb8, SPINE_GRAY, WHITE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("style must be one of {}", AxesStyle::NAMES.join(", "))]
pub struct UnknownStyle(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxesStyle {
    #[default]
    White,
    Dark,
    WhiteGrid,
    DarkGrid,
    Ticks,
    /// Borderless white axes with a light grid.
    Shadow,
}

impl AxesStyle {
    pub const NAMES: [&'static str; 6] = ["white", "dark", "whitegrid", "darkgrid", "ticks", "shadow"];

    pub fn name(&self) -> &'static str {
        match self {
            AxesStyle::White => "white",
            AxesStyle::Dark => "dark",
            AxesStyle::WhiteGrid => "whitegrid",
            AxesStyle::DarkGrid => "darkgrid",
            AxesStyle::Ticks => "ticks",
            AxesStyle::Shadow => "shadow",
        }
    }

    pub fn params(&self) -> StyleParams {
        StyleParams::for_style(*self)
    }
}

impl FromStr for AxesStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(AxesStyle::White),
            "dark" => Ok(AxesStyle::Dark),
            "whitegrid" => Ok(AxesStyle::WhiteGrid),
            "darkgrid" => Ok(AxesStyle::DarkGrid),
            "ticks" => Ok(AxesStyle::Ticks),
            "shadow" => Ok(AxesStyle::Shadow),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for AxesStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chart side, for spines and tick marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Bottom,
    Top,
}

/// Visibility of the four axes spines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spines {
    pub left: bool,
    pub bottom: bool,
    pub right: bool,
    pub top: bool,
}

impl Spines {
    pub const ALL: Spines = Spines {
        left: true,
        bottom: true,
        right: true,
        top: true,
    };
    pub const NONE: Spines = Spines {
        left: false,
        bottom: false,
        right: false,
        top: false,
    };

    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Top => self.top,
        }
    }

    pub fn set(&mut self, side: Side, visible: bool) {
        match side {
            Side::Left => self.left = visible,
            Side::Right => self.right = visible,
            Side::Bottom => self.bottom = visible,
            Side::Top => self.top = visible,
        }
    }

    /// Hide the given sides, keep the rest.
    pub fn without(mut self, sides: &[Side]) -> Spines {
        for s in sides {
            self.set(*s, false);
        }
        self
    }
}

/// Typed counterpart of a plotting rc-parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleParams {
    pub figure_face: Rgb8,
    pub axes_face: Rgb8,
    pub axes_edge: Rgb8,
    pub grid: bool,
    pub grid_color: Rgb8,
    pub label_color: Rgb8,
    pub text_color: Rgb8,
    pub tick_color: Rgb8,
    /// Tick marks on the bottom axis.
    pub xtick_bottom: bool,
    /// Tick marks on the left axis.
    pub ytick_left: bool,
    pub spines: Spines,
    /// Outline drawn around bars and wedges when the context gives patches a line width.
    pub patch_edge: Rgb8,
}

impl StyleParams {
    pub fn for_style(style: AxesStyle) -> Self {
        let mut p = StyleParams {
            figure_face: WHITE,
            axes_face: WHITE,
            axes_edge: DARK_GRAY,
            grid: false,
            grid_color: LIGHT_GRAY,
            label_color: DARK_GRAY,
            text_color: DARK_GRAY,
            tick_color: DARK_GRAY,
            xtick_bottom: false,
            ytick_left: false,
            spines: Spines::ALL,
            patch_edge: WHITE,
        };

        p.grid = style.name().contains("grid");

        match style {
            AxesStyle::Dark | AxesStyle::DarkGrid => {
                p.axes_face = DARK_FACE;
                p.axes_edge = WHITE;
                p.grid_color = WHITE;
            }
            AxesStyle::WhiteGrid => {
                p.axes_edge = LIGHT_GRAY;
            }
            AxesStyle::White | AxesStyle::Ticks => {}
            AxesStyle::Shadow => {
                p.axes_edge = LIGHT_GRAY;
                p.grid = true;
                p.spines = Spines::NONE;
            }
        }

        if style == AxesStyle::Ticks {
            p.xtick_bottom = true;
            p.ytick_left = true;
        }
        p
    }
}

impl Default for StyleParams {
    fn default() -> Self {
        Self::for_style(AxesStyle::default())
    }
}

/// Decorations applied after the data is drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxesTrim {
    /// Sides whose spines are removed.
    pub despine: Vec<Side>,
    /// A minimal light gray spine on one side (drawn even if despined).
    pub thin_spine: Option<ThinSpine>,
    /// Small tick labels pulled close to the axis, no tick marks.
    pub tight_ticks: bool,
    /// Tilted category labels for crowded x axes.
    pub rotate_x_labels: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThinSpine {
    pub side: Side,
    pub color: Rgb8,
    /// Width in points.
    pub width: f64,
}

impl ThinSpine {
    pub fn on(side: Side) -> Self {
        Self {
            side,
            color: SPINE_GRAY,
            width: 0.5,
        }
    }
}

/// Tick label size (points) used by tight tick params.
pub const TIGHT_TICK_LABEL_PT: f64 = 7.0;
/// Label offset (points) used by tight tick params; negative pulls labels inward.
pub const TIGHT_TICK_PAD_PT: f64 = -4.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_style_lists_valid_names() {
        let err = "fivethirtyeight".parse::<AxesStyle>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "style must be one of white, dark, whitegrid, darkgrid, ticks, shadow"
        );
    }

    #[test]
    fn grid_follows_style_name() {
        assert!(AxesStyle::WhiteGrid.params().grid);
        assert!(AxesStyle::DarkGrid.params().grid);
        assert!(!AxesStyle::White.params().grid);
        assert!(!AxesStyle::Ticks.params().grid);
        assert!(AxesStyle::Shadow.params().grid);
    }

    #[test]
    fn shadow_hides_spines_and_ticks_shows_marks() {
        let shadow = AxesStyle::Shadow.params();
        assert_eq!(shadow.spines, Spines::NONE);
        assert!(!shadow.xtick_bottom);
        let ticks = AxesStyle::Ticks.params();
        assert!(ticks.xtick_bottom && ticks.ytick_left);
        assert_eq!(ticks.axes_edge, DARK_GRAY);
    }

    #[test]
    fn dark_styles_use_tinted_face() {
        let p = AxesStyle::Dark.params();
        assert_eq!(p.axes_face.hex(), "#EAEAF2");
        assert_eq!(p.grid_color, WHITE);
        assert_eq!(p.axes_edge, WHITE);
        assert_eq!(p.patch_edge, WHITE);
    }

    #[test]
    fn spines_without() {
        let s = Spines::ALL.without(&[Side::Top, Side::Right]);
        assert!(s.left && s.bottom && !s.top && !s.right);
    }
}
