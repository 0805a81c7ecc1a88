//! Brand color palette in information-design order.
//!
//! Sequence order:
//! 01) Core Blue, 02) Dark Gray, 03) Burnt Orange, 04) True Blue, 05) Turquoise,
//! 06) Tangerine, 07) Cayenne, 08) Pale Blue, 09) Purple, 10) Olive Green,
//! 11) Capri Blue, 12) Leaf Green, 13) Digital Core Blue, 14) Bank Dark Gray,
//! 15) Jade Green, 16) Steel Blue, 17) Dark Blue, 18) Orange

use plotters::style::RGBColor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `#RRGGBB` form.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to the `[0, 1]` interval.
    pub fn scaled(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color {0:?}, expected #RRGGBB")]
pub struct InvalidHexColor(pub String);

fn hex_pattern() -> &'static Regex {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| {
        Regex::new(r"^#?([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$")
            .expect("static hex color pattern")
    })
}

/// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
pub fn parse_hex(s: &str) -> Result<Rgb8, InvalidHexColor> {
    let caps = hex_pattern()
        .captures(s.trim())
        .ok_or_else(|| InvalidHexColor(s.to_string()))?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).map_err(|_| InvalidHexColor(s.to_string()));
    Ok(Rgb8::new(channel(1)?, channel(2)?, channel(3)?))
}

pub const BRAND_PALETTE: [Rgb8; 18] = [
    Rgb8::new(0, 160, 223),   // core blue         (#00A0DF)
    Rgb8::new(66, 85, 99),    // dark gray         (#425563)
    Rgb8::new(185, 94, 4),    // burnt orange      (#B95E04)
    Rgb8::new(68, 108, 169),  // true blue         (#446CA9)
    Rgb8::new(100, 204, 201), // turquoise         (#64CCC9)
    Rgb8::new(255, 198, 77),  // tangerine         (#FFC64D)
    Rgb8::new(200, 108, 97),  // cayenne           (#C86C61)
    Rgb8::new(187, 221, 230), // pale blue         (#BBDDE6)
    Rgb8::new(158, 72, 119),  // purple            (#9E4877)
    Rgb8::new(157, 174, 136), // olive green       (#9DAE88)
    Rgb8::new(78, 193, 224),  // capri blue        (#4EC1E0)
    Rgb8::new(122, 156, 73),  // leaf green        (#7A9C49)
    Rgb8::new(3, 125, 174),   // digital core blue (#037DAE)
    Rgb8::new(100, 100, 100), // bank dark gray    (#646464)
    Rgb8::new(18, 125, 109),  // jade green        (#127D6D)
    Rgb8::new(107, 164, 184), // steel blue        (#6BA4B8)
    Rgb8::new(2, 55, 90),     // dark blue         (#02375A)
    Rgb8::new(247, 168, 0),   // orange            (#F7A800)
];

/// Neutral colors used by the style parameter sets.
pub const DARK_GRAY: Rgb8 = Rgb8::new(0x42, 0x55, 0x63);
pub const LIGHT_GRAY: Rgb8 = Rgb8::new(0xD9, 0xD9, 0xD9);
pub const DARK_FACE: Rgb8 = Rgb8::new(0xEA, 0xEA, 0xF2);
pub const SPINE_GRAY: Rgb8 = Rgb8::new(0x98, 0xA4, 0xAE);
pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

/// Brand palette as `#RRGGBB` strings.
pub fn brand_hex() -> Vec<String> {
    BRAND_PALETTE.iter().map(Rgb8::hex).collect()
}

/// Scale 0-255 RGB triples to the `[0, 1]` interval.
pub fn rgb_scaled(colors: &[Rgb8]) -> Vec<(f64, f64, f64)> {
    colors.iter().map(Rgb8::scaled).collect()
}

/// Brand palette scaled to `[0, 1]`.
pub fn scaled_palette() -> Vec<(f64, f64, f64)> {
    rgb_scaled(&BRAND_PALETTE)
}

/// An ordered, cycling color sequence. Never empty.
///
/// Serialized as a plain list of colors; an empty list reads back as the
/// brand palette.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Rgb8>", into = "Vec<Rgb8>")]
pub struct Palette {
    colors: Vec<Rgb8>,
}

impl Palette {
    /// Falls back to the brand palette when `colors` is empty.
    pub fn new(colors: Vec<Rgb8>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, InvalidHexColor> {
        let colors = hex
            .iter()
            .map(|h| parse_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb8] {
        &self.colors
    }

    /// Color at `idx`, cycling when the palette is shorter than the data.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb8 {
        self.colors[idx % self.colors.len()]
    }

    /// First `n` colors, cycling as needed.
    pub fn take(&self, n: usize) -> Vec<Rgb8> {
        (0..n).map(|i| self.color(i)).collect()
    }
}

impl From<Vec<Rgb8>> for Palette {
    fn from(colors: Vec<Rgb8>) -> Self {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<Rgb8> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: BRAND_PALETTE.to_vec(),
        }
    }
}
