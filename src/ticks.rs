//! Tick label formatting for value axes.
//!
//! The default formatter abbreviates large magnitudes with `k`/`M`/`B`
//! suffixes (`4500` -> `4.5k`, `4_000_000` -> `4M`).

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Unit tiers in priority order: (divisor, suffix).
const UNITS: [(f64, &str); 3] = [(1.0e9, "B"), (1.0e6, "M"), (1.0e3, "k")];

/// Abbreviate a tick value to at most one decimal place with a unit suffix.
///
/// The tier is picked from the magnitude of the raw value, so negative values
/// mirror their positive counterparts (`-4500` -> `-4.5k`). A trailing `.0`
/// is always dropped, including below 1000 (`12.0` -> `12`).
pub fn abbreviate_tick_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    let (divisor, suffix) = UNITS
        .iter()
        .copied()
        .find(|(div, _)| magnitude >= *div)
        .unwrap_or((1.0, ""));

    // the float formatter rounds the exact binary value, ties to even
    let mut out = format!("{:.1}", value / divisor);
    if out.ends_with(".0") {
        out.truncate(out.len() - 2);
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out.push_str(suffix);
    out
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// How value-axis ticks are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TickFormat {
    /// `4.5k`, `4M`, `4.5B`.
    #[default]
    Abbreviated,
    /// Whole numbers with locale thousands separators (`30,000` vs `30.000`).
    Grouped { locale: String },
    /// Up to two decimals, trailing zeros removed.
    Plain,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Abbreviated => abbreviate_tick_value(value),
            TickFormat::Grouped { locale } => {
                if !value.is_finite() {
                    return value.to_string();
                }
                let n = value.round() as i64;
                n.to_formatted_string(map_locale(locale))
            }
            TickFormat::Plain => {
                let s = format!("{value:.2}");
                let s = s.trim_end_matches('0').trim_end_matches('.');
                if s == "-0" { "0".to_string() } else { s.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_examples() {
        assert_eq!(abbreviate_tick_value(4000.0), "4k");
        assert_eq!(abbreviate_tick_value(4500.0), "4.5k");
        assert_eq!(abbreviate_tick_value(4_000_000.0), "4M");
        assert_eq!(abbreviate_tick_value(4_500_000_000.0), "4.5B");
    }

    #[test]
    fn below_thousand_keeps_one_decimal() {
        assert_eq!(abbreviate_tick_value(0.0), "0");
        assert_eq!(abbreviate_tick_value(12.0), "12");
        assert_eq!(abbreviate_tick_value(12.34), "12.3");
        assert_eq!(abbreviate_tick_value(999.0), "999");
    }

    #[test]
    fn rounds_like_the_decimal_value() {
        assert_eq!(abbreviate_tick_value(0.25), "0.2");
        assert_eq!(abbreviate_tick_value(0.35), "0.3");
        assert_eq!(abbreviate_tick_value(1.15), "1.1");
        assert_eq!(abbreviate_tick_value(4250.0), "4.2k");
        assert_eq!(abbreviate_tick_value(4_250_000.0), "4.2M");
        assert_eq!(abbreviate_tick_value(-0.04), "0");
    }

    #[test]
    fn tier_comes_from_raw_value() {
        assert_eq!(abbreviate_tick_value(999.96), "1000");
        assert_eq!(abbreviate_tick_value(1000.0), "1k");
    }

    #[test]
    fn grouped_and_plain() {
        let grouped = TickFormat::Grouped { locale: "de".into() };
        assert_eq!(grouped.format(30000.0), "30.000");
        let grouped = TickFormat::Grouped { locale: "en".into() };
        assert_eq!(grouped.format(1234567.4), "1,234,567");
        assert_eq!(TickFormat::Plain.format(2.50), "2.5");
        assert_eq!(TickFormat::Plain.format(3.0), "3");
    }
}
