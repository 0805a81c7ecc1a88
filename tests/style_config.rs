use preso::palette::{DARK_FACE, DARK_GRAY, LIGHT_GRAY, WHITE, parse_hex};
use preso::{AxesStyle, ConfigError, FigureSize, Palette, TickFormat, Theme, ThemeConfig};
use preso::{BRAND_PALETTE, brand_hex, load_theme, scaled_palette};
use std::io::Write;

#[test]
fn palette_order_and_forms() {
    let hex = brand_hex();
    assert_eq!(hex.len(), 18);
    assert_eq!(hex[0], "#00A0DF");
    assert_eq!(hex[1], "#425563");
    assert_eq!(hex[17], "#F7A800");
    let (r, g, b) = scaled_palette()[0];
    assert_eq!((r, g), (0.0, 160.0 / 255.0));
    assert!((b - 223.0 / 255.0).abs() < 1e-12);
    assert_eq!(parse_hex("#00a0df").unwrap(), BRAND_PALETTE[0]);
    assert_eq!(parse_hex("00A0DF").unwrap(), BRAND_PALETTE[0]);
    assert!(parse_hex("#00A0D").is_err());
}

#[test]
fn palette_cycles() {
    let p = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
    assert_eq!(p.color(2), p.color(0));
    assert_eq!(Palette::new(vec![]).len(), 18);
}

#[test]
fn deserialized_empty_palette_still_has_colors() {
    let p: Palette = serde_json::from_str("[]").unwrap();
    assert_eq!(p.len(), 18);
    assert_eq!(p.color(5), BRAND_PALETTE[5]);
}

#[test]
fn every_style_name_parses() {
    for name in AxesStyle::NAMES {
        let s: AxesStyle = name.parse().unwrap();
        assert_eq!(s.name(), name);
    }
    let err = "fivethirtyeight".parse::<AxesStyle>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "style must be one of white, dark, whitegrid, darkgrid, ticks, shadow"
    );
}

#[test]
fn style_parameters() {
    let dark = AxesStyle::DarkGrid.params();
    assert_eq!(dark.axes_face, DARK_FACE);
    assert_eq!(dark.grid_color, WHITE);
    assert!(dark.grid);

    let white = AxesStyle::White.params();
    assert!(!white.grid);
    assert_eq!(white.axes_edge, DARK_GRAY);
    assert!(!white.xtick_bottom);

    let ticks = AxesStyle::Ticks.params();
    assert!(ticks.xtick_bottom && ticks.ytick_left);

    let shadow = AxesStyle::Shadow.params();
    assert!(shadow.grid);
    assert_eq!(shadow.axes_edge, LIGHT_GRAY);
    assert!(!shadow.spines.left && !shadow.spines.bottom);
}

#[test]
fn figure_sizes() {
    assert_eq!(FigureSize::Default.pixels(300), (1800, 1200));
    assert_eq!("2:1".parse::<FigureSize>().unwrap(), FigureSize::Wide);
    assert_eq!(FigureSize::Wide.inches(), (8.0, 4.0));
}

#[test]
fn theme_from_json() {
    let cfg = ThemeConfig::from_json(
        r##"{
            "style": "darkgrid",
            "palette": ["#112233", "#445566"],
            "tick_format": {"kind": "plain"},
            "context": {"tick_label_size": 9}
        }"##,
    )
    .unwrap();
    let theme = Theme::from_config(&cfg).unwrap();
    assert_eq!(theme.style, AxesStyle::DarkGrid);
    assert_eq!(theme.palette.len(), 2);
    assert_eq!(theme.palette.color(0).hex(), "#112233");
    assert_eq!(theme.tick_format, TickFormat::Plain);
    assert_eq!(theme.context.tick_label_size, 9.0);
}

#[test]
fn bad_theme_values_are_rejected() {
    assert!(matches!(
        ThemeConfig::from_json(r#"{"colour": "red"}"#),
        Err(ConfigError::Json(_))
    ));
    let cfg = ThemeConfig::from_json(r#"{"palette": ["red"]}"#).unwrap();
    assert!(matches!(Theme::from_config(&cfg), Err(ConfigError::Color(_))));
    let cfg = ThemeConfig::from_json(r#"{"style": "neon"}"#).unwrap();
    assert!(matches!(Theme::from_config(&cfg), Err(ConfigError::Style(_))));
}

#[test]
fn theme_file_round_trip() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{"style": "ticks"}}"#).unwrap();
    let theme = load_theme(f.path()).unwrap();
    assert_eq!(theme.style, AxesStyle::Ticks);
    assert!(matches!(
        load_theme("/definitely/not/here.json"),
        Err(ConfigError::Io { .. })
    ));
}
