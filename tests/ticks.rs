use preso::{TickFormat, abbreviate_tick_value};

#[test]
fn suffix_examples() {
    assert_eq!(abbreviate_tick_value(4000.0), "4k");
    assert_eq!(abbreviate_tick_value(4500.0), "4.5k");
    assert_eq!(abbreviate_tick_value(4_000_000.0), "4M");
    assert_eq!(abbreviate_tick_value(4_500_000_000.0), "4.5B");
    assert_eq!(abbreviate_tick_value(12_340.0), "12.3k");
}

#[test]
fn values_below_thousand_are_rounded_only() {
    let cases = [
        (0.0, "0"),
        (0.25, "0.2"),
        (0.35, "0.3"),
        (1.15, "1.1"),
        (2.675, "2.7"),
        (12.0, "12"),
        (12.34, "12.3"),
        (99.95, "100"),
        (999.0, "999"),
        (999.94, "999.9"),
    ];
    for (v, expected) in cases {
        assert_eq!(abbreviate_tick_value(v), expected, "v = {v}");
    }
}

#[test]
fn values_below_thousand_stay_within_half_a_tenth() {
    let mut v = 0.0;
    while v < 999.9 {
        let label = abbreviate_tick_value(v);
        assert!(!label.ends_with(['k', 'M', 'B']), "v = {v}");
        assert!(!label.ends_with(".0"), "v = {v}");
        let shown: f64 = label.parse().unwrap();
        assert!((shown - v).abs() <= 0.05 + 1e-9, "v = {v} shown as {label}");
        v += 0.37;
    }
}

#[test]
fn scaled_ties_round_like_the_decimal_value() {
    assert_eq!(abbreviate_tick_value(4250.0), "4.2k");
    assert_eq!(abbreviate_tick_value(4_250_000.0), "4.2M");
    assert_eq!(abbreviate_tick_value(4_350_000_000.0), "4.3B");
}

#[test]
fn tier_boundaries() {
    assert_eq!(abbreviate_tick_value(999.0), "999");
    assert_eq!(abbreviate_tick_value(1000.0), "1k");
    assert_eq!(abbreviate_tick_value(999_999.0), "1000k");
    assert_eq!(abbreviate_tick_value(1_000_000.0), "1M");
    assert_eq!(abbreviate_tick_value(1_000_000_000.0), "1B");
}

#[test]
fn numeric_part_is_monotonic_within_a_tier() {
    let numeric = |s: String| -> f64 { s.trim_end_matches('k').parse().unwrap() };
    let mut prev = f64::MIN;
    for v in (1000..1_000_000).step_by(997) {
        let n = numeric(abbreviate_tick_value(v as f64));
        assert!(n >= prev, "{v} went backwards");
        prev = n;
    }
}

#[test]
fn abbreviating_twice_is_stable() {
    for v in [0.0, 3.0, 12.5, 999.0, 4500.0, 4_000_000.0, 7_250_000_000.0] {
        let once = abbreviate_tick_value(v);
        let stripped = once.trim_end_matches(['k', 'M', 'B']);
        let parsed: f64 = stripped.parse().unwrap();
        let scale = match once.chars().last() {
            Some('k') => 1e3,
            Some('M') => 1e6,
            Some('B') => 1e9,
            _ => 1.0,
        };
        assert_eq!(abbreviate_tick_value(parsed * scale), once);
    }
}

#[test]
fn negatives_mirror_positives() {
    assert_eq!(abbreviate_tick_value(-4500.0), "-4.5k");
    assert_eq!(abbreviate_tick_value(-4_000_000.0), "-4M");
    assert_eq!(abbreviate_tick_value(-12.0), "-12");
    assert_eq!(abbreviate_tick_value(-0.01), "0");
}

#[test]
fn non_finite_values_pass_through() {
    assert_eq!(abbreviate_tick_value(f64::NAN), "NaN");
    assert_eq!(abbreviate_tick_value(f64::INFINITY), "inf");
}

#[test]
fn tick_format_from_json() {
    let tf: TickFormat = serde_json::from_str(r#"{"kind":"grouped","locale":"de"}"#).unwrap();
    assert_eq!(tf.format(1_234_567.0), "1.234.567");
    let tf: TickFormat = serde_json::from_str(r#"{"kind":"abbreviated"}"#).unwrap();
    assert_eq!(tf, TickFormat::default());
}
