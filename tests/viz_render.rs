use preso::table::Column;
use preso::viz::{self, BarOptions, LineOptions, PieOptions, StackBarOptions, StripOptions};
use preso::{
    AxesStyle, Canvas, FigureSize, Selection, SeriesSource, Table, Theme, ThemeConfig,
    stacked_series,
};
use std::fs;
use std::path::{Path, PathBuf};

fn canvas() -> Canvas {
    Canvas::new(FigureSize::Default, 72)
}

fn sales() -> Table {
    Table::new(vec![
        Column::text("region", vec!["North", "South", "East", "West"]),
        Column::numeric("q1", vec![4500.0, 12_000.0, 800.0, 2_300_000.0]),
        Column::numeric("q2", vec![5200.0, 9_000.0, 1100.0, 2_100_000.0]),
        Column::numeric("year", vec![2020.0, 2021.0, 2022.0, 2023.0]),
    ])
    .unwrap()
}

fn write_and_check<F: Fn(&Path)>(maker: F, name: &str) {
    let dir = tempfile::tempdir().unwrap();
    for ext in ["svg", "png"] {
        let path: PathBuf = dir.path().join(format!("preso_{name}.{ext}"));
        maker(&path);
        let meta = fs::metadata(&path).expect("file created");
        assert!(meta.len() > 0, "{ext} has content");
    }
}

#[test]
fn pie_renders() {
    let labels: Vec<String> = ["Rent", "Food", "Travel"].iter().map(|s| s.to_string()).collect();
    let opts = PieOptions {
        canvas: canvas(),
        title: Some("Budget".into()),
        show_values: true,
        explode: vec![0.1, 0.0, 0.0],
        ..PieOptions::default()
    };
    write_and_check(
        |p| viz::pie(p, &Theme::default(), &[50.0, 30.0, 20.0], &labels, &opts).unwrap(),
        "pie",
    );
}

#[test]
fn outlined_patches_render() {
    let cfg = ThemeConfig::from_json(r#"{"style": "dark", "context": {"patch_line_width": 1.0}}"#)
        .unwrap();
    let theme = Theme::from_config(&cfg).unwrap();
    assert_eq!(theme.context.patch_line_width, 1.0);
    let labels: Vec<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();
    let opts = PieOptions {
        canvas: canvas(),
        ..PieOptions::default()
    };
    write_and_check(
        |p| viz::pie(p, &theme, &[0.6, 0.4], &labels, &opts).unwrap(),
        "pie_outlined",
    );
    let table = sales();
    let stack = stacked_series(
        &table,
        &Selection::from("region"),
        &SeriesSource::Columns(vec![Selection::from("q1"), Selection::from("q2")]),
    )
    .unwrap();
    let opts = StackBarOptions {
        canvas: canvas(),
        ..StackBarOptions::default()
    };
    write_and_check(
        |p| viz::stackbar(p, &theme, &stack, &opts).unwrap(),
        "stack_outlined",
    );
}

#[test]
fn pie_rejects_mismatched_labels() {
    let dir = tempfile::tempdir().unwrap();
    let res = viz::pie(
        dir.path().join("bad.svg"),
        &Theme::default(),
        &[1.0, 2.0],
        &["only one".to_string()],
        &PieOptions::default(),
    );
    assert!(res.is_err());
}

#[test]
fn bar_renders_in_every_style() {
    let table = sales();
    for style in AxesStyle::NAMES {
        let theme = Theme::new(style.parse().unwrap());
        let opts = BarOptions {
            canvas: canvas(),
            title: Some(format!("Sales ({style})")),
            show_legend: true,
            rotate_x_labels: style == "ticks",
        };
        write_and_check(
            |p| {
                viz::bar(
                    p,
                    &theme,
                    &table,
                    &Selection::renamed("region", "Region"),
                    &Selection::from("q1"),
                    &opts,
                )
                .unwrap()
            },
            &format!("bar_{style}"),
        );
    }
}

#[test]
fn stackbar_renders_both_orientations() {
    let table = sales();
    let stack = stacked_series(
        &table,
        &Selection::from("region"),
        &SeriesSource::Columns(vec![Selection::from("q1"), Selection::renamed("q2", "Q2")]),
    )
    .unwrap();
    for horizontal in [false, true] {
        let opts = StackBarOptions {
            canvas: Canvas::new(FigureSize::Wide, 72),
            title: None,
            horizontal,
        };
        write_and_check(
            |p| viz::stackbar(p, &Theme::default(), &stack, &opts).unwrap(),
            &format!("stack_{horizontal}"),
        );
    }
}

#[test]
fn line_renders_numeric_and_categorical_x() {
    let table = sales();
    let opts = LineOptions {
        canvas: canvas(),
        markers: true,
        ..LineOptions::default()
    };
    let ys = [Selection::from("q1"), Selection::from("q2")];
    write_and_check(
        |p| viz::line(p, &Theme::default(), &table, &Selection::from("year"), &ys, &opts).unwrap(),
        "line_numeric",
    );
    let opts = LineOptions {
        canvas: canvas(),
        style: Some(AxesStyle::DarkGrid),
        rotate_x_labels: true,
        ..LineOptions::default()
    };
    write_and_check(
        |p| viz::line(p, &Theme::default(), &table, &Selection::from("region"), &ys, &opts).unwrap(),
        "line_categorical",
    );
}

#[test]
fn line_requires_numeric_y() {
    let dir = tempfile::tempdir().unwrap();
    let res = viz::line(
        dir.path().join("bad.svg"),
        &Theme::default(),
        &sales(),
        &Selection::from("year"),
        &[Selection::from("region")],
        &LineOptions::default(),
    );
    assert!(res.is_err());
}

#[test]
fn strip_renders() {
    let table = Table::from_reader(
        "team,score\nred,3\nblue,5\nred,4\ngreen,1\nblue,6\nred,2\n".as_bytes(),
    )
    .unwrap();
    let opts = StripOptions {
        canvas: canvas(),
        title: Some("Scores".into()),
        ..StripOptions::default()
    };
    write_and_check(
        |p| {
            viz::stripplot(
                p,
                &Theme::new(AxesStyle::WhiteGrid),
                &table,
                &Selection::from("team"),
                &Selection::from("score"),
                &opts,
            )
            .unwrap()
        },
        "strip",
    );
}

#[test]
fn strip_with_nan_jitter_still_renders() {
    let table = Table::from_reader("team,score\nred,3\nblue,5\nred,4\n".as_bytes()).unwrap();
    let opts = StripOptions {
        canvas: canvas(),
        jitter: f64::NAN,
        ..StripOptions::default()
    };
    write_and_check(
        |p| {
            viz::stripplot(
                p,
                &Theme::default(),
                &table,
                &Selection::from("team"),
                &Selection::from("score"),
                &opts,
            )
            .unwrap()
        },
        "strip_nan_jitter",
    );
}

#[test]
fn empty_data_is_an_error() {
    let table = Table::new(vec![
        Column::text("x", Vec::<String>::new()),
        Column::numeric("y", vec![]),
    ])
    .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let res = viz::bar(
        dir.path().join("empty.svg"),
        &Theme::default(),
        &table,
        &Selection::from("x"),
        &Selection::from("y"),
        &BarOptions::default(),
    );
    assert!(res.unwrap_err().to_string().contains("no data"));
}
