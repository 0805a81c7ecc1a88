use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use preso::palette::BRAND_PALETTE;
use preso::viz::{self, BarOptions, LineOptions, PieOptions, StackBarOptions, StripOptions};
use preso::{
    AxesStyle, Canvas, DEFAULT_DPI, FigureSize, Selection, SeriesSource, Table, Theme,
    abbreviate_tick_value, load_theme, stacked_series,
};

#[derive(Parser, Debug)]
#[command(
    name = "preso",
    version,
    about = "Brand-styled presentation charts from CSV data"
)]
struct Cli {
    #[command(flatten)]
    look: LookArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct LookArgs {
    /// Axes style: white, dark, whitegrid, darkgrid, ticks, shadow.
    #[arg(long, global = true)]
    style: Option<AxesStyle>,
    /// Theme file (JSON) with palette, style, tick format and font overrides.
    #[arg(long, global = true)]
    theme: Option<PathBuf>,
    /// Figure size: default (6x4 in) or 2:1 (8x4 in).
    #[arg(long, global = true, default_value = "default")]
    size: FigureSize,
    /// Dots per inch.
    #[arg(long, global = true, default_value_t = DEFAULT_DPI)]
    dpi: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pie chart of one numeric column labelled by another.
    Pie(PieArgs),
    /// Bar chart, one bar per row.
    Bar(BarArgs),
    /// Stacked bar chart from wide columns or pivoted long data.
    Stackbar(StackbarArgs),
    /// Line chart of one or more columns.
    Line(LineArgs),
    /// Strip plot of a numeric column grouped by a category column.
    Strip(StripArgs),
    /// Print the brand palette.
    Palette(PaletteArgs),
    /// Print abbreviated tick labels for numbers.
    Abbreviate(AbbreviateArgs),
}

#[derive(Args, Debug)]
struct PieArgs {
    /// Input CSV file.
    #[arg(short, long)]
    input: PathBuf,
    /// Column with slice names.
    #[arg(long)]
    labels: String,
    /// Numeric column with slice sizes.
    #[arg(long)]
    values: String,
    /// Output chart (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    #[arg(long)]
    title: Option<String>,
    /// Hide the legend.
    #[arg(long, default_value_t = false)]
    no_legend: bool,
    /// Hide the slice names next to the wedges.
    #[arg(long, default_value_t = false)]
    no_labels: bool,
    /// Show the raw value under each percentage.
    #[arg(long, default_value_t = false)]
    show_values: bool,
    /// Per-slice offsets as fractions of the radius (e.g. 0.1,0,0).
    #[arg(long, value_delimiter = ',')]
    explode: Vec<f64>,
}

#[derive(Args, Debug)]
struct BarArgs {
    #[arg(short, long)]
    input: PathBuf,
    /// Category column (`column` or `column=Alias`).
    #[arg(short)]
    x: Selection,
    /// Value column (`column` or `column=Alias`).
    #[arg(short)]
    y: Selection,
    #[arg(short, long)]
    out: PathBuf,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, default_value_t = false)]
    legend: bool,
    /// Rotate category labels.
    #[arg(long, default_value_t = false)]
    rotate: bool,
}

#[derive(Args, Debug)]
struct StackbarArgs {
    #[arg(short, long)]
    input: PathBuf,
    /// Base (category) column.
    #[arg(long)]
    base: Selection,
    /// Stacked layers in order, comma separated; each `column` or `column=Alias`.
    #[arg(long, value_delimiter = ',', required = true)]
    series: Vec<Selection>,
    /// Long data: column whose values become the layers.
    #[arg(long, requires = "pivot_values")]
    pivot_columns: Option<String>,
    /// Long data: numeric column with the cell values.
    #[arg(long, requires = "pivot_columns")]
    pivot_values: Option<String>,
    /// Horizontal bars.
    #[arg(long, default_value_t = false)]
    hbar: bool,
    #[arg(short, long)]
    out: PathBuf,
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args, Debug)]
struct LineArgs {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short)]
    x: Selection,
    /// One or more value columns, comma separated.
    #[arg(short, value_delimiter = ',', required = true)]
    y: Vec<Selection>,
    #[arg(short, long)]
    out: PathBuf,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, default_value_t = false)]
    markers: bool,
    #[arg(long, default_value_t = false)]
    rotate: bool,
}

#[derive(Args, Debug)]
struct StripArgs {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short)]
    x: Selection,
    #[arg(short)]
    y: Selection,
    #[arg(short, long)]
    out: PathBuf,
    #[arg(long)]
    title: Option<String>,
    /// Spread of points within a category (fraction of the slot width).
    #[arg(long, default_value_t = 0.2)]
    jitter: f64,
}

#[derive(Args, Debug)]
struct PaletteArgs {
    /// Print channels scaled to [0, 1] instead of hex.
    #[arg(long, default_value_t = false)]
    scaled: bool,
}

#[derive(Args, Debug)]
struct AbbreviateArgs {
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Palette(args) => {
            cmd_palette(args);
            Ok(())
        }
        Command::Abbreviate(args) => {
            for v in args.values {
                println!("{}", abbreviate_tick_value(v));
            }
            Ok(())
        }
        cmd => {
            let theme = resolve_theme(&cli.look)?;
            let canvas = Canvas::new(cli.look.size, cli.look.dpi);
            cmd_chart(cmd, &theme, canvas, cli.look.style)
        }
    }
}

fn resolve_theme(look: &LookArgs) -> Result<Theme> {
    let theme = match &look.theme {
        Some(path) => load_theme(path)?,
        None => Theme::default(),
    };
    Ok(match look.style {
        Some(style) => theme.with_style(style),
        None => theme,
    })
}

fn cmd_palette(args: PaletteArgs) {
    for (i, c) in BRAND_PALETTE.iter().enumerate() {
        if args.scaled {
            let (r, g, b) = c.scaled();
            println!("{:>2}  {:.3} {:.3} {:.3}", i + 1, r, g, b);
        } else {
            println!("{:>2}  {}", i + 1, c.hex());
        }
    }
}

fn cmd_chart(
    cmd: Command,
    theme: &Theme,
    canvas: Canvas,
    style: Option<AxesStyle>,
) -> Result<()> {
    let out = match cmd {
        Command::Pie(a) => {
            let table = Table::from_csv_path(&a.input)?;
            let labels = table.labels(&a.labels)?;
            let values = table.numeric(&a.values)?;
            let opts = PieOptions {
                canvas,
                title: a.title,
                show_legend: !a.no_legend,
                show_labels: !a.no_labels,
                show_values: a.show_values,
                explode: a.explode,
            };
            viz::pie(&a.out, theme, values, &labels, &opts)?;
            a.out
        }
        Command::Bar(a) => {
            let table = Table::from_csv_path(&a.input)?;
            let opts = BarOptions {
                canvas,
                title: a.title,
                show_legend: a.legend,
                rotate_x_labels: a.rotate,
            };
            viz::bar(&a.out, theme, &table, &a.x, &a.y, &opts)?;
            a.out
        }
        Command::Stackbar(a) => {
            let table = Table::from_csv_path(&a.input)?;
            let source = match (a.pivot_columns, a.pivot_values) {
                (Some(columns), Some(values)) => SeriesSource::Pivot {
                    columns,
                    values,
                    layers: a.series,
                },
                (None, None) => SeriesSource::Columns(a.series),
                _ => bail!("--pivot-columns and --pivot-values go together"),
            };
            let stack = stacked_series(&table, &a.base, &source)?;
            let opts = StackBarOptions {
                canvas,
                title: a.title,
                horizontal: a.hbar,
            };
            viz::stackbar(&a.out, theme, &stack, &opts)?;
            a.out
        }
        Command::Line(a) => {
            let table = Table::from_csv_path(&a.input)?;
            let opts = LineOptions {
                canvas,
                title: a.title,
                // an explicit --style wins over the line chart's own default
                style: style.or(LineOptions::default().style),
                rotate_x_labels: a.rotate,
                markers: a.markers,
            };
            viz::line(&a.out, theme, &table, &a.x, &a.y, &opts)?;
            a.out
        }
        Command::Strip(a) => {
            let table = Table::from_csv_path(&a.input)?;
            let opts = StripOptions {
                canvas,
                title: a.title,
                jitter: a.jitter,
            };
            viz::stripplot(&a.out, theme, &table, &a.x, &a.y, &opts)?;
            a.out
        }
        Command::Palette(_) | Command::Abbreviate(_) => return Ok(()),
    };
    eprintln!("Wrote chart to {}", out.display());
    Ok(())
}
