use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("preso").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("stackbar"));
}

#[test]
fn abbreviate_prints_one_label_per_value() {
    let mut cmd = Command::cargo_bin("preso").unwrap();
    cmd.args(["abbreviate", "4500", "4000000", "-4500", "12"]);
    cmd.assert()
        .success()
        .stdout(predicate::eq("4.5k\n4M\n-4.5k\n12\n"));
}

#[test]
fn palette_lists_brand_colors() {
    let mut cmd = Command::cargo_bin("preso").unwrap();
    cmd.arg("palette");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("#00A0DF").and(predicate::str::contains("#F7A800")));
}

#[test]
fn stackbar_from_long_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("units.csv");
    fs::write(
        &input,
        "quarter,product,units\nQ1,Widgets,10\nQ1,Gadgets,5\nQ2,Widgets,12\nQ2,Gadgets,6\n",
    )
    .unwrap();
    let out = dir.path().join("units.svg");

    let mut cmd = Command::cargo_bin("preso").unwrap();
    cmd.args(["--dpi", "72", "stackbar", "--base", "quarter", "--series", "Widgets,Gadgets=Other"])
        .args(["--pivot-columns", "product", "--pivot-values", "units"])
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote chart to"));
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn unknown_style_is_rejected() {
    let mut cmd = Command::cargo_bin("preso").unwrap();
    cmd.args(["--style", "neon", "palette"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("style must be one of"));
}

#[test]
fn missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("d.csv");
    fs::write(&input, "a,b\nx,1\n").unwrap();
    let mut cmd = Command::cargo_bin("preso").unwrap();
    cmd.args(["bar", "-x", "a", "-y", "nope"])
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("d.svg"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}
