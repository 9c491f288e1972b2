//! End-to-end tests of the `render` subcommand.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const GRID: &str = "#.#\n.#.\n#.#\n";

fn cmd() -> Command {
    Command::cargo_bin("qrpix_cli").unwrap()
}

/// A path in the temporary directory unique to this test process.
fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("qrpix-cli-{}-{}", std::process::id(), name))
}

#[test]
fn text_to_stdout() {
    cmd()
        .args(["render", "--border", "1"])
        .write_stdin("#.\n.#\n")
        .assert()
        .success()
        .stdout("        \n  ██    \n    ██  \n        \n");
}

#[test]
fn inverted_text() {
    cmd()
        .args(["render", "--border", "1", "--inverted"])
        .write_stdin("#.\n.#\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("████████\n██  ████\n"));
}

#[test]
fn zero_box_size_is_rejected() {
    cmd()
        .args(["render", "--box-size", "0"])
        .write_stdin(GRID)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid box size. Must be larger than 0"));
}

#[test]
fn negative_border_is_rejected() {
    cmd()
        .args(["render", "--border", "-3"])
        .write_stdin(GRID)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid border value. Must be larger than 0"));
}

#[test]
fn non_numeric_box_size_is_a_conversion_error() {
    cmd()
        .args(["render", "--box-size", "big"])
        .write_stdin(GRID)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot interpret box size as an integer"));
}

#[test]
fn invalid_extension_is_rejected() {
    cmd()
        .args(["render", "-o", "qr.gif"])
        .write_stdin(GRID)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid output extension 'gif'"));
}

#[test]
fn invalid_color_is_rejected() {
    cmd()
        .args(["render", "--fill-color", "#12"])
        .write_stdin(GRID)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid color '#12'"));
}

#[test]
fn ragged_grid_is_rejected() {
    cmd()
        .arg("render")
        .write_stdin("##\n#\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "line 2 has 1 modules but the canvas is 2 modules wide",
        ));
}

#[test]
fn png_output() {
    let path = temp_output("out.png");
    cmd()
        .args(["render", "--box-size", "4", "--border", "1", "-o"])
        .arg(&path)
        .write_stdin(GRID)
        .assert()
        .success();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn svg_output_from_file() {
    let input = temp_output("grid.txt");
    let output = temp_output("out.svg");
    std::fs::write(&input, GRID).unwrap();
    cmd()
        .args(["render", "--fill-color", "#ff0000", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success();
    let svg = std::fs::read_to_string(&output).unwrap();
    std::fs::remove_file(&input).unwrap();
    std::fs::remove_file(&output).unwrap();
    // (3 + 2 * 2) * 10 pixels per side, one rect for the background and one per dark module.
    assert!(svg.contains("viewBox=\"0 0 70 70\""));
    assert_eq!(svg.matches("<rect").count(), 6);
    assert_eq!(svg.matches("fill=\"#ff0000\"").count(), 5);
}

#[test]
fn missing_input_file() {
    cmd()
        .args(["render", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open 'does-not-exist.txt'"));
}

#[test]
fn help_lists_block_as_dark() {
    cmd()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'x' or '█' is a dark module"));
}

#[test]
fn block_characters_are_dark() {
    cmd()
        .args(["render", "--border", "1"])
        .write_stdin("█.\n.█\n")
        .assert()
        .success()
        .stdout("        \n  ██    \n    ██  \n        \n");
}

#[test]
fn transparent_jpeg_is_white() {
    let path = temp_output("transparent.jpg");
    cmd()
        .args(["render", "--back-color", "transparent", "-o"])
        .arg(&path)
        .write_stdin(GRID)
        .assert()
        .success();
    let decoded = image::open(&path).unwrap().into_rgb8();
    std::fs::remove_file(&path).unwrap();
    assert!(decoded.get_pixel(0, 0).0.iter().all(|&c| c > 240));
}
