//! Runs the `tilepack` binary against sheets written to a temporary directory.
use std::path::Path;

use assert_cmd::Command;
use tilepack::decode::extract::Mask;
use tilepack::decode::image::{PixelBuffer, Rgba};
use tilepack::sheet::SheetBuilder;

fn write_png(img: &PixelBuffer, path: &Path) {
    image::RgbaImage::from_raw(img.width, img.height, img.to_rgba8())
        .unwrap()
        .save(path)
        .unwrap();
}

fn sample_sheet() -> PixelBuffer {
    let mut sheet = SheetBuilder::new(40, 20);
    sheet.band(1, 18);
    sheet.add_tile(4, 4, 8, 4, Mask(0b0000_0011), Rgba::new(200, 30, 30, 255));
    sheet.add_tile(20, 4, 9, 6, Mask(0b0000_0100), Rgba::new(30, 30, 200, 255));
    sheet.build()
}

#[test]
fn writes_png_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.png");
    write_png(&sample_sheet(), &input);
    let stem = dir.path().join("atlas");

    Command::cargo_bin("tilepack")
        .unwrap()
        .env_remove("PADDING")
        .arg(&input)
        .arg(&stem)
        .assert()
        .success();

    let atlas = image::open(dir.path().join("atlas.png")).unwrap().into_rgba8();
    assert_eq!(atlas.dimensions(), (512, 512));
    let red = atlas.pixels().filter(|p| p.0 == [200, 30, 30, 255]).count();
    assert_eq!(red, 8 * 4);

    let text = std::fs::read_to_string(dir.path().join("atlas.json")).unwrap();
    assert!(text.ends_with("}\n"));
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["frames"].as_array().unwrap().len(), 2);
    assert_eq!(json["frames"][0]["filename"], "00000011");
    assert_eq!(json["meta"]["app"], "tilepacker");
    assert_eq!(json["meta"]["size"]["w"], 512);
    let tags = json["meta"]["frameTags"].as_array().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[1]["name"], "00000100");
    assert_eq!(tags[1]["from"], 1);
    assert_eq!(tags[1]["to"], 1);
}

#[test]
fn padding_comes_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.png");
    write_png(&sample_sheet(), &input);
    let stem = dir.path().join("padded");

    Command::cargo_bin("tilepack")
        .unwrap()
        .env("PADDING", "3")
        .arg(&input)
        .arg(&stem)
        .assert()
        .success();

    let text = std::fs::read_to_string(dir.path().join("padded.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["frames"][0]["frame"]["w"], 8 + 6);
    assert_eq!(json["frames"][0]["sourceSize"]["h"], 4 + 6);
}

#[test]
fn invalid_padding_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sheet.png");
    write_png(&sample_sheet(), &input);

    Command::cargo_bin("tilepack")
        .unwrap()
        .env("PADDING", "wide")
        .arg(&input)
        .arg(dir.path().join("out"))
        .assert()
        .failure();
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn malformed_sheet_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.png");
    // No line markers.
    write_png(&SheetBuilder::new(32, 16).build(), &input);
    let stem = dir.path().join("out");

    Command::cargo_bin("tilepack")
        .unwrap()
        .env_remove("PADDING")
        .arg(&input)
        .arg(&stem)
        .assert()
        .failure();

    assert!(!dir.path().join("out.png").exists());
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("tilepack")
        .unwrap()
        .arg(dir.path().join("nope.png"))
        .arg(dir.path().join("out"))
        .assert()
        .failure();
}
