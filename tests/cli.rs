// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use assert_cmd::prelude::*;
use image::{ColorType, GenericImageView, ImageBuffer, Rgb};
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn sample(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("sample.png");
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(20, 8, |x, y| {
        Rgb([(x * 12) as u8, (y * 30) as u8, ((x * y) % 256) as u8])
    });
    img.save(&path).unwrap();
    path
}

#[test]
fn carves_to_a_file() {
    let dir = TempDir::new().unwrap();
    let input = sample(&dir);
    let output = dir.path().join("narrow.png");
    Command::cargo_bin("incseam")
        .unwrap()
        .arg(&input)
        .args(&["--width", "13", "--verify", "-o"])
        .arg(&output)
        .assert()
        .success();
    let carved = image::open(&output).unwrap().to_rgb();
    assert_eq!(carved.dimensions(), (13, 8));
}

#[test]
fn writes_a_pixmap_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = sample(&dir);
    let out = Command::cargo_bin("incseam")
        .unwrap()
        .arg(&input)
        .args(&["-c", "5"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.starts_with(b"P6"));
    let carved = image::load_from_memory(&out.stdout).unwrap();
    assert_eq!(carved.dimensions(), (15, 8));
}

#[test]
fn dumps_the_carved_colors() {
    let dir = TempDir::new().unwrap();
    let input = sample(&dir);
    Command::cargo_bin("incseam")
        .unwrap()
        .arg(&input)
        .args(&["--width", "3", "--dump", "energy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000.00 1000.00 1000.00"));
}

#[test]
fn energy_map_is_a_graymap() {
    let dir = TempDir::new().unwrap();
    let input = sample(&dir);
    let out = Command::cargo_bin("incseam")
        .unwrap()
        .arg(&input)
        .arg("--energy")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.starts_with(b"P5"));
    let energy = image::load_from_memory(&out.stdout).unwrap();
    assert_eq!(energy.dimensions(), (20, 8));
    assert_eq!(energy.color(), ColorType::Gray(8));
}

#[test]
fn refuses_to_widen() {
    let dir = TempDir::new().unwrap();
    let input = sample(&dir);
    Command::cargo_bin("incseam")
        .unwrap()
        .arg(&input)
        .args(&["--width", "40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot upscale"));
}

#[test]
fn needs_an_amount_to_carve() {
    let dir = TempDir::new().unwrap();
    let input = sample(&dir);
    Command::cargo_bin("incseam")
        .unwrap()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width or --columns"));
}
