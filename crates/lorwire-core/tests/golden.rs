use std::fs;
use std::path::{Path, PathBuf};

use lorwire_core::{SourceConfig, describe_batch, encode_all, load_request_file, to_hex};

fn case_dir(dir: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(dir)
}

fn load_expected_hex(dir: &str) -> String {
    let expected_path = case_dir(dir).join("expected.hex");
    fs::read_to_string(&expected_path)
        .expect("read expected.hex")
        .trim()
        .to_string()
}

fn run_golden(dir: &str) {
    let input = case_dir(dir).join("requests.json");
    let expected = load_expected_hex(dir);

    let requests = load_request_file(&input, &SourceConfig::default()).expect("load requests");
    let actual = to_hex(&encode_all(&requests));

    assert_eq!(actual, expected, "golden mismatch in {dir}");
}

#[test]
fn golden_examples() {
    run_golden("tests/golden/examples");
}

#[test]
fn golden_multipart() {
    run_golden("tests/golden/multipart");
}

#[test]
fn golden_fade_durations() {
    run_golden("tests/golden/fade_durations");
}

#[test]
fn golden_multipart_drops_shifted_bits() {
    let input = case_dir("tests/golden/multipart").join("requests.json");
    let requests = load_request_file(&input, &SourceConfig::default()).expect("load requests");
    let report = describe_batch(&requests);
    assert_eq!(report.frames[1].format, "multipart");
    assert_eq!(report.frames[1].hex, "0005574200");
}

#[test]
fn golden_fade_durations_has_max_frame() {
    let input = case_dir("tests/golden/fade_durations").join("requests.json");
    let requests = load_request_file(&input, &SourceConfig::default()).expect("load requests");
    let report = describe_batch(&requests);
    assert_eq!(report.frames[0].len, 11);
    assert_eq!(report.frames[0].format, "bits16");
}
