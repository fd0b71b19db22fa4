//! Cassette replay integration tests — zero network I/O.
//!
//! All tests set `STOCKPROMPT_REPLAY` to a cassette file path so that the
//! binary never contacts a live API endpoint.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

/// The fixed style phrase every canned prompt ends with.
const STYLE_PHRASE: &str = "hyper-realistic, 8k resolution, cinematic lighting, \
     photorealistic, highly detailed, shallow depth of field, \
     commercial stock photography, shot on a 35mm lens";

fn cmd(cassette: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stockprompt").unwrap();
    cmd.env("STOCKPROMPT_REPLAY", cassette.to_str().unwrap())
        .env("STOCKPROMPT_CONFIG", "/nonexistent/stockprompt.toml")
        .env_remove("OPENAI_API_KEY")
        .env_remove("STOCKPROMPT_REC");
    cmd
}

/// Absolute path to the `test_fixtures` directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures")
}

/// Write a 1×1 JPEG reference image under the given directory.
fn write_test_jpeg(dir: &Path, name: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    let img = image::DynamicImage::new_rgb8(1, 1);
    img.save_with_format(&path, image::ImageFormat::Jpeg).unwrap();
    path
}

#[test]
fn generate_two_images_yields_distinct_records() {
    let dir = std::env::temp_dir().join("stockprompt_test_pair");
    let finance = write_test_jpeg(&dir, "finance.jpg");
    let spa = write_test_jpeg(&dir, "spa.jpg");

    let assert = cmd(&fixtures_dir().join("generate_pair.cassette.yaml"))
        .args(["generate", finance.to_str().unwrap(), spa.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("# finance.jpg"))
        .stdout(predicate::str::contains("# spa.jpg"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let (first, second) = stdout.split_once("# spa.jpg").unwrap();
    // Finance keywords only in the first record, spa keywords only in the second
    assert!(first.contains("growth chart"));
    assert!(!first.contains("spa stones"));
    assert!(second.contains("spa stones"));
    assert!(!second.contains("growth chart"));
    // Both records carry the fixed style phrase
    assert!(first.contains(STYLE_PHRASE));
    assert!(second.contains(STYLE_PHRASE));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn duplicate_image_is_generated_once() {
    // The cassette for this test holds two interactions, but passing the same
    // image twice must consume only one: the second occurrence is an
    // idempotent skip. If a second call were made, the output would contain
    // the spa record too.
    let dir = std::env::temp_dir().join("stockprompt_test_dup");
    let img = write_test_jpeg(&dir, "office.jpg");

    cmd(&fixtures_dir().join("generate_pair.cassette.yaml"))
        .args(["generate", img.to_str().unwrap(), img.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("growth chart"))
        .stdout(predicate::str::contains("spa stones").not());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn refine_prints_rewritten_prompt() {
    cmd(&fixtures_dir().join("refine_golden_hour.cassette.yaml"))
        .args([
            "refine",
            "-p",
            "A confident corporate team reviewing a growth chart at noon.",
            "change lighting to golden hour",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("golden hour"))
        .stdout(predicate::str::contains(STYLE_PHRASE));
}

#[test]
fn failed_call_renders_inline_error_and_exits_cleanly() {
    // A per-image endpoint failure becomes that image's record; the run as a
    // whole still succeeds.
    let dir = std::env::temp_dir().join("stockprompt_test_err");
    let img = write_test_jpeg(&dir, "office.jpg");

    cmd(&fixtures_dir().join("rate_limited.cassette.yaml"))
        .args(["generate", img.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("# office.jpg"))
        .stdout(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("rate limited"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_image_is_skipped_with_warning() {
    let dir = std::env::temp_dir().join("stockprompt_test_unreadable");
    let good = write_test_jpeg(&dir, "office.jpg");
    let bad = dir.join("not-an-image.jpg");
    std::fs::write(&bad, "plain text").unwrap();

    cmd(&fixtures_dir().join("generate_pair.cassette.yaml"))
        .args(["generate", bad.to_str().unwrap(), good.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: skipping"))
        .stdout(predicate::str::contains("# office.jpg"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn output_dir_writes_one_prompt_file_per_image() {
    let dir = std::env::temp_dir().join("stockprompt_test_outdir");
    let _ = std::fs::remove_dir_all(&dir);
    let finance = write_test_jpeg(&dir, "finance.jpg");
    let spa = write_test_jpeg(&dir, "spa.jpg");
    let out = dir.join("prompts");

    cmd(&fixtures_dir().join("generate_pair.cassette.yaml"))
        .args([
            "generate",
            "--output-dir",
            out.to_str().unwrap(),
            finance.to_str().unwrap(),
            spa.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:"));

    let finance_prompt = std::fs::read_to_string(out.join("finance.prompt.txt")).unwrap();
    let spa_prompt = std::fs::read_to_string(out.join("spa.prompt.txt")).unwrap();
    assert!(finance_prompt.contains("growth chart"));
    assert!(spa_prompt.contains("spa stones"));

    let _ = std::fs::remove_dir_all(&dir);
}
