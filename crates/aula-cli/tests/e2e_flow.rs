//! End-to-end flows: answer capture through review, content blocks
//! through the lesson page, and offline speech synthesis.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn aula() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("aula").unwrap();
    cmd.env_remove("AULA_ELEVENLABS_KEY")
        .env_remove("AULA_PEXELS_KEY")
        .env_remove("ELEVENLABS_API_KEY")
        .env_remove("PEXELS_API_KEY");
    cmd
}

fn initialized_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

fn submit_answer(dir: &TempDir, exercise: &str, text: &str) {
    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args([
            "answer",
            "--unit",
            "1",
            "--session",
            "S1",
            "--hour",
            "H1",
            "--exercise",
            exercise,
            "--email",
            "ana@example.com",
            "--name",
            "Ana",
            "--text",
            text,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved. Thank you, Ana!"));
}

#[test]
fn answer_then_review_roundtrip() {
    let dir = initialized_dir();

    submit_answer(&dir, "grammar", "I get up at 7.");

    // The CSV has a header and exactly one row
    let csv = std::fs::read_to_string(dir.path().join("data/responses.csv")).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv
        .lines()
        .next()
        .unwrap()
        .starts_with("timestamp,user_email,user_name"));

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("AULA_ADMIN_SECRET", "test-secret")
        .args([
            "review",
            "--session",
            "S1",
            "--exercise",
            "grammar",
            "--secret",
            "test-secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("I get up at 7."))
        .stdout(predicate::str::contains("ana@example.com"))
        .stdout(predicate::str::contains("1 answers"));
}

#[test]
fn review_filters_by_exercise() {
    let dir = initialized_dir();

    submit_answer(&dir, "grammar", "I get up at 7.");
    submit_answer(&dir, "writing", "Dear Tom, ...");

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("AULA_ADMIN_SECRET", "test-secret")
        .args([
            "review",
            "--exercise",
            "grammar",
            "--secret",
            "test-secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("I get up at 7."))
        .stdout(predicate::str::contains("1 answers"))
        .stdout(predicate::str::contains("Dear Tom").not());
}

#[test]
fn multiline_answer_survives_the_log() {
    let dir = initialized_dir();

    submit_answer(&dir, "writing", "First line.\nSecond line.");

    // The stored row stays on one line thanks to the escape
    let csv = std::fs::read_to_string(dir.path().join("data/responses.csv")).unwrap();
    assert_eq!(csv.lines().count(), 2);

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("AULA_ADMIN_SECRET", "test-secret")
        .args(["review", "--secret", "test-secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First line. Second line."));
}

#[test]
fn review_html_export() {
    let dir = initialized_dir();

    submit_answer(&dir, "grammar", "I get up at 7.");

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("AULA_ADMIN_SECRET", "test-secret")
        .args([
            "review",
            "--format",
            "html",
            "--output",
            "exports/review.html",
            "--secret",
            "test-secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Review saved to:"));

    let html = std::fs::read_to_string(dir.path().join("exports/review.html")).unwrap();
    assert!(html.contains("I get up at 7."));
    assert!(html.contains("ana@example.com"));
}

#[test]
fn content_block_roundtrip_via_lesson_page() {
    let dir = initialized_dir();

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("AULA_ADMIN_SECRET", "test-secret")
        .args([
            "content",
            "set",
            "--unit",
            "2",
            "--class",
            "1",
            "--key",
            "dialogue",
            "--text",
            "A: What time do you get up?\nB: At seven, usually.",
            "--secret",
            "test-secret",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved content block to:"));

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["content", "get", "--unit", "2", "--class", "1", "--key", "dialogue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B: At seven, usually."));

    // The lesson page picks the block up; the script slot is still empty
    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["page", "lesson", "--unit", "2", "--class", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit 2, class 1: Daily Life"))
        .stdout(predicate::str::contains("What time do you get up?"))
        .stdout(predicate::str::contains("--- script --- (not added yet)"));
}

#[test]
fn content_set_overwrites() {
    let dir = initialized_dir();
    let set = |text: &str| {
        aula()
            .current_dir(dir.path())
            .env("HOME", dir.path())
            .env("AULA_ADMIN_SECRET", "test-secret")
            .args([
                "content", "set", "--unit", "1", "--class", "1", "--key", "script", "--text",
                text, "--secret", "test-secret",
            ])
            .assert()
            .success();
    };

    set("first version");
    set("second version");

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["content", "get", "--unit", "1", "--class", "1", "--key", "script"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second version"))
        .stdout(predicate::str::contains("first version").not());
}

#[test]
fn speak_with_the_mock_provider() {
    let dir = initialized_dir();

    // Point the config at the offline synthesizer
    std::fs::write(
        dir.path().join("aula.toml"),
        r#"
data_dir = "./data"
course_file = "./course/a2-elementary.toml"
speech_provider = "mock"

[providers.mock]
type = "mock"
"#,
    )
    .unwrap();

    aula()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args(["speak", "--text", "Good morning, class!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Audio saved to:"));

    let clips: Vec<_> = std::fs::read_dir(dir.path().join("data/audio"))
        .unwrap()
        .collect();
    assert_eq!(clips.len(), 1);
}
