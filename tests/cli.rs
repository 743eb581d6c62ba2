//! End-to-end checks for the `verses` binary over temp data trees.

mod common;

use common::{stdout_json, DataFixture};
use serde_json::json;

#[test]
fn load_prints_sparse_chapter_in_order() {
    let fixture = DataFixture::new();
    fixture.write_verse("NT", "Acts", "10", "05.json", r#"{"text":"B"}"#);
    fixture.write_verse("NT", "Acts", "10", "01.json", r#"{"text":"A"}"#);

    let output = fixture.run(&["load", "--book", "Acts", "--chapter", "10"]);

    assert_eq!(
        stdout_json(&output),
        json!([
            { "verse_number": 1, "data": { "text": "A" } },
            { "verse_number": 5, "data": { "text": "B" } }
        ])
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loaded 2 verses for Acts 10"), "stderr: {stderr}");
}

#[test]
fn load_skips_malformed_verse_and_warns() {
    let fixture = DataFixture::new();
    fixture.write_verse("NT", "Acts", "10", "02.json", "{invalid");
    fixture.write_verse("NT", "Acts", "10", "03.json", r#"{"text":"C"}"#);

    let output = fixture.run(&["load"]);

    assert_eq!(
        stdout_json(&output),
        json!([{ "verse_number": 3, "data": { "text": "C" } }])
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("verse 2"), "stderr: {stderr}");
}

#[test]
fn load_with_missing_directory_prints_empty_array() {
    let fixture = DataFixture::new();

    let output = fixture.run(&["load", "--compact"]);

    assert_eq!(stdout_json(&output), json!([]));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}

#[test]
fn load_honors_config_file_and_out_path() {
    let fixture = DataFixture::new();
    fixture.write_verse("OT", "Genesis", "01", "01.json", r#"{"text":"In the beginning"}"#);
    std::fs::write(
        fixture.root().join("verses.json"),
        br#"{ "book": "Genesis", "chapter": 1, "verse_count": 31 }"#,
    )
    .expect("write config");

    let output = fixture.run(&["load", "--out", "site/_data/verses.json"]);

    assert!(output.status.success());
    let written = std::fs::read(fixture.root().join("site/_data/verses.json"))
        .expect("read written collection");
    let value: serde_json::Value = serde_json::from_slice(&written).expect("parse collection");
    assert_eq!(value[0]["verse_number"], json!(1));
    assert_eq!(value[0]["data"]["text"], json!("In the beginning"));
}

#[test]
fn status_json_reports_missing_and_malformed() {
    let fixture = DataFixture::new();
    fixture.write_verse("NT", "Acts", "10", "01.json", r#"{"text":"A"}"#);
    fixture.write_verse("NT", "Acts", "10", "02.json", "{invalid");

    let output = fixture.run(&["status", "--json", "--verse-count", "4"]);

    let report = stdout_json(&output);
    assert_eq!(report["loaded"], json!(1));
    assert_eq!(report["missing"], json!([3, 4]));
    assert_eq!(report["malformed"][0]["verse_number"], json!(2));
    assert_eq!(report["dir_exists"], json!(true));
}

#[test]
fn status_with_missing_directory_lists_every_verse_missing() {
    let fixture = DataFixture::new();

    let output = fixture.run(&["status", "--json", "--verse-count", "3"]);

    let report = stdout_json(&output);
    assert_eq!(report["dir_exists"], json!(false));
    assert_eq!(report["missing"], json!([1, 2, 3]));
    assert_eq!(report["loaded"], json!(0));

    let text = fixture.run(&["status", "--verse-count", "3"]);
    let stdout = String::from_utf8_lossy(&text.stdout);
    assert!(stdout.contains("directory missing"), "stdout: {stdout}");
    assert!(stdout.contains("missing: 1, 2, 3"), "stdout: {stdout}");
}

#[test]
fn status_strict_fails_on_malformed_verse() {
    let fixture = DataFixture::new();
    fixture.write_verse("NT", "Acts", "10", "02.json", "{invalid");

    let output = fixture.run(&["status", "--strict"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed"), "stderr: {stderr}");
}

#[test]
fn write_then_load_round_trips_through_layout() {
    let fixture = DataFixture::new();
    let input = fixture.root().join("verse.json");
    std::fs::write(&input, br#"{"text":"Peter's vision"}"#).expect("write input");

    let write = fixture.run(&[
        "write",
        "--book",
        "Acts",
        "--chapter",
        "10",
        "--verse",
        "9",
        "--input",
        "verse.json",
    ]);
    assert!(
        write.status.success(),
        "write failed: {}",
        String::from_utf8_lossy(&write.stderr)
    );
    assert!(fixture.data_root().join("NT/Acts/10/09.json").is_file());

    let load = fixture.run(&["load"]);
    assert_eq!(
        stdout_json(&load),
        json!([{ "verse_number": 9, "data": { "text": "Peter's vision" } }])
    );
}

#[test]
fn write_rejects_invalid_json_input() {
    let fixture = DataFixture::new();
    std::fs::write(fixture.root().join("bad.json"), b"{nope").expect("write input");

    let output = fixture.run(&["write", "--verse", "1", "--input", "bad.json"]);

    assert!(!output.status.success());
    assert!(!fixture.data_root().join("NT/Acts/10/01.json").exists());
}

#[test]
fn write_rejects_verse_beyond_chapter_verse_count() {
    let fixture = DataFixture::new();
    std::fs::write(fixture.root().join("verse.json"), br#"{"text":"extra"}"#)
        .expect("write input");

    let output = fixture.run(&["write", "--verse", "60", "--input", "verse.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("verse_count"), "stderr: {stderr}");
    assert!(!fixture.data_root().join("NT/Acts/10/60.json").exists());

    let widened = fixture.run(&[
        "write",
        "--verse",
        "60",
        "--verse-count",
        "60",
        "--input",
        "verse.json",
    ]);
    assert!(widened.status.success());
}

#[test]
fn path_prints_layout_locations() {
    let fixture = DataFixture::new();

    let chapter = fixture.run(&["path", "--data-root", "/srv/data", "--book", "1 John", "--chapter", "3"]);
    assert_eq!(
        String::from_utf8_lossy(&chapter.stdout).trim(),
        "/srv/data/NT/1 John/03"
    );

    let verse = fixture.run(&["path", "--data-root", "/srv/data", "--verse", "7"]);
    assert_eq!(
        String::from_utf8_lossy(&verse.stdout).trim(),
        "/srv/data/NT/Acts/10/07.json"
    );
}

#[test]
fn init_writes_default_config_and_refuses_overwrite() {
    let fixture = DataFixture::new();

    let first = fixture.run(&["init"]);
    assert!(first.status.success());
    let config: serde_json::Value = serde_json::from_slice(
        &std::fs::read(fixture.root().join("verses.json")).expect("read config"),
    )
    .expect("parse config");
    assert_eq!(config["book"], json!("Acts"));
    assert_eq!(config["verse_count"], json!(48));

    let second = fixture.run(&["init"]);
    assert!(!second.status.success());

    let forced = fixture.run(&["init", "--force"]);
    assert!(forced.status.success());
}
