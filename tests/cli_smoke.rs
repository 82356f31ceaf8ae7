use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use tempfile::tempdir;

const SAMPLE_CSV: &str = "\
commit,author,datetime,date,time,timezone,file,line,depth,length,type
a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,src/main.js,1,0,40,js
a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,src/main.js,2,1,32,js
b2,Bob,2024-01-02 20:00:00,2024-01-02,20:00:00,+00:00,style.css,1,0,18,css
";

#[test]
fn summary_json_reports_commit_count() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("loc.csv");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let output = Command::cargo_bin("punchcard")
        .unwrap()
        .args(["summary", "--json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["version"], 1);
    assert_eq!(parsed["report"]["commit_count"], 2);
    assert_eq!(parsed["report"]["total_line_count"], 3);
    assert_eq!(parsed["report"]["file_count"], 2);
    assert_eq!(parsed["report"]["most_productive"], "Morning");
}

#[test]
fn summary_until_applies_cutoff() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("loc.csv");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let output = Command::cargo_bin("punchcard")
        .unwrap()
        .args(["summary", "--json", "--until", "2024-01-01"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["report"]["commit_count"], 1);
}

#[test]
fn summary_pretty_runs() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("loc.csv");
    fs::write(&input, SAMPLE_CSV).unwrap();

    Command::cargo_bin("punchcard")
        .unwrap()
        .arg("summary")
        .arg(&input)
        .assert()
        .success();
}

#[test]
fn export_ndjson_emits_one_line_per_commit() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("loc.csv");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let output = Command::cargo_bin("punchcard")
        .unwrap()
        .args(["--repo-url", "https://example.com/repo"])
        .args(["export", "--ndjson"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["commit_id"], "a1");
    assert_eq!(first["total_lines"], 2);
    assert_eq!(first["url"], "https://example.com/repo/commit/a1");
}

#[test]
fn malformed_rows_do_not_fail_the_command() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("loc.csv");
    fs::write(
        &input,
        "commit,author,datetime,date,time,timezone,file,line,depth,length,type\n\
         a1,Alice,2024-01-01 08:00:00,2024-01-01,08:00:00,+00:00,a.js,oops,0,40,js\n\
         b2,Bob,2024-01-02 20:00:00,2024-01-02,20:00:00,+00:00,b.css,1,0,18,css\n",
    )
    .unwrap();

    let output = Command::cargo_bin("punchcard")
        .unwrap()
        .args(["summary", "--json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["report"]["commit_count"], 1);
    assert_eq!(parsed["skipped_rows"], 1);
}

#[test]
fn missing_commit_column_is_an_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("loc.csv");
    fs::write(&input, "author,datetime\nAlice,2024-01-01 08:00:00\n").unwrap();

    Command::cargo_bin("punchcard")
        .unwrap()
        .arg("summary")
        .arg(&input)
        .assert()
        .failure();
}
