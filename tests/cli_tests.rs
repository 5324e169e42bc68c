use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{temp_out, vt, write_script};

#[test]
fn test_replay_to_stdout_is_pure_csv() {
    let script = write_script(
        "replay_stdout",
        &[
            "# drive-through clip",
            "count",
            "meta 300",
            "play",
            "time 125",
            "count",
            "key space",
            "undo",
        ],
    );

    let output = vt()
        .args(["--test", "replay"])
        .arg(&script)
        .output()
        .expect("run replay");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Vehicle#,Counted At,Triggered By,Video Time");
    assert!(lines[1].starts_with("1,"));
    assert!(lines[1].ends_with(",manual-button,02:05"));
}

#[test]
fn test_replay_to_file_then_refuse_overwrite() {
    let script = write_script("replay_file", &["play", "time 3", "count", "count"]);
    let out = temp_out("replay_file", "csv");

    vt().args(["--test", "replay"])
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert_eq!(content.lines().count(), 3);

    // existing file, no --force, "n" on the prompt
    vt().args(["--test", "replay"])
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));

    vt().args(["--test", "replay"])
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn test_replay_json_format() {
    let script = write_script("replay_json", &["play", "count"]);

    vt().args(["--test", "replay", "--format", "json"])
        .arg(&script)
        .assert()
        .success()
        .stdout(contains("\"Vehicle#\": 1").and(contains("\"Triggered By\": \"manual-button\"")));
}

#[test]
fn test_replay_missing_script_fails() {
    vt().args(["--test", "replay", "/definitely/not/here.script"])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}

#[test]
fn test_interactive_session_from_stdin() {
    vt().args(["--test", "session"])
        .write_stdin("count\nplay\ntime 61\ncount\nstatus\nlog\ncsv\nquit\n")
        .assert()
        .success()
        .stdout(
            contains("Play the video to start counting")
                .and(contains("Total Cars Served"))
                .and(contains("Recent Vehicle Log"))
                .and(contains("Vehicle#,Counted At,Triggered By,Video Time")),
        );
}

#[test]
fn test_session_reports_unknown_commands() {
    vt().args(["--test", "session"])
        .write_stdin("dance\nquit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command: dance"));
}

#[test]
fn test_config_print_in_test_mode() {
    vt().args(["--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("count_key: space").and(contains("vehicle_log.csv")));
}

#[test]
fn test_export_dir_override_is_used() {
    let dir = std::env::temp_dir().join("vtally_export_dir_override");
    fs::remove_dir_all(&dir).ok();

    vt().args(["--test", "--export-dir"])
        .arg(&dir)
        .arg("session")
        .write_stdin("play\ncount\nexport\nquit\n")
        .assert()
        .success();

    let content = fs::read_to_string(dir.join("vehicle_log.csv")).expect("default export file");
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_init_in_test_mode_writes_nothing() {
    vt().args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));
}

#[test]
fn test_config_edit_in_test_mode_touches_nothing() {
    vt().args(["--test", "config", "--edit", "--editor", "definitely-not-an-editor"])
        .assert()
        .success()
        .stdout(contains("Test mode").and(contains("not available").not()));
}
