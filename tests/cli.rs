use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Working directory holding `directories/left` and `directories/right`
fn workspace() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir_all(dir.path().join("directories/left")).unwrap();
    fs::create_dir_all(dir.path().join("directories/right")).unwrap();
    dir
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join("directories").join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn csvtreediff(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("csvtreediff").expect("binary built");
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

#[test]
fn identical_trees_report_success() {
    let ws = workspace();
    write(ws.path(), "left/a.csv", "id,name\n1,\"Smith, J\"\n");
    write(ws.path(), "right/a.csv", "id,name\n1,\"Smith, J\"\n");

    csvtreediff(ws.path())
        .args(["left", "right"])
        .assert()
        .success()
        .stdout("✅ All CSV files are identical between the two directories.\n");
}

#[test]
fn differences_are_listed_with_exit_zero() {
    let ws = workspace();
    write(ws.path(), "left/a.csv", "1\n2\n3\n");
    write(ws.path(), "right/a.csv", "1\n2\n3\n4\n");
    write(ws.path(), "left/only.csv", "x\n");

    csvtreediff(ws.path())
        .args(["left/", "right"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("❌ Found 2 differences:\n\n"))
        .stdout(predicate::str::contains(
            "- Row count mismatch in a.csv: 3 vs 4 rows\n",
        ))
        .stdout(predicate::str::contains(
            "- File missing in second directory: directories/right/only.csv\n",
        ));
}

#[test]
fn strict_ordering_flag_switches_mode() {
    let ws = workspace();
    write(ws.path(), "left/a.csv", "1,a\n2,b\n");
    write(ws.path(), "right/a.csv", "2,b\n1,a\n");

    csvtreediff(ws.path())
        .args(["left", "right"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identical"));

    csvtreediff(ws.path())
        .args(["left", "right", "--strict-ordering"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Found 4 differences:"))
        .stdout(predicate::str::contains(
            "- Value mismatch in a.csv, row 1, column 2: 'a' vs 'b'",
        ));
}

#[test]
fn non_csv_files_are_not_compared() {
    let ws = workspace();
    write(ws.path(), "left/readme.txt", "one");
    write(ws.path(), "right/readme.txt", "two");

    csvtreediff(ws.path())
        .args(["left", "right"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identical"));
}

#[test]
fn missing_directory_is_an_error() {
    let ws = workspace();

    csvtreediff(ws.path())
        .args(["left", "nope"])
        .assert()
        .code(1)
        .stdout("Error: Second directory not found: directories/nope\n");
}

#[test]
fn wrong_argument_count_prints_usage() {
    let ws = workspace();

    csvtreediff(ws.path())
        .arg("left")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage:"));

    csvtreediff(ws.path())
        .args(["left", "right", "extra"])
        .assert()
        .code(1);
}

#[test]
fn fail_on_diff_sets_exit_code() {
    let ws = workspace();
    write(ws.path(), "right/new.csv", "1\n");

    csvtreediff(ws.path())
        .args(["left", "right", "--fail-on-diff"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "- File missing in first directory: directories/left/new.csv",
        ));
}

#[test]
fn base_dir_option() {
    let ws = workspace();
    let other = TempDir::new().unwrap();
    fs::create_dir(other.path().join("x")).unwrap();
    fs::create_dir(other.path().join("y")).unwrap();

    csvtreediff(ws.path())
        .arg("--base-dir")
        .arg(other.path())
        .args(["x", "y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identical"));
}

#[test]
fn json_report() {
    let ws = workspace();
    write(ws.path(), "left/a.csv", "1,x\n");
    write(ws.path(), "right/a.csv", "1,y\n");

    let output = csvtreediff(ws.path())
        .args(["left", "right", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "hash_based");
    assert_eq!(report["difference_count"], 2);
    assert_eq!(report["differences"][0]["kind"], "row_missing_in_second_file");
    assert_eq!(report["differences"][1]["kind"], "row_missing_in_first_file");
    assert_eq!(report["stats"]["files_compared"], 1);
}

#[test]
fn verify_rows_catches_fingerprint_collisions() {
    let ws = workspace();
    write(ws.path(), "left/a.csv", "\"a|b\",c\n");
    write(ws.path(), "right/a.csv", "a,\"b|c\"\n");

    csvtreediff(ws.path())
        .args(["left", "right"])
        .assert()
        .success()
        .stdout(predicate::str::contains("identical"));

    csvtreediff(ws.path())
        .args(["left", "right", "--verify-rows"])
        .assert()
        .success()
        .stdout(predicate::str::contains("❌ Found 2 differences:"));
}
