use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("point-wallet"));
    cmd.arg("tests/fixtures/requests.csv");

    // User 2 overspends once (600 of 500), then uses 200.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("user,point"))
        .stdout(predicate::str::contains("1,70"))
        .stdout(predicate::str::contains("2,300"))
        .stderr(predicate::str::contains("request rejected"));

    Ok(())
}

#[test]
fn test_cli_keeps_per_user_file_order() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, user, amount").unwrap();
    writeln!(file, "charge, 1, 100").unwrap();
    writeln!(file, "use, 1, 100").unwrap();
    writeln!(file, "charge, 1, 5").unwrap();

    // Out of order, the use would either fail or leave a different balance.
    let mut cmd = Command::new(cargo_bin!("point-wallet"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,5"))
        .stderr(predicate::str::contains("request rejected").not());
}

#[test]
fn test_cli_history_out() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, user, amount").unwrap();
    writeln!(file, "charge, 7, 100").unwrap();
    writeln!(file, "use, 7, 30").unwrap();
    writeln!(file, "use, 7, 500").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.csv");

    let mut cmd = Command::new(cargo_bin!("point-wallet"));
    cmd.arg(file.path()).arg("--history-out").arg(&history_path);
    cmd.assert().success().stdout(predicate::str::contains("7,70"));

    let history = std::fs::read_to_string(&history_path).unwrap();
    let lines: Vec<&str> = history.lines().collect();
    // Header plus the two successful mutations; the failed use leaves no entry.
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,user,type,amount,occurred_at");
    assert!(lines[1].starts_with("1,7,CHARGE,100,"));
    assert!(lines[2].starts_with("2,7,USE,30,"));
}

#[test]
fn test_cli_json_output() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, user, amount").unwrap();
    writeln!(file, "charge, 3, 42").unwrap();

    let mut cmd = Command::new(cargo_bin!("point-wallet"));
    cmd.arg(file.path()).arg("--output").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed[0]["user_id"], 3);
    assert_eq!(parsed[0]["point"], 42);
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("point-wallet"));
    cmd.arg("tests/fixtures/does_not_exist.csv");
    cmd.assert().failure();
}
