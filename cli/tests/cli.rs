use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn workdir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("scan-cli-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn cli(history: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("scan-cli").unwrap();
    cmd.arg("--history").arg(history);
    cmd
}

#[test]
fn catalog_entry_is_printed() {
    let dir = workdir("vuln");
    cli(&dir.join("history.json"))
        .args(["vuln", "reentrancy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reentrancy Attack"));
}

#[test]
fn unknown_catalog_entry_fails() {
    let dir = workdir("vuln-unknown");
    cli(&dir.join("history.json"))
        .args(["vuln", "flash loan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown vulnerability"));
}

#[test]
fn seeded_history_feeds_stats() {
    let dir = workdir("seed");
    let history = dir.join("history.json");

    cli(&history).arg("seed").assert().success();
    cli(&history)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_scans\": 7"))
        .stdout(predicate::str::contains("\"total_vulnerabilities\": 38"))
        .stdout(predicate::str::contains("\"risk_score\": 54"));
}

#[test]
fn clear_empties_persisted_history() {
    let dir = workdir("clear");
    let history = dir.join("history.json");

    cli(&history).arg("seed").assert().success();
    cli(&history).args(["clear", "--yes"]).assert().success();
    cli(&history)
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_scans\": 0"));
}

#[test]
fn scan_without_target_is_rejected() {
    let dir = workdir("no-target");
    let history = dir.join("history.json");

    cli(&history)
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("contract address"));
    assert!(!history.exists());
}

#[test]
fn simulated_scan_is_recorded() {
    let dir = workdir("scan");
    let history = dir.join("history.json");
    let config = dir.join("config.json");
    std::fs::write(&config, r#"{ "simulated_delay_ms": 10, "progress_tick_ms": 2 }"#).unwrap();

    cli(&history)
        .arg("--config")
        .arg(&config)
        .args(["--network", "polygon", "scan", "--address", "0x71d865673E6c2E112CdED381b38f7A958eA22d39"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&history).unwrap();
    assert!(saved.contains("0x71d865673E6c2E112CdED381b38f7A958eA22d39"));
    assert!(saved.contains("\"network\": \"Polygon\""));
}

#[test]
fn csv_export_round_trips_through_import() {
    let dir = workdir("export");
    let history = dir.join("history.json");
    let imported = dir.join("imported.json");
    let out = dir.join("reports");

    cli(&history).arg("seed").assert().success();
    cli(&history)
        .arg("export")
        .arg("csv")
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    let csv = std::fs::read_dir(&out)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().starts_with("scan-history-"))
                .unwrap_or(false)
        })
        .expect("csv export written");

    cli(&imported)
        .arg("import")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 7 scans"));

    let original: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history).unwrap()).unwrap();
    let restored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&imported).unwrap()).unwrap();
    for (a, b) in original.as_array().unwrap().iter().zip(restored.as_array().unwrap()) {
        assert_eq!(a["target"], b["target"]);
        assert_eq!(a["vulnerabilityCount"], b["vulnerabilityCount"]);
        assert_eq!(a["succeeded"], b["succeeded"]);
    }
}

#[test]
fn html_report_is_written() {
    let dir = workdir("html");
    let history = dir.join("history.json");
    let out = dir.join("reports");

    cli(&history).arg("seed").assert().success();
    cli(&history)
        .arg("export")
        .arg("html")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("vulnerability-report-"));
}
