use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FAULTS_TEST: &str = r#"class EvoMaster_faults_Test(unittest.TestCase):

    def test_0_post_on_adminroute(self):
        res = requests.post(self.baseUrlOfSut + "/api/v1/adminrouteservice/adminroute", json={"stations": []})
        assert res.status_code == 400

    def test_1_get_on_root(self):
        res = requests.get(self.baseUrlOfSut + "/")
"#;

fn tests_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("EvoMaster_faults_Test.py"), FAULTS_TEST).unwrap();
    dir
}

fn faultscope() -> Command {
    let mut cmd = Command::cargo_bin("faultscope").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("FAULTSCOPE_PROXIMITY_WINDOW")
        .env_remove("FAULTSCOPE_INDICATORS")
        .env_remove("FAULTSCOPE_CASE_PREFIX");
    cmd
}

#[test]
fn test_analyze_writes_report() {
    let tests = tests_folder();
    let out_dir = TempDir::new().unwrap();
    let report = out_dir.path().join("report.log");

    faultscope()
        .arg(tests.path())
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("FAULT DETECTION SUMMARY REPORT"))
        .stdout(predicate::str::contains("Report saved to:"))
        .stdout(predicate::str::contains("Final Detection Rate: 2/10 (20.0%)"));

    let content = fs::read_to_string(&report).unwrap();
    assert!(content.contains("DETECTED FAULTS (2)"));
    assert!(content.contains("1. INSUFFICIENT_STATIONS_FAULT"));
    assert!(content.contains("2. INVALID_STATION_NAME_LENGTH_FAULT"));
    assert!(content.contains("     Test Method: test_0_post_on_adminroute"));
    assert!(content.contains("     API Path:    /api/v1/adminrouteservice/adminroute"));
    assert!(content.contains("Total Test Cases:   2"));
    assert!(content.ends_with("END OF REPORT\n================================================================================"));
}

#[test]
fn test_missing_folder_fails_without_report() {
    let out_dir = TempDir::new().unwrap();
    let report = out_dir.path().join("report.log");

    faultscope()
        .arg(out_dir.path().join("does_not_exist"))
        .arg(&report)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Test folder not found"));

    assert!(!report.exists());
}

#[test]
fn test_json_format() {
    let tests = tests_folder();
    let out_dir = TempDir::new().unwrap();
    let report = out_dir.path().join("report.json");

    faultscope()
        .arg(tests.path())
        .arg(&report)
        .args(["--format", "json"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["summary"]["detected"], 2);
    assert_eq!(value["summary"]["total"], 10);
    assert!(value["detections"]["INSUFFICIENT_STATIONS_FAULT"].is_array());
}

#[test]
fn test_config_file_and_env_override() {
    let tests = tests_folder();
    let out_dir = TempDir::new().unwrap();
    let config = out_dir.path().join("faultscope.yaml");
    fs::write(&config, "proximity_indicators:\n  - \"status_code == 418\"\n").unwrap();

    faultscope()
        .arg(tests.path())
        .arg(out_dir.path().join("a.log"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Final Detection Rate: 0/10 (0.0%)"));

    faultscope()
        .env("FAULTSCOPE_INDICATORS", "400")
        .arg(tests.path())
        .arg(out_dir.path().join("b.log"))
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Final Detection Rate: 2/10 (20.0%)"));
}

#[test]
fn test_custom_catalog() {
    let tests = tests_folder();
    let out_dir = TempDir::new().unwrap();
    let catalog = out_dir.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"[{"faultName": "INSUFFICIENT_STATIONS_FAULT", "service": "ts-admin-route-service",
            "api": ["POST /api/v1/adminrouteservice/adminroute"], "description": "Too few stations"}]"#,
    )
    .unwrap();

    faultscope()
        .arg(tests.path())
        .arg(out_dir.path().join("report.log"))
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("Final Detection Rate: 1/1 (100.0%)"))
        .stdout(predicate::str::contains("All injected faults were detected! Excellent coverage."));
}
