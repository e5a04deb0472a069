use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;

const DOC: &str = r#"{
  "vertices": [
    { "id": "a", "width": 40, "height": 20 },
    { "id": "b", "width": 40, "height": 20 },
    { "id": "c", "width": 40, "height": 20 }
  ],
  "edges": [
    { "id": "ab", "source": "a", "target": "b" },
    { "id": "bc", "source": "b", "target": "c" },
    { "id": "ac", "source": "a", "target": "c" }
  ],
  "config": { "interRankCellSpacing": 50 }
}"#;

fn write_doc(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("graph.json");
    fs::write(&path, text).expect("write input");
    path
}

fn run_ok(args: &[&str]) -> serde_json::Value {
    let exe = assert_cmd::cargo_bin!("lamina-cli");
    let output = Command::new(exe).args(args).output().expect("run cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn cli_lays_out_a_json_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_doc(&tmp, DOC);
    let out = run_ok(&[input.to_string_lossy().as_ref()]);

    assert_eq!(out["vertices"]["a"]["y"], 0.0);
    assert_eq!(out["vertices"]["b"]["y"], 70.0);
    assert_eq!(out["vertices"]["c"]["y"], 140.0);
    assert_eq!(out["vertices"]["c"]["width"], 40.0);
    // The long edge gets one waypoint, the short ones none.
    assert_eq!(out["edges"]["ac"].as_array().map(Vec::len), Some(1));
    assert_eq!(out["edges"]["ab"].as_array().map(Vec::len), Some(0));
}

#[test]
fn cli_orientation_flag_overrides_the_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_doc(&tmp, DOC);
    let out = run_ok(&[
        "--pretty",
        "--orientation",
        "west",
        input.to_string_lossy().as_ref(),
    ]);

    assert_eq!(out["vertices"]["a"]["x"], 0.0);
    assert_eq!(out["vertices"]["b"]["x"], 90.0);
    assert_eq!(out["vertices"]["c"]["x"], 180.0);
}

#[test]
fn cli_rejects_bad_usage_with_exit_code_2() {
    let exe = assert_cmd::cargo_bin!("lamina-cli");
    Command::new(exe)
        .args(["--orientation", "up"])
        .assert()
        .failure()
        .code(2);

    let exe = assert_cmd::cargo_bin!("lamina-cli");
    Command::new(exe).args(["--bogus"]).assert().failure().code(2);
}

#[test]
fn cli_reports_layout_errors_with_exit_code_1() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_doc(&tmp, DOC);

    let exe = assert_cmd::cargo_bin!("lamina-cli");
    Command::new(exe)
        .args(["--parent", "missing", input.to_string_lossy().as_ref()])
        .assert()
        .failure()
        .code(1);

    let broken = write_doc(
        &tmp,
        r#"{ "vertices": [{ "id": "a" }], "edges": [{ "id": "e", "source": "a", "target": "z" }] }"#,
    );
    let exe = assert_cmd::cargo_bin!("lamina-cli");
    Command::new(exe)
        .arg(broken.to_string_lossy().as_ref())
        .assert()
        .failure()
        .code(1);
}
