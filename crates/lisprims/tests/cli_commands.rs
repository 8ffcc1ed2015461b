#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

const RECORDS_JSON: &str = r#"[
    {"kind": "header", "sender_id": "ANALYZER", "timestamp": "2024-05-20T08:15:00"},
    {"kind": "patient", "sequence_number": 2, "laboratory_patient_id": "LAB-7"},
    {"kind": "order", "sequence_number": 3, "specimen_id": "S-1", "universal_test_id": "^^^GLU"},
    {"kind": "result", "sequence_number": 4, "universal_test_id": "^^^GLU", "data_value": "5.4"},
    {"kind": "terminator", "sequence_number": 5}
]"#;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "lisprims-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn lisprims() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lisprims"));
    command
        .env_remove("LISPRIMS_VARIANT")
        .env_remove("LISPRIMS_DEVICE")
        .env_remove("LISPRIMS_LENIENT")
        .arg("--log-level")
        .arg("off");
    command
}

fn run_with_stdin(mut command: Command, stdin: &[u8]) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("command should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should accept input");
    child.wait_with_output().expect("command should finish")
}

fn encode(variant: &str) -> Vec<u8> {
    let mut command = lisprims();
    command.args(["--variant", variant, "encode", "-"]);
    let output = run_with_stdin(command, RECORDS_JSON.as_bytes());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    output.stdout
}

#[test]
fn checksum_prints_json() {
    let output = lisprims()
        .args(["--format", "json", "checksum", "ABC"])
        .output()
        .expect("checksum should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"checksum\":\"C6\""));
}

#[test]
fn checksum_rejects_bad_frame_number() {
    let output = lisprims()
        .args(["--format", "raw", "checksum", "P|1", "--wrap", "8"])
        .output()
        .expect("checksum should run");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn encode_then_decode_session() {
    let raw = encode("session");
    assert_eq!(raw.first(), Some(&0x05));
    assert_eq!(raw.last(), Some(&0x04));

    let mut command = lisprims();
    command.args(["--variant", "session", "--format", "json", "decode", "-"]);
    let output = run_with_stdin(command, &raw);

    assert!(output.status.success());
    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("decode output should be JSON");
    let kinds: Vec<&str> = records
        .as_array()
        .expect("records should be an array")
        .iter()
        .map(|r| r["kind"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(kinds, ["header", "patient", "order", "result", "terminator"]);
    assert_eq!(records[2]["specimen_id"], "S-1");
}

#[test]
fn validate_file_passes() {
    let dir = unique_temp_dir("validate");
    let path = dir.join("capture.bin");
    std::fs::write(&path, encode("session")).expect("capture should be writable");

    let output = lisprims()
        .args(["--variant", "session", "--format", "json", "validate"])
        .arg(&path)
        .output()
        .expect("validate should run");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"valid\":true"));
    assert!(stdout.contains("\"record_count\":5"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn validate_invalid_records_returns_60() {
    let records = r#"[
        {"kind": "header"},
        {"kind": "order", "sequence_number": 2, "specimen_id": "S-1", "universal_test_id": "^^^GLU"},
        {"kind": "terminator", "sequence_number": 3}
    ]"#;

    let mut command = lisprims();
    command.args(["--variant", "session", "--format", "json", "validate", "--records", "-"]);
    let output = run_with_stdin(command, records.as_bytes());

    assert_eq!(output.status.code(), Some(60));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Order record 2 must follow a Patient record"));

    let mut command = lisprims();
    command.args(["--variant", "session", "--lenient", "--format", "json", "validate", "--records", "-"]);
    let output = run_with_stdin(command, records.as_bytes());
    assert!(output.status.success());
}

#[test]
fn corrupted_checksum_returns_60() {
    let mut raw = encode("base");
    let etx = raw
        .iter()
        .position(|b| *b == 0x03)
        .expect("frame should contain ETX");
    raw[etx + 1] = if raw[etx + 1] == b'0' { b'1' } else { b'0' };

    let mut command = lisprims();
    command.args(["--format", "json", "decode", "-"]);
    let output = run_with_stdin(command, &raw);

    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("checksum failure in frame 0"));
}

#[test]
fn missing_input_returns_66() {
    let dir = unique_temp_dir("missing");
    let output = lisprims()
        .arg("decode")
        .arg(dir.join("absent.bin"))
        .output()
        .expect("decode should run");

    assert_eq!(output.status.code(), Some(66));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn version_reports_package_version() {
    let output = lisprims()
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("lisprims {}", env!("CARGO_PKG_VERSION")));
}
