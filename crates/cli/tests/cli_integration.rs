//! End-to-end tests of the rumblectl binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn rumblectl() -> Command {
    #[allow(clippy::expect_used)]
    Command::cargo_bin("rumblectl").expect("rumblectl binary builds")
}

#[test]
fn decode_shows_field_breakdown() {
    rumblectl()
        .args(["decode", "0x10701A01"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("0x10701A01")
                .and(predicate::str::contains("fpow"))
                .and(predicate::str::contains("= 7"))
                .and(predicate::str::contains("= 26")),
        );
}

#[test]
fn decode_accepts_decimal() {
    rumblectl()
        .args(["decode", "268435456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x10000000"));
}

#[test]
fn decode_json_is_machine_readable() {
    let output = rumblectl()
        .args(["decode", "0x10701A01", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["success"], true);
    assert_eq!(payload["raw"], "0x10701A01");
    assert_eq!(payload["fields"]["motor"], 1);
    assert_eq!(payload["fields"]["fpow"], 7);
    assert_eq!(payload["fields"]["freq"], 26);
    assert_eq!(payload["fields"]["inc"], 1);
    assert_eq!(payload["warnings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn decode_surfaces_the_inclination_warning() {
    let output = rumblectl()
        .args(["decode", "0x10800000", "--json"])
        .output()
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["warnings"].as_array().map(Vec::len), Some(1));
}

#[test]
fn decode_rejects_garbage() {
    rumblectl()
        .args(["decode", "purupuru"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid command word"));
}

#[test]
fn encode_applies_constraint_normalization() {
    let output = rumblectl()
        .args(["encode", "--bpow", "3", "--fpow", "7", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["fields"]["fpow"], 7);
    assert_eq!(payload["fields"]["bpow"], 0);
}

#[test]
fn encode_defaults_to_the_stop_word() {
    rumblectl()
        .arg("encode")
        .assert()
        .success()
        .stdout(predicate::str::contains("0x10000000"));
}

#[test]
fn encode_rejects_motor_zero() {
    rumblectl()
        .args(["encode", "--motor", "0"])
        .assert()
        .failure();
}

#[test]
fn presets_lists_the_full_catalog() {
    let output = rumblectl().args(["presets", "--json"]).output().unwrap();
    assert!(output.status.success());

    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let presets = payload["presets"].as_array().unwrap();
    assert_eq!(presets.len(), 8);
    assert_eq!(presets[2]["raw"], "0x10701A01");
    assert_eq!(presets[2]["label"], "Basic Thud (simple .5s jolt)");
}

#[test]
fn simulate_quits_cleanly_on_quit_key() {
    rumblectl()
        .arg("simulate")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rumble stopped"));
}

#[test]
fn simulate_send_echoes_the_transmitted_word() {
    rumblectl()
        .arg("simulate")
        .write_stdin("p\ns\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0x10771C80"));
}

#[test]
fn version_flag_works() {
    rumblectl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rumblectl"));
}
