use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const CID: &str = "00112233-4455-6677-8899-aabbccddeeff";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("e131"))
}

fn stdout_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8(output.to_vec())
        .expect("utf8 stdout")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn help_lists_encode_commands() {
    cmd()
        .arg("encode")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("data").and(contains("sync")).and(contains("discovery")));
}

#[test]
fn data_hex_to_stdout() {
    let assert = cmd()
        .args(["encode", "data", "--universe", "1", "--fill", "255"])
        .args(["--channel", "1=0", "--cid", CID, "--name", "cli", "--stdout"])
        .assert()
        .success();
    let lines = stdout_lines(&assert.get_output().stdout);
    assert_eq!(lines.len(), 1);

    let hex = &lines[0];
    assert_eq!(hex.len(), 638 * 2);
    assert!(hex.starts_with("001000004153432d45312e3137000000"));
    // CID at bytes 22..38.
    assert_eq!(&hex[44..76], "00112233445566778899aabbccddeeff");
    // Channel 1 overridden, channel 2 keeps the fill value.
    assert_eq!(&hex[252..256], "00ff");
}

#[test]
fn sync_binary_output() {
    let temp = TempDir::new().expect("tempdir");
    let out = temp.path().join("nested").join("sync.bin");

    cmd()
        .args(["encode", "sync", "--sync-address", "7", "--sequence", "42"])
        .args(["--format", "bin", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(contains("OK:"));

    let bytes = fs::read(&out).expect("read output");
    assert_eq!(bytes.len(), 49);
    assert_eq!(bytes[44], 42);
    assert_eq!(&bytes[45..47], &[0, 7]);
}

#[test]
fn discovery_paginates_in_hex() {
    let universes = (1..=600).map(|u| u.to_string()).collect::<Vec<_>>().join(",");
    let assert = cmd()
        .args(["encode", "discovery", "--universes", &universes, "--stdout"])
        .assert()
        .success();
    let lines = stdout_lines(&assert.get_output().stdout);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].len(), (120 + 512 * 2) * 2);
    assert_eq!(lines[1].len(), (120 + 88 * 2) * 2);
}

#[test]
fn discovery_binary_rejects_multiple_pages() {
    let universes = (1..=600).map(|u| u.to_string()).collect::<Vec<_>>().join(",");
    cmd()
        .args(["encode", "discovery", "--universes", &universes])
        .args(["--format", "bin", "--stdout"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn pcapng_capture_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let out = temp.path().join("data.pcapng");

    cmd()
        .args(["encode", "data", "--universe", "2", "--format", "pcapng", "--quiet", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stderr(contains("OK:").not());

    let bytes = fs::read(&out).expect("read capture");
    assert_eq!(&bytes[..4], &[0x0A, 0x0D, 0x0D, 0x0A]);
}

#[test]
fn pcapng_refuses_stdout() {
    cmd()
        .args(["encode", "sync", "--sync-address", "1", "--format", "pcapng", "--stdout"])
        .assert()
        .failure()
        .stderr(contains("pcapng output cannot be written to stdout"));
}

#[test]
fn invalid_universe_shows_hint() {
    cmd()
        .args(["encode", "data", "--universe", "64000", "--stdout"])
        .assert()
        .failure()
        .stderr(contains("invalid universe").and(contains("hint:")));
}

#[test]
fn invalid_priority_is_rejected() {
    cmd()
        .args(["encode", "sync", "--sync-address", "1", "--priority", "-1", "--stdout"])
        .assert()
        .failure()
        .stderr(contains("priority out of range"));
}

#[test]
fn sync_address_zero_is_rejected() {
    cmd()
        .args(["encode", "sync", "--sync-address", "0", "--stdout"])
        .assert()
        .code(2)
        .stderr(contains("invalid synchronization address: 0").and(contains("hint:")));
}

#[test]
fn config_file_sets_identity() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("identity.json");
    fs::write(
        &config,
        format!(r#"{{"source_name": "from-config", "priority": 150, "cid": "{CID}"}}"#),
    )
    .expect("write config");

    let assert = cmd()
        .args(["encode", "data", "--universe", "1", "--stdout", "--config"])
        .arg(&config)
        .assert()
        .success();
    let lines = stdout_lines(&assert.get_output().stdout);
    let hex = &lines[0];
    // "from-config" at byte 44, priority at byte 108.
    assert_eq!(&hex[88..110], "66726f6d2d636f6e666967");
    assert_eq!(&hex[216..218], "96");
}

#[test]
fn missing_output_is_reported_by_clap() {
    cmd()
        .args(["encode", "sync", "--sync-address", "1"])
        .assert()
        .failure()
        .stderr(contains("--output"));
}
