//! CLI integration tests for evmabi-cli
//!
//! Runs the binary with an isolated HOME so configuration never leaks
//! between tests or from the developer's machine.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_evmabi"));
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Run the CLI in a fresh home directory
fn run_evmabi(args: &[&str]) -> Output {
    let home = TempDir::new().unwrap();
    run_in(home.path(), args)
}

fn run_in(home: &Path, args: &[&str]) -> Output {
    command(home)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Invalid JSON")
}

fn word(n: u64) -> String {
    format!("{:064x}", n)
}

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let output = run_evmabi(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["selector", "parse", "encode", "decode", "config"] {
        assert!(text.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_cli_version() {
    let output = run_evmabi(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("evmabi"));
}

// ==================== Selector & Parse Tests ====================

#[test]
fn test_selector_approve() {
    let output = run_evmabi(&["selector", "approve(address, uint256)"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0x095ea7b3  approve(address,uint256)");
}

#[test]
fn test_selector_json() {
    let output = run_evmabi(&["--json", "selector", "aggregate((address,bytes)[])"]);
    assert!(output.status.success());
    let json = json(&output);
    assert_eq!(json["selector"], "0x252dba42");
    assert_eq!(json["signature"], "aggregate((address,bytes)[])");
}

#[test]
fn test_selector_invalid_signature() {
    let output = run_evmabi(&["selector", "transfer(address,uint7)"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
    assert!(stderr.contains("Unrecognized type"));
}

#[test]
fn test_parse_type_json() {
    let output = run_evmabi(&["parse", "--json", "(address, bytes)[2]"]);
    assert!(output.status.success());
    let json = json(&output);
    assert_eq!(json["type"], "(address,bytes)[2]");
    assert_eq!(json["dynamic"], true);
    assert_eq!(json["head_size"], 32);

    let output = run_evmabi(&["--json", "parse", "uint8[3]"]);
    let json = self::json(&output);
    assert_eq!(json["dynamic"], false);
    assert_eq!(json["head_size"], 96);
}

#[test]
fn test_parse_rejects_zero_length() {
    let output = run_evmabi(&["parse", "uint256[0]"]);
    assert!(!output.status.success());
}

// ==================== Encode Tests ====================

#[test]
fn test_encode_baz() {
    let output = run_evmabi(&["encode", "baz(uint32,bool)", "69", "true"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("0xcdcd77c0{}{}", word(0x45), word(1)));
}

#[test]
fn test_encode_string_without_selector() {
    let output = run_evmabi(&["encode", "--no-selector", "f(string)", "test"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!(
            "0x{}{}{}",
            word(0x20),
            word(4),
            "7465737400000000000000000000000000000000000000000000000000000000"
        )
    );
}

#[test]
fn test_encode_negative_int() {
    let output = run_evmabi(&["encode", "--no-selector", "g(int8)", "-1"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output), format!("0x{}", "ff".repeat(32)));
}

#[test]
fn test_encode_multicall_json() {
    let weth = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
    let calls = format!("[({},0x06fdde03),({},0x95d89b41)]", weth, weth);
    let output = run_evmabi(&["--json", "encode", "aggregate((address,bytes)[])", &calls]);
    assert!(output.status.success());

    let json = json(&output);
    assert_eq!(json["selector"], "0x252dba42");
    let data = json["data"].as_str().unwrap();
    assert!(data.starts_with("0x252dba42"));
    // selector + 12 words
    assert_eq!(data.len(), 2 + 8 + 12 * 64);
}

#[test]
fn test_encode_argument_count_mismatch() {
    let output = run_evmabi(&["encode", "transfer(address,uint256)", "0x00"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parameter count mismatch"));
}

#[test]
fn test_encode_out_of_range() {
    let output = run_evmabi(&["encode", "f(uint8)", "256"]);
    assert!(!output.status.success());
}

// ==================== Decode Tests ====================

#[test]
fn test_decode_pair() {
    let data = format!("0x{}{}", word(7), word(1));
    let output = run_evmabi(&["decode", "uint256,bool", &data]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "uint256: 7\nbool: true");
}

#[test]
fn test_decode_json() {
    let data = format!("{}{}{}", word(0x20), word(4), "7465737400000000000000000000000000000000000000000000000000000000");
    let output = run_evmabi(&["--json", "decode", "(string)", &data]);
    assert!(output.status.success());
    let json = json(&output);
    assert_eq!(json["types"], serde_json::json!(["string"]));
    assert_eq!(json["values"], serde_json::json!(["test"]));
}

#[test]
fn test_decode_more_outputs_than_data() {
    let data = format!("0x{}{}", word(7), word(1));
    let output = run_evmabi(&["decode", "uint256,bool,uint256", &data]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Output count mismatch"));
}

#[test]
fn test_decode_from_stdin() {
    let home = TempDir::new().unwrap();
    let mut child = command(home.path())
        .args(["decode", "uint256"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(format!("0x{}\n", word(42)).as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "uint256: 42");
}

#[test]
fn test_decode_legacy_bool_flag() {
    let data = word(28);
    let strict = run_evmabi(&["decode", "bool", &data]);
    assert!(!strict.status.success());

    let legacy = run_evmabi(&["decode", "--legacy-bool", "bool", &data]);
    assert!(legacy.status.success());
    assert_eq!(stdout(&legacy), "bool: true");
}

#[test]
fn test_decode_invalid_hex() {
    let output = run_evmabi(&["decode", "uint256", "0xnothex"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid hex"));
}

#[test]
fn test_error_json_output() {
    let output = run_evmabi(&["--json", "decode", "uint256", "0x01"]);
    assert!(!output.status.success());
    let json = json(&output);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("Truncated data"));
}

// ==================== Config Tests ====================

#[test]
fn test_config_show_defaults() {
    let output = run_evmabi(&["--json", "config", "--show"]);
    assert!(output.status.success());
    let json = json(&output);
    assert_eq!(json["log_level"], "warn");
    assert_eq!(json["bool_decoding"], "strict");
}

#[test]
fn test_config_set_bool_decoding_persists() {
    let home = TempDir::new().unwrap();

    let output = run_in(home.path(), &["config", "--set-bool-decoding", "legacy"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration saved"));
    assert!(home.path().join(".evmabi").join("config.toml").exists());

    let output = run_in(home.path(), &["--json", "config", "--show"]);
    assert_eq!(json(&output)["bool_decoding"], "legacy");

    // decode now accepts legacy words without the flag
    let output = run_in(home.path(), &["decode", "bool", &word(27)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "bool: false");
}

#[test]
fn test_config_set_log_level() {
    let home = TempDir::new().unwrap();

    let output = run_in(home.path(), &["config", "--set-log-level", "debug"]);
    assert!(output.status.success());
    let output = run_in(home.path(), &["--json", "config", "--show"]);
    assert_eq!(json(&output)["log_level"], "debug");

    // debug logs go to stderr, stdout stays clean
    let output = run_in(home.path(), &["selector", "name()"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0x06fdde03  name()");
}

#[test]
fn test_config_rejects_bad_values() {
    let output = run_evmabi(&["config", "--set-log-level", "loud"]);
    assert!(!output.status.success());

    let output = run_evmabi(&["config", "--set-bool-decoding", "lenient"]);
    assert!(!output.status.success());
}
