mod common;

use common::{DhsvmConfigProcess, set_value};

#[test]
fn validate_valid_config() {
    let config = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = DhsvmConfigProcess::validate(&config, &[]);
    assert!(
        output.status.success(),
        "validate should succeed for valid config: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("basin.cfg: ok"), "{stdout}");
    assert!(stdout.contains("1 valid, 0 invalid"), "{stdout}");
}

#[test]
fn validate_invalid_value_exit_code_and_message() {
    let config = DhsvmConfigProcess::fixture_path("bad_format.cfg");
    let output = DhsvmConfigProcess::validate(&config, &[]);
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("invalid value for [OPTIONS] FORMAT: 'ASCII'"),
        "{stdout}"
    );
    assert!(stdout.contains("[error 51]"), "{stdout}");
}

#[test]
fn validate_json_output() {
    let good = DhsvmConfigProcess::fixture_path("basin.cfg");
    let bad = DhsvmConfigProcess::fixture_path("mm5_prism_without_qpf.cfg");
    let output = DhsvmConfigProcess::spawn_command(&[
        "validate",
        "--format",
        "json",
        good.to_str().unwrap(),
        bad.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("output should be valid JSON");

    assert_eq!(parsed["summary"]["total"], 2);
    assert_eq!(parsed["summary"]["valid"], 1);
    assert_eq!(parsed["summary"]["invalid"], 1);
    assert_eq!(parsed["files"][0]["valid"], true);
    assert_eq!(parsed["files"][1]["valid"], false);
    let error = parsed["files"][1]["error"].as_str().unwrap();
    assert!(error.contains("[OPTIONS] PRISM"), "{error}");
}

#[test]
fn validate_strict_turns_warnings_into_failures() {
    let config = DhsvmConfigProcess::fixture_path("dynamic_infiltration.cfg");

    let lenient = DhsvmConfigProcess::validate(&config, &["--quiet"]);
    assert!(lenient.status.success());

    let strict = DhsvmConfigProcess::validate(&config, &["--strict", "--quiet"]);
    assert_eq!(strict.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&strict.stdout);
    assert!(stdout.contains("treated as errors"), "{stdout}");
}

#[test]
fn validate_missing_file() {
    let output = DhsvmConfigProcess::spawn_command(&[
        "validate",
        "/tmp/nonexistent_dhsvm_config_test_file.cfg",
    ]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("file not found"), "{stdout}");
}

#[test]
fn validate_reports_parse_error_line() {
    let config = DhsvmConfigProcess::fixture_path("missing_header.cfg");
    let output = DhsvmConfigProcess::validate(&config, &[]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(line 1)"), "{stdout}");
}

#[test]
fn validate_empty_file() {
    let config = DhsvmConfigProcess::fixture_path("empty.cfg");
    let output = DhsvmConfigProcess::validate(&config, &[]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("empty"), "{stdout}");
}

#[test]
fn validate_logs_notices_to_stderr() {
    let config = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = DhsvmConfigProcess::validate(&config, &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("All erosion options are being turned off"),
        "{stderr}"
    );
}

#[test]
fn json_log_format_writes_json_lines() {
    let config = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = DhsvmConfigProcess::validate(&config, &["-v", "--log-format", "json"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    assert!(!lines.is_empty());
    for line in lines {
        let event: serde_json::Value = serde_json::from_str(line)
            .unwrap_or_else(|e| panic!("not a JSON log line ({e}): {line}"));
        assert!(event.get("level").is_some(), "{line}");
    }
}

#[test]
fn quiet_suppresses_logging() {
    let config = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = DhsvmConfigProcess::validate(&config, &["--quiet"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn show_canopy_shading_aborts_with_bare_message() {
    let config = DhsvmConfigProcess::fixture_path("canopy_without_stream_temp.cfg");
    let output = DhsvmConfigProcess::spawn_command(&["show", "--quiet", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(255));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.trim(),
        "Stream temp module must be turned on to allow canopy shading options"
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn validate_canopy_shading_aborts_before_later_files() {
    let canopy = DhsvmConfigProcess::fixture_path("canopy_without_stream_temp.cfg");
    let basin = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = DhsvmConfigProcess::spawn_command(&[
        "validate",
        "--quiet",
        canopy.to_str().unwrap(),
        basin.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(255));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.trim(),
        "Stream temp module must be turned on to allow canopy shading options"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("basin.cfg: ok"), "{stdout}");
}

#[test]
fn validate_non_utf8_file_is_not_reported_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.cfg");
    std::fs::write(&path, b"[OPTIONS]\nFormat = B\xffIN\n").unwrap();

    let output = DhsvmConfigProcess::validate(&path, &[]);
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("input is not valid UTF-8"), "{stdout}");
    assert!(!stdout.contains("file not found"), "{stdout}");
}

#[test]
fn show_invalid_value_uses_error_prefix() {
    let config = DhsvmConfigProcess::fixture_path("bad_format.cfg");
    let output = DhsvmConfigProcess::spawn_command(&["show", "--quiet", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: invalid value for [OPTIONS] FORMAT"), "{stderr}");
}

#[test]
fn show_json_point_run() {
    let config = DhsvmConfigProcess::fixture_path("point.cfg");
    let output = DhsvmConfigProcess::spawn_command(&[
        "show",
        "--quiet",
        "--format",
        "json",
        config.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["options"]["extent"], "point");
    assert_eq!(parsed["options"]["point"]["row"], 90);
    assert_eq!(parsed["options"]["point"]["col"], 5);
    assert_eq!(parsed["options"]["flow_gradient"], "not_applicable");
    assert_eq!(parsed["options"]["has_network"], false);
    assert_eq!(parsed["time"]["step_seconds"], 3600);
    assert_eq!(parsed["time"]["total_steps"], 25);
    assert_eq!(parsed["constants"]["temperature_lapse"], "not_applicable");
    assert_eq!(parsed["constants"]["outside_basin"], 255);
}

#[test]
fn show_yaml_basin_run() {
    let config = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = DhsvmConfigProcess::spawn_command(&[
        "show",
        "--quiet",
        "--format",
        "yaml",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let parsed: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["grid"]["rows"], serde_yaml::Value::from(100));
    assert_eq!(parsed["grid"]["cols"], serde_yaml::Value::from(120));
    assert_eq!(parsed["time"]["total_steps"], serde_yaml::Value::from(2920));
}

#[test]
fn show_human_summary() {
    let config = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = DhsvmConfigProcess::spawn_command(&["show", "--quiet", config.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[OPTIONS]"), "{stdout}");
    assert!(stdout.contains("100 x 120 cells of 90"), "{stdout}");
    assert!(stdout.contains("10800 s (2920 steps)"), "{stdout}");
    assert!(stdout.contains("temperature lapse:   -0.0065"), "{stdout}");
}

#[test]
fn show_reads_file_from_env() {
    let config = DhsvmConfigProcess::fixture_path("basin.cfg");
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_dhsvm-config"))
        .args(["show", "--quiet", "--format", "json"])
        .env("DHSVM_CONFIG", &config)
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn max_value_len_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long_path.cfg");
    let text = DhsvmConfigProcess::fixture_text("basin.cfg");
    let text = set_value(&text, "Coordinate System", &"U".repeat(40));
    std::fs::write(&path, text).unwrap();

    let default_limit = DhsvmConfigProcess::validate(&path, &["--quiet"]);
    assert!(default_limit.status.success());

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_dhsvm-config"))
        .args(["validate", "--quiet", path.to_str().unwrap()])
        .env("DHSVM_MAX_VALUE_LEN", "32")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("COORDINATE SYSTEM"), "{stdout}");
}

#[test]
fn version_json() {
    let output = DhsvmConfigProcess::spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["name"], "dhsvm-config");
    assert_eq!(parsed["schema_keys"], 63);
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let output = DhsvmConfigProcess::spawn_command(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(64));
}
