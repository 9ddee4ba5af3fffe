//! Integration tests for aula-cli.
//!
//! Tests invoke the `aula` binary on synthetic impulse responses written to
//! temporary directories.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `aula` binary built by cargo.
fn aula_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_aula"))
}

/// An explicit config keeps the user's own configuration file out of tests.
fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("analysis.toml");
    std::fs::write(&path, body).unwrap();
    path
}

/// Three well-separated bands, 3 s at 22.05 kHz.
fn synth_ir(dir: &Path) -> PathBuf {
    let path = dir.join("ir.wav");
    let output = aula_bin()
        .args(["synth", "--centers", "250,1000,4000", "--t60", "1.2,0.8,0.5"])
        .args(["--duration", "3", "--sample-rate", "22050", "-o"])
        .arg(&path)
        .output()
        .expect("failed to run aula synth");
    assert!(
        output.status.success(),
        "synth failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    path
}

#[test]
fn cli_synth_writes_default_response() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("default.wav");

    let output = aula_bin()
        .args(["synth", "--duration", "0.5", "-o"])
        .arg(&path)
        .output()
        .expect("failed to run aula synth");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("10 bands"), "got: {stdout}");
    assert!(path.exists());
}

#[test]
fn cli_synth_rejects_mismatched_lists() {
    let dir = TempDir::new().unwrap();
    let output = aula_bin()
        .args(["synth", "--centers", "250,1000", "--t60", "1.0", "-o"])
        .arg(dir.path().join("bad.wav"))
        .output()
        .expect("failed to run aula synth");
    assert!(!output.status.success());
}

#[test]
fn cli_analyze_prints_table_and_exports() {
    let dir = TempDir::new().unwrap();
    let ir = synth_ir(dir.path());
    let config = write_config(dir.path(), "integration_limit_secs = 3.0\n");
    let csv = dir.path().join("params.csv");
    let json = dir.path().join("params.json");

    let output = aula_bin()
        .arg("analyze")
        .arg(&ir)
        .arg("--config")
        .arg(&config)
        .arg("--csv")
        .arg(&csv)
        .arg("--json")
        .arg(&json)
        .output()
        .expect("failed to run aula analyze");
    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    for label in ["EDT", "T10", "T20", "T30", "C80", "D50", "broadband", "1000 Hz"] {
        assert!(stdout.contains(label), "missing '{label}' in: {stdout}");
    }
    // 16 kHz cannot exist at 22.05 kHz
    assert!(stdout.contains("Failed bands"));

    let csv_text = std::fs::read_to_string(&csv).unwrap();
    assert!(csv_text.starts_with("parameter,broadband,31.5 Hz"));
    assert!(csv_text.lines().last().unwrap().starts_with("status,"));

    let records: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 11);

    let band_1k = records
        .iter()
        .find(|r| r["center_hz"] == 1000.0)
        .unwrap();
    let t30 = band_1k["t30"].as_f64().unwrap();
    assert!((t30 - 0.8).abs() < 0.08, "T30 at 1 kHz: {t30}");
}

#[test]
fn cli_analyze_flags_override_config() {
    let dir = TempDir::new().unwrap();
    let ir = synth_ir(dir.path());
    let config = write_config(dir.path(), "integration_limit_secs = 3.0\n");

    // A limit longer than the file fails every band but not the command
    let output = aula_bin()
        .arg("analyze")
        .arg(&ir)
        .arg("--config")
        .arg(&config)
        .args(["--limit", "5", "--no-broadband"])
        .output()
        .expect("failed to run aula analyze");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("broadband"));
    assert!(stdout.contains("exceeds signal length"), "got: {stdout}");
}

#[test]
fn cli_analyze_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let ir = synth_ir(dir.path());
    let config = write_config(dir.path(), "smoothing_window = 0\n");

    let output = aula_bin()
        .arg("analyze")
        .arg(&ir)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run aula analyze");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("smoothing_window"));
}

#[test]
fn cli_curves_exports_band() {
    let dir = TempDir::new().unwrap();
    let ir = synth_ir(dir.path());
    let config = write_config(dir.path(), "integration_limit_secs = 2.0\n");
    let out = dir.path().join("curves.csv");

    let output = aula_bin()
        .arg("curves")
        .arg(&ir)
        .args(["--band", "1000", "-o"])
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run aula curves");
    assert!(
        output.status.success(),
        "curves failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1000 Hz band"));
    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("time_s,signal_db,smoothed_db,edc_time_s,edc_db"));
    assert_eq!(text.lines().count(), 3 * 22050 + 1);
}

#[test]
fn cli_curves_rejects_unknown_band() {
    let dir = TempDir::new().unwrap();
    let ir = synth_ir(dir.path());
    let config = write_config(dir.path(), "");

    let output = aula_bin()
        .arg("curves")
        .arg(&ir)
        .args(["--band", "700", "-o"])
        .arg(dir.path().join("x.csv"))
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run aula curves");
    assert!(!output.status.success());
}

#[test]
fn cli_bands_lists_cutoffs() {
    let output = aula_bin()
        .args(["bands", "--sample-rate", "22050"])
        .output()
        .expect("failed to run aula bands");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("31.5"));
    assert!(stdout.contains("707.1"));
    assert!(stdout.contains("11024.0"));
    assert!(stdout.contains("unavailable"));
}

#[cfg(target_os = "linux")]
#[test]
fn cli_analyze_saves_config_for_later_runs() {
    let dir = TempDir::new().unwrap();
    let ir = synth_ir(dir.path());
    let config = write_config(dir.path(), "");
    let config_home = dir.path().join("xdg");

    let output = aula_bin()
        .env("XDG_CONFIG_HOME", &config_home)
        .arg("analyze")
        .arg(&ir)
        .arg("--config")
        .arg(&config)
        .args(["--limit", "2", "--no-broadband", "--save-config"])
        .output()
        .expect("failed to run aula analyze");
    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let saved = config_home.join("aula").join("analysis.toml");
    let text = std::fs::read_to_string(&saved).unwrap();
    assert!(text.contains("integration_limit_secs = 2.0"), "got: {text}");
    assert!(text.contains("include_broadband = false"), "got: {text}");

    // Without --config the saved file is the starting point
    let output = aula_bin()
        .env("XDG_CONFIG_HOME", &config_home)
        .arg("analyze")
        .arg(&ir)
        .output()
        .expect("failed to run aula analyze");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("integration limit 2.000s"), "got: {stdout}");
    assert!(!stdout.contains("broadband"));
}
