//! Integration test: headless `--dump-layout` run of the binary.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Config that keeps the log file inside the test's scratch directory.
fn scratch_config(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("masonry-feed-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    let config = dir.join("config.toml");
    let log = dir.join("masonry-feed.log");
    fs::write(
        &config,
        format!("log_file_path = {:?}\n", log.display().to_string()),
    )
    .expect("write config");
    config
}

fn run(args: &[&str], name: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_masonry-feed"))
        .arg("--config")
        .arg(scratch_config(name))
        .args(args)
        .env_remove("MASONRY_FEED_STRATEGY")
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn dump_layout_prints_every_article() {
    let output = run(&["--dump-layout", "100", "--total", "30"], "dump");
    assert!(output.status.success(), "{:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["container_width"], 100.0);
    assert_eq!(json["strategy"], "shortest");
    assert_eq!(json["metrics"]["count"], 3);
    assert_eq!(json["items"].as_array().map(Vec::len), Some(30));
    assert_eq!(json["items"][0]["id"], "1");
    assert_eq!(json["items"][0]["y"], 0.0);
}

#[test]
fn dump_layout_respects_strategy_flag() {
    let output = run(
        &["--dump-layout", "100", "--total", "5", "--strategy", "breakpoints"],
        "strategy",
    );
    assert!(output.status.success(), "{:?}", output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["strategy"], "breakpoints");
    let columns: Vec<u64> = json["items"]
        .as_array()
        .expect("items array")
        .iter()
        .filter_map(|item| item["column"].as_u64())
        .collect();
    let count = json["metrics"]["count"].as_u64().expect("column count");
    let expected: Vec<u64> = (0..5).map(|i| i % count).collect();
    assert_eq!(columns, expected);
}

#[test]
fn dump_layout_fails_on_injected_error() {
    let output = run(&["--dump-layout", "80", "--fail-page", "1"], "failure");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulated outage"), "{stderr}");
}

#[test]
fn invalid_config_value_is_rejected() {
    let output = run(&["--dump-layout", "80", "--page-size", "0"], "invalid");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page_size"), "{stderr}");
}
