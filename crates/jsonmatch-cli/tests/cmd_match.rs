//! Integration tests for `jsonmatch match`.
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Path to the compiled `jsonmatch` binary.
fn jsonmatch_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe is something like …/deps/cmd_match-<hash>
    // The binary lives in the parent directory.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("jsonmatch");
    path
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write fixture");
}

fn run_match(dir: &Path, extra_args: &[&str]) -> std::process::Output {
    Command::new(jsonmatch_bin())
        .arg("match")
        .arg(dir)
        .args(extra_args)
        .output()
        .expect("run jsonmatch match")
}

fn parse_groups(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn identical_components_form_one_group() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.json", r#"{"components": [{"a": 1}]}"#);
    write(dir.path(), "b.json", r#"{"components": [{"a": 1}]}"#);

    let out = run_match(dir.path(), &[]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let groups = parse_groups(&out);
    let groups = groups.as_array().expect("array of groups");
    assert_eq!(groups.len(), 1);
    let group = groups[0].as_array().expect("group members");
    assert_eq!(group.len(), 2);
    assert_eq!(group[0]["cost"], 0.0);
    assert_eq!(group[0]["name"], "a.json");
    assert_eq!(group[1]["name"], "b.json");
}

#[test]
fn empty_directory_prints_empty_groups() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = run_match(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(0));
    let groups = parse_groups(&out);
    assert_eq!(groups, serde_json::json!([]));
}

#[test]
fn malformed_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.json", r#"{"components": [{"a": 1}]}"#);
    write(dir.path(), "b.json", r#"{"components": [{"a": 1}]}"#);
    write(dir.path(), "broken.json", "{oops");

    let out = run_match(dir.path(), &[]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let groups = parse_groups(&out);
    assert_eq!(groups.as_array().expect("groups").len(), 1);
}

#[test]
fn missing_directory_exits_2() {
    let out = Command::new(jsonmatch_bin())
        .args(["match", "/definitely/not/here"])
        .output()
        .expect("run jsonmatch match");
    assert_eq!(out.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&out.stderr).contains("not a directory"),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn all_pairs_strategy_chains_transitively() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.json", r#"{"components": [{"name": "x", "v": 1}]}"#);
    write(dir.path(), "b.json", r#"{"components": [{"name": "x"}]}"#);
    write(dir.path(), "c.json", r#"{"components": [{"name": "y"}]}"#);

    let out = run_match(
        dir.path(),
        &["--strategy", "all-pairs", "--cost-thresh", "2"],
    );
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let groups = parse_groups(&out);
    let groups = groups.as_array().expect("groups");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].as_array().expect("members").len(), 3);
}

#[test]
fn cost_thresh_zero_drops_near_matches() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.json", r#"{"components": [{"a": 1}]}"#);
    write(dir.path(), "b.json", r#"{"components": [{"a": 2}]}"#);

    let out = run_match(dir.path(), &["--cost-thresh", "0"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(parse_groups(&out), serde_json::json!([]));
}

#[test]
fn text_aware_flag_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.json", r#"{"components": [{"name": "zlib"}]}"#);
    write(dir.path(), "b.json", r#"{"components": [{"name": "zlib"}]}"#);

    let out = run_match(dir.path(), &["--text-aware"]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert_eq!(parse_groups(&out).as_array().expect("groups").len(), 1);
}

#[test]
fn sort_keys_flag_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "a.json", r#"{"components": [{"b": 1, "a": 2}]}"#);
    write(dir.path(), "b.json", r#"{"components": [{"a": 2, "b": 1}]}"#);

    let out = run_match(dir.path(), &["--sort-keys"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(parse_groups(&out).as_array().expect("groups").len(), 1);
}
