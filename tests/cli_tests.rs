use regex::Regex;
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn pinchboard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pinchboard"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn test_cli_layout_json() {
    let out = pinchboard(&["layout", "--width", "1280", "--height", "720", "--json"]);
    assert!(out.status.success());

    let layout: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(layout["key_size"], 57);
    assert_eq!(layout["band_top"], 412);
    assert_eq!(layout["rows"].as_array().unwrap().len(), 4);
    assert_eq!(layout["rows"][0][0]["x"], 319);
}

#[test]
fn test_cli_layout_table_lists_every_key() {
    let out = pinchboard(&["layout"]);
    assert!(out.status.success());
    let text = stdout(&out);

    let re = Regex::new(r"\|\s*BACKSPACE\s*\|\s*3\s*\|\s*2\s*\|").unwrap();
    assert!(re.is_match(&text), "missing BACKSPACE row:\n{}", text);
    assert!(text.contains("key 57px"));
}

#[test]
fn test_cli_layout_rejects_invalid_viewport() {
    let out = pinchboard(&["layout", "--width", "0"]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_cli_demo_types_text() {
    let out = pinchboard(&["demo", "--text", "HELLO WORLD", "--seed", "3"]);
    assert!(out.status.success());
    let text = stdout(&out);

    let re = Regex::new(r#"Text: "HELLO WORLD""#).unwrap();
    assert!(re.is_match(&text), "unexpected output:\n{}", text);
    let commits = Regex::new(r"Commits: (\d+)").unwrap();
    let n: u32 = commits.captures(&text).unwrap()[1].parse().unwrap();
    assert_eq!(n, 11);
}

#[test]
fn test_cli_demo_record_then_replay() {
    let dir = TempDir::new().unwrap();
    let trace = dir.path().join("hi.csv");
    let trace_arg = trace.to_str().unwrap();

    let out = pinchboard(&["demo", "--text", "hi", "--record", trace_arg]);
    assert!(out.status.success());
    assert!(trace.exists());
    let header = fs::read_to_string(&trace).unwrap();
    assert!(header.starts_with("t_ms,hand,landmark,x,y"));

    let out = pinchboard(&["replay", "--trace", trace_arg]);
    assert!(out.status.success());
    assert!(stdout(&out).contains(r#"Text: "HI""#));
}

#[test]
fn test_cli_replay_missing_trace_fails() {
    let out = pinchboard(&["replay", "--trace", "/definitely/not/here.csv"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_cli_config_file_and_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pinch.json");
    fs::write(&path, r#"{ "layout": { "margin": 40, "max_key_size": 60 } }"#).unwrap();
    let cfg = path.to_str().unwrap();

    let out = pinchboard(&[
        "layout",
        "--config",
        cfg,
        "--json",
        "--width",
        "2560",
        "--height",
        "1440",
    ]);
    assert!(out.status.success());
    let layout: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(layout["margin"], 40);
    assert_eq!(layout["key_size"], 60);

    let out = pinchboard(&[
        "layout",
        "--config",
        cfg,
        "--json",
        "--margin",
        "10",
        "--width",
        "2560",
        "--height",
        "1440",
    ]);
    let layout: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(layout["margin"], 10);
    assert_eq!(layout["key_size"], 60);
}

#[test]
fn test_cli_validate_small_sweep() {
    let out = pinchboard(&[
        "validate",
        "--min-width",
        "320",
        "--max-width",
        "1280",
        "--min-height",
        "240",
        "--max-height",
        "720",
        "--step",
        "160",
    ]);
    assert!(out.status.success(), "{}", stdout(&out));
    let re = Regex::new(r"Failing\s*\|\s*0").unwrap();
    assert!(re.is_match(&stdout(&out)));
}
