//! End-to-end command tests through the parsed CLI.

use clap::Parser;
use lsys_cli::{Cli, run};
use serde_json::Value;

fn exec(args: &[&str]) -> lsys_cli::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("lsys").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out: Vec<u8> = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

fn lines(output: &str) -> Vec<Value> {
    output
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn list_shows_every_builtin() {
    let out = exec(&["list"]).unwrap();
    assert_eq!(out.lines().count(), 9);
    assert!(out.lines().next().unwrap().starts_with("sierpinski"));
    assert!(out.contains("binary-tree"));
}

#[test]
fn inspect_text_report() {
    let out = exec(&["inspect", "koch", "--depth", "2"]).unwrap();
    assert!(out.starts_with("Koch Snowflake (koch)\n"));
    assert!(out.contains("  F -> F+F--F+F\n"));
    assert!(out.contains("alphabet: + - 0 F\n"));
    assert!(out.contains("projected steps: 48\n"));
    assert!(out.contains("transition matrix:\n/"));
}

#[test]
fn inspect_json_report() {
    let out = exec(&["inspect", "hilbert", "--depth", "3", "--json"]).unwrap();
    let report: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["slug"], "hilbert");
    assert_eq!(report["depth"], 3);
    assert_eq!(report["total_steps"], 63);
    assert_eq!(report["drawing_symbols"], serde_json::json!(["F"]));
    assert_eq!(report["transition_matrix"].as_array().unwrap().len(), 5);
}

#[test]
fn draw_emits_one_line_per_segment() {
    let out = exec(&["draw", "sierpinski", "--depth", "3", "--batch", "7"]).unwrap();
    let records = lines(&out);
    assert_eq!(records.len(), 81);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["index"], i as u64);
        assert!(record["color"].as_str().unwrap().starts_with('#'));
    }
    assert_eq!(records[0]["hue"], 0.0);
}

#[test]
fn draw_output_independent_of_batch() {
    let a = exec(&["draw", "dragon", "--depth", "6", "--batch", "1"]).unwrap();
    let b = exec(&["draw", "dragon", "--depth", "6", "--batch", "1000"]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn config_file_with_flag_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draw.json");
    std::fs::write(
        &path,
        r#"{"depth": 1, "width": 10.0, "hue": {"start": 100.0, "end": 200.0}}"#,
    )
    .unwrap();
    let config = path.to_str().unwrap();

    let out = exec(&["draw", "koch-square", "--config", config, "--hue-end", "300"]).unwrap();
    let records = lines(&out);
    assert_eq!(records.len(), 10);
    assert_eq!(records[0]["hue"], 100.0);
    let last = records[9]["hue"].as_f64().unwrap();
    assert!((last - (100.0 + 200.0 * 0.9)).abs() < 1e-9, "{last}");
    for record in &records {
        for key in ["x0", "y0", "x1", "y1"] {
            let v = record[key].as_f64().unwrap();
            assert!((-1e-9..=10.0 + 1e-9).contains(&v), "{key}={v}");
        }
    }
}

#[test]
fn unknown_fractal_exits_with_usage_code() {
    let err = exec(&["draw", "mandelbrot"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("mandelbrot"));
}

#[test]
fn missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let err = exec(&["draw", "koch", "--config", missing.to_str().unwrap()]).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn overflowing_depth_is_reported() {
    let err = exec(&["inspect", "sierpinski", "--depth", "200"]).unwrap_err();
    assert_eq!(err.exit_code(), 3);
}
