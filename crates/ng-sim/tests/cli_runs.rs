use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn ng_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ng-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn ng-sim")
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write fixture");
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).expect("read output")).expect("parse output")
}

#[test]
fn construct_writes_a_matrix_with_the_requested_margins() {
    let dir = tempdir().unwrap();
    let instance = dir.path().join("instance.json");
    write(
        &instance,
        r#"{"out_degree": [2, 0], "in_degree": [1, 1], "fixed": [[0, 0], [0, 0]]}"#,
    );
    let out = dir.path().join("matrix.json");

    let output = ng_sim(&[
        "construct",
        "--in",
        instance.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(read_json(&out), serde_json::json!([[1, 1], [0, 0]]));
}

#[test]
fn construct_prints_to_stdout_without_out() {
    let dir = tempdir().unwrap();
    let instance = dir.path().join("instance.json");
    write(&instance, r#"{"out_degree": [1, 1], "in_degree": [1, 1]}"#);

    let output = ng_sim(&["construct", "--in", instance.to_str().unwrap(), "--loopless"]);
    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, serde_json::json!([[0, 1], [1, 0]]));
}

#[test]
fn infeasible_instances_fail() {
    let dir = tempdir().unwrap();
    let instance = dir.path().join("instance.json");
    write(&instance, r#"{"out_degree": [1], "in_degree": [2]}"#);

    let output = ng_sim(&["construct", "--in", instance.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("degree-sum-mismatch"));
}

#[test]
fn sample_writes_samples_and_summary() {
    let dir = tempdir().unwrap();
    let instance = dir.path().join("instance.json");
    write(
        &instance,
        r#"{"out_degree": [1, 2, 1], "in_degree": [2, 1, 1],
            "fixed": [[0, 0, 0], [0, 0, 0], [0, 0, 0]]}"#,
    );
    let config = dir.path().join("run.yaml");
    write(
        &config,
        "nsamples: 6\nthin: 2\nburnin: 3\nvariant: unweighted\nseed_policy:\n  master_seed: 11\n",
    );
    let out = dir.path().join("run");

    let output = ng_sim(&[
        "sample",
        "--config",
        config.to_str().unwrap(),
        "--in",
        instance.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("mixing="));

    let samples = read_json(&out.join("samples.json"));
    let samples = samples.as_array().unwrap();
    assert_eq!(samples.len(), 6);
    for sample in samples {
        let rows: Vec<Vec<i64>> = serde_json::from_value(sample.clone()).unwrap();
        let row_sums: Vec<i64> = rows.iter().map(|row| row.iter().sum()).collect();
        assert_eq!(row_sums, vec![1, 2, 1]);
        let col_sums: Vec<i64> = (0..3).map(|col| rows.iter().map(|row| row[col]).sum()).collect();
        assert_eq!(col_sums, vec![2, 1, 1]);
    }

    let summary = read_json(&out.join("summary.json"));
    assert_eq!(summary["variant"], "unweighted");
    assert_eq!(summary["seed"], 11);
    assert_eq!(summary["stats"]["steps"], 3 + 6 * 2);
}

#[test]
fn sample_rejects_zero_thin() {
    let dir = tempdir().unwrap();
    let instance = dir.path().join("instance.json");
    write(&instance, r#"{"out_degree": [1, 1], "in_degree": [1, 1]}"#);
    let config = dir.path().join("run.yaml");
    write(&config, "thin: 0\n");

    let output = ng_sim(&[
        "sample",
        "--config",
        config.to_str().unwrap(),
        "--in",
        instance.to_str().unwrap(),
        "--out",
        dir.path().join("run").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("zero-thin"));
    assert!(!dir.path().join("run").exists());
}

#[test]
fn version_prints_package_version() {
    let output = ng_sim(&["version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env!("CARGO_PKG_VERSION")
    );

    let output = ng_sim(&["version", "--long"]);
    assert!(output.status.success());
    let info: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(info["crates"].as_array().unwrap().len(), 4);
}
