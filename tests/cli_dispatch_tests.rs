use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use orstaff::staffing::PARAMS_ENV_VAR;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_orstaff")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("orstaff-{name}-{stamp}.{extension}"))
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env_remove(PARAMS_ENV_VAR)
        .output()
        .expect("orstaff should run")
}

#[test]
fn run_command_writes_derived_output_path() {
    let input = unique_temp_path("cli_input", "csv");
    fs::write(
        &input,
        "scenario_name,total_rooms,trainees,crnas,faculty\nA,20,4,10,12\nB,18,2,12,10\n",
    )
    .expect("fixture should be written");
    let expected_output = PathBuf::from(input.to_string_lossy().replace("_input", "_output"));

    let output = run(&["run", input.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Results saved to"));
    assert!(stdout.contains("2 day(s) (0 empty)"));
    let written = fs::read_to_string(&expected_output).expect("output should exist");
    assert!(written.starts_with("scenario_name,total_rooms,"));
    assert_eq!(written.lines().count(), 3);

    let _ = fs::remove_file(input);
    let _ = fs::remove_file(expected_output);
}

#[test]
fn run_command_emits_json_daily_report_for_wide_input() {
    let input = unique_temp_path("cli-wide", "csv");
    let output_path = unique_temp_path("cli-wide-report", "json");
    fs::write(
        &input,
        "day,Mon,Tue\ntotal_rooms,20,\ntrainees,4,5\ncrnas,10,9\nfaculty,12,12\n",
    )
    .expect("fixture should be written");

    let output = run(&[
        "run",
        input.to_string_lossy().as_ref(),
        "--format",
        "json",
        "--output",
        output_path.to_string_lossy().as_ref(),
        "--revision",
        "ratio35",
        "--workers",
        "2",
    ]);

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let payload: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(&output_path).expect("report should exist"),
    )
    .expect("report should be json");
    assert_eq!(payload["days"][1]["label"], "Tue");
    let first_row = &payload["rows"][0];
    assert_eq!(first_row["label"], "NFP demand");
    assert_eq!(first_row["values"][0], "20");
    assert_eq!(first_row["values"][1], "");

    let _ = fs::remove_file(input);
    let _ = fs::remove_file(output_path);
}

#[test]
fn run_command_reports_missing_file() {
    let missing = unique_temp_path("missing", "xlsx");
    let output = run(&["run", missing.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input file not found"));
}

#[test]
fn run_command_reports_missing_column() {
    let input = unique_temp_path("no-faculty", "csv");
    fs::write(&input, "scenario_name,total_rooms,trainees,crnas\nA,20,4,10\n")
        .expect("fixture should be written");

    let output = run(&["run", input.to_string_lossy().as_ref(), "--layout", "long"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing 'faculty'"));
    let _ = fs::remove_file(input);
}

#[test]
fn scenarios_command_prints_result_table() {
    let output = run(&[
        "scenarios",
        "--total-rooms",
        "20,22",
        "--trainees",
        "4,6",
        "--crnas",
        "10,11",
        "--faculty",
        "12,14",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("scenario_name\ttotal_rooms"));
    assert!(lines[1].starts_with("Scenario 1\t20\t"));
    assert!(lines[2].starts_with("Scenario 2\t22\t"));
}

#[test]
fn scenarios_command_rejects_unparseable_counts() {
    let output = run(&[
        "scenarios",
        "--total-rooms",
        "20,abc",
        "--trainees",
        "4,6",
        "--crnas",
        "10,11",
        "--faculty",
        "12,14",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid integer in total_rooms"));
}

#[test]
fn params_command_prints_revision_yaml() {
    let output = run(&["params", "--revision", "daily-report"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("crna_supervision_ratio: 3.5"));
    assert!(stdout.contains("rounding: half_up_combined"));
}

#[test]
fn params_command_loads_yaml_file() {
    let path = unique_temp_path("params", "yaml");
    fs::write(&path, "fixed_faculty_buffer: 7\n").expect("fixture should be written");

    let output = run(&["params", "--params", path.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("fixed_faculty_buffer: 7"));
    let _ = fs::remove_file(path);
}

#[test]
fn unknown_command_returns_usage_code() {
    let output = run(&["optimize"]);
    assert_eq!(output.status.code(), Some(2));
}
