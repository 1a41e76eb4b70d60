//! End-to-end tests for the `am4route-cli` binary against the CSV fixtures.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .canonicalize()
        .expect("fixture directory present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("am4route-cli");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("AM4ROUTE_DATA")
        .arg("--data-dir")
        .arg(fixtures_dir());
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

#[test]
fn airport_resolves_by_icao() {
    cli()
        .args(["airport", "icao:egll"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("LHR/EGLL London Heathrow (id 2)"))
        .stdout(predicate::str::contains("runway: 12,799 ft"));
}

#[test]
fn airport_miss_fails_with_suggestions() {
    cli()
        .args(["airport", "name:London Heathrw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("airport not found - name:LONDON HEATHRW"))
        .stderr(predicate::str::contains("Did you mean"))
        .stderr(predicate::str::contains("LHR/EGLL (London Heathrow)"));
}

#[test]
fn aircraft_json_reports_default_engine() {
    let value = json_stdout(cli().args(["--format", "json", "aircraft", "B744"]));
    assert_eq!(value["shortname"], "b744");
    assert_eq!(value["priority"], 0);
    assert_eq!(value["ename"], "CF6-80C2B1F");
    assert_eq!(value["type"], "pax");
}

#[test]
fn route_text_summarises_direct_flight() {
    cli()
        .args(["route", "--from", "HKG", "--to", "LHR", "--aircraft", "b744"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Route: HKG (Hong Kong) -> LHR (London Heathrow) with b744 [PAX]",
        ))
        .stdout(predicate::str::contains("demand: Y 1200 / J 250 / F 90"))
        .stdout(predicate::str::contains("load: 87.0 %"))
        .stdout(predicate::str::contains("via").not());
}

#[test]
fn route_json_includes_stopover() {
    let value = json_stdout(cli().args([
        "--format",
        "json",
        "route",
        "--from",
        "HKG",
        "--to",
        "LHR",
        "--aircraft",
        "a332",
    ]));
    assert_eq!(value["valid"], true);
    assert_eq!(value["stopover"]["iata"], "DEL");
    assert_eq!(value["config"]["kind"], "pax");
    let direct = value["direct_distance"].as_f64().expect("number");
    let flown = value["distance"].as_f64().expect("number");
    assert!(flown > direct);
}

#[test]
fn realism_route_reports_short_runway() {
    cli()
        .args([
            "route",
            "--from",
            "LHR",
            "--to",
            "KEF",
            "--aircraft",
            "a388",
            "--mode",
            "realism",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("not flyable: runway too short"));
}

#[test]
fn rich_format_without_color_shows_badge() {
    cli()
        .args([
            "--format",
            "rich",
            "route",
            "--from",
            "LHR",
            "--to",
            "KEF",
            "--aircraft",
            "a388",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(" FLYABLE  LHR -> KEF with a388 [PAX]"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn cargo_route_uses_cargo_split() {
    let value = json_stdout(cli().args([
        "--format",
        "json",
        "route",
        "--from",
        "HKG",
        "--to",
        "DXB",
        "--aircraft",
        "b748f",
    ]));
    assert_eq!(value["valid"], true);
    assert_eq!(value["config"]["kind"], "cargo");
    assert_eq!(value["config"]["l"], 100);
}

#[test]
fn load_override_is_validated() {
    cli()
        .args([
            "route", "--from", "HKG", "--to", "LHR", "--aircraft", "b744", "--load", "1.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--load must be between 0 and 1"));
}

#[test]
fn training_levels_are_validated() {
    cli()
        .args([
            "route", "--from", "HKG", "--to", "DXB", "--aircraft", "b748f", "--h-training", "7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("training levels must be between 0 and 6"));
}

#[test]
fn load_override_replaces_estimate() {
    let value = json_stdout(cli().args([
        "--format",
        "json",
        "route",
        "--from",
        "HKG",
        "--to",
        "LHR",
        "--aircraft",
        "b744",
        "--load",
        "0.5",
    ]));
    let income = value["income"].as_f64().expect("number");
    let max_income = value["max_income"].as_f64().expect("number");
    assert!((income - max_income * 0.5).abs() < 1e-6);
}

#[test]
fn autoprice_ratio_scales_estimated_load() {
    let value = json_stdout(cli().args([
        "--format",
        "json",
        "route",
        "--from",
        "HKG",
        "--to",
        "LHR",
        "--aircraft",
        "b744",
        "--autoprice-ratio",
        "1.2",
    ]));
    // 0.87 base load, 0.1 above the 1.1 ceiling at sensitivity 2
    let load = value["load"].as_f64().expect("number");
    assert!((load - 0.696).abs() < 1e-9, "load was {load}");
}

#[test]
fn autoprice_ratio_is_validated() {
    cli()
        .args([
            "route",
            "--from",
            "HKG",
            "--to",
            "LHR",
            "--aircraft",
            "b744",
            "--autoprice-ratio",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--autoprice-ratio must be a positive number"));
}

#[test]
fn short_hop_is_not_flyable() {
    cli()
        .args(["route", "--from", "LHR", "--to", "LGW", "--aircraft", "a320"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not flyable: distance too short"));
}

#[test]
fn unknown_aircraft_in_route_fails() {
    cli()
        .args(["route", "--from", "HKG", "--to", "LHR", "--aircraft", "zzzz9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown aircraft"));
}

#[test]
fn economics_override_changes_flight_time() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("economics.json");
    fs::write(&path, r#"{ "easy_speed_multiplier": 3.0 }"#).expect("write economics");

    let base = json_stdout(cli().args([
        "--format", "json", "route", "--from", "HKG", "--to", "LHR", "--aircraft", "b744",
    ]));
    let faster = json_stdout(
        cli()
            .args([
                "--format", "json", "route", "--from", "HKG", "--to", "LHR", "--aircraft", "b744",
            ])
            .arg("--economics")
            .arg(&path),
    );
    let base_time = base["flight_time_hours"].as_f64().expect("number");
    let fast_time = faster["flight_time_hours"].as_f64().expect("number");
    assert!((base_time / fast_time - 2.0).abs() < 1e-9);
}

#[test]
fn missing_dataset_is_reported() {
    let dir = tempdir().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("am4route-cli");
    cmd.env("RUST_LOG", "error")
        .arg("--data-dir")
        .arg(dir.path().join("nope.db"))
        .args(["airport", "HKG"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to locate the AM4 dataset"));
}

#[test]
fn dataset_location_falls_back_to_env_var() {
    let mut cmd = cargo_bin_cmd!("am4route-cli");
    cmd.env("RUST_LOG", "error")
        .env("AM4ROUTE_DATA", fixtures_dir())
        .args(["aircraft", "id:6"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("g650 Gulfstream G650ER [VIP]"));
}
