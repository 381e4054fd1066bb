use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn list_prints_the_trackable_spacecraft() {
    Command::cargo_bin("clipperwatch")
        .expect("clipperwatch bin")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Europa Clipper"))
        .stdout(predicate::str::contains("Voyager 1"))
        .stdout(predicate::str::contains("New Horizons"));
}

#[test]
fn unknown_spacecraft_fails_before_any_fetch() {
    Command::cargo_bin("clipperwatch")
        .expect("clipperwatch bin")
        .args(["--spacecraft", "Rocinante"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rocinante"));
}

#[test]
fn planets_are_not_trackable() {
    Command::cargo_bin("clipperwatch")
        .expect("clipperwatch bin")
        .args(["--spacecraft", "Jupiter"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unknown_observer_fails_before_any_fetch() {
    Command::cargo_bin("clipperwatch")
        .expect("clipperwatch bin")
        .args(["--observer", "Tycho Station"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tycho Station"));
}

#[test]
fn version_is_reported_for_smoke_checks() {
    assert!(!clipperwatch::version().is_empty());
}
