//! End-to-end tests for the springs CLI.
//!
//! These run the real binary: scenario files, flag overrides, output
//! formats and error exits.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a Command for the springs binary with a clean environment.
#[allow(deprecated)]
fn springs_cmd() -> Command {
    let mut cmd = Command::cargo_bin("springs").unwrap();
    for (key, _) in std::env::vars() {
        if key.starts_with("SPRINGS_") {
            cmd.env_remove(key);
        }
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

fn scenario_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn csv_rows(stdout: &[u8]) -> Vec<Vec<f64>> {
    String::from_utf8_lossy(stdout)
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(|v| v.parse().unwrap()).collect())
        .collect()
}

// =============================================================================
// Run
// =============================================================================

mod run {
    use super::*;

    #[test]
    fn test_default_run_prints_table() {
        springs_cmd()
            .arg("run")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("# earth"))
            .stdout(predicate::str::contains("displacement"));
    }

    #[test]
    fn test_reference_scenario_returns_after_one_period() {
        let output = springs_cmd()
            .args(["run", "-k", "6", "-m", "0.1", "-x", "0.05"])
            .args(["--dt", "0.01", "--duration", "0.81", "--format", "csv"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let rows = csv_rows(&output.stdout);
        assert_eq!(rows.len(), 82);
        let first = &rows[1];
        assert!(first[2] < 0.05 && first[2] > 0.049, "{first:?}");
        let last = rows.last().unwrap();
        assert!((last[0] - 0.81).abs() < 1e-9);
        assert!((last[2] - 0.05).abs() < 1e-3);
        assert!(last[3].abs() < 0.02);
    }

    #[test]
    fn test_every_thins_output() {
        let output = springs_cmd()
            .args(["run", "--duration", "1", "--dt", "0.01", "--every", "10", "-f", "csv"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(csv_rows(&output.stdout).len(), 11);
    }

    #[test]
    fn test_json_output() {
        let output = springs_cmd()
            .args(["run", "--planet", "moon", "--duration", "0.1", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["body"], "moon");
        assert_eq!(value["gravity"], 1.62);
        assert_eq!(value["samples"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_slow_motion_advances_an_eighth() {
        let output = springs_cmd()
            .args(["run", "--dt", "0.08", "--duration", "0.8", "--slow", "-f", "csv"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let last = csv_rows(&output.stdout).pop().unwrap();
        assert!((last[0] - 0.1).abs() < 1e-12, "{last:?}");
    }

    #[test]
    fn test_env_sets_format() {
        springs_cmd()
            .arg("run")
            .env("SPRINGS_FORMAT", "csv")
            .env("SPRINGS_DURATION", "0.05")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("time,spring,displacement"));
    }
}

// =============================================================================
// Scenario Files
// =============================================================================

mod scenario_files {
    use super::*;

    #[test]
    fn test_two_spring_scenario() {
        let file = scenario_file(
            r#"
            dt = 0.02
            duration = 0.2
            planet = "jupiter"

            [[springs]]
            spring_constant = 20.0
            mass = 0.3

            [[springs]]
            spring_constant = 12.0
            mass = 0.1
            damping = 2.0
            "#,
        );
        let output = springs_cmd()
            .args(["run", "-f", "csv", "--scenario"])
            .arg(file.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let rows = csv_rows(&output.stdout);
        // 11 samples × 2 springs
        assert_eq!(rows.len(), 22);
        assert!(rows.iter().any(|r| r[1] == 2.0));
    }

    #[test]
    fn test_bundled_lab_scenario() {
        let output = springs_cmd()
            .args(["run", "-f", "csv", "--scenario", "scenarios/lab.toml"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let rows = csv_rows(&output.stdout);
        // 31 samples × 2 springs
        assert_eq!(rows.len(), 62);
        let damped: Vec<&Vec<f64>> = rows.iter().filter(|r| r[1] == 2.0).collect();
        let thermal = damped.last().unwrap()[7];
        assert!(thermal > 0.0);
    }

    #[test]
    fn test_flags_override_file() {
        let file =
            scenario_file("planet = \"moon\"\n[[springs]]\nspring_constant = 9.0\nmass = 1.0\n");
        springs_cmd()
            .args(["classify", "--damping", "6", "--gravity", "0", "--scenario"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("spring 1: critically damped"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let file = scenario_file("stiffness = 3.0\n");
        springs_cmd()
            .args(["run", "--scenario"])
            .arg(file.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("invalid scenario"));
    }

    #[test]
    fn test_missing_file() {
        springs_cmd()
            .args(["run", "--scenario", "does-not-exist.toml"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("cannot read scenario"));
    }

    #[test]
    fn test_three_springs_are_rejected() {
        let file = scenario_file("[[springs]]\n[[springs]]\n[[springs]]\n");
        springs_cmd()
            .args(["run", "--scenario"])
            .arg(file.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("at most 2 springs"));
    }
}

// =============================================================================
// Classify
// =============================================================================

mod classify {
    use super::*;

    #[test]
    fn test_regimes() {
        springs_cmd()
            .args(["classify", "-k", "9", "-m", "1", "-c", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("underdamped"))
            .stdout(predicate::str::contains("damped period"));

        springs_cmd()
            .args(["classify", "-k", "9", "-m", "1", "-c", "6"])
            .assert()
            .success()
            .stdout(predicate::str::contains("critically damped"))
            .stdout(predicate::str::contains("damped period").not());

        springs_cmd()
            .args(["classify", "-k", "9", "-m", "1", "-c", "10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("overdamped"));
    }

    #[test]
    fn test_equilibrium_follows_planet() {
        springs_cmd()
            .args(["classify", "-k", "10", "-m", "0.25", "--planet", "zero-g"])
            .assert()
            .success()
            .stdout(predicate::str::contains("equilibrium       -0.000000 m").or(
                predicate::str::contains("equilibrium       0.000000 m"),
            ));
    }
}

// =============================================================================
// Error Handling
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_non_positive_mass() {
        springs_cmd()
            .args(["run", "--mass", "0"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("spring 1: mass must be positive"));
    }

    #[test]
    fn test_negative_damping() {
        springs_cmd()
            .args(["classify", "--damping", "-1"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("damping coefficient must not be negative"));
    }

    #[test]
    fn test_timestep_too_large() {
        springs_cmd()
            .args(["run", "--dt", "1"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("dt must be greater than 0"));
    }

    #[test]
    fn test_unknown_planet_is_a_usage_error() {
        springs_cmd()
            .args(["run", "--planet", "pluto"])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("unknown planet"));
    }

    #[test]
    fn test_missing_subcommand() {
        springs_cmd().assert().failure().code(2);
    }
}
