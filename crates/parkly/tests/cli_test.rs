//! Integration tests for the `parkly` CLI binary.
//!
//! Argument parsing, help output, completions, the offline calculators,
//! config handling and error exit codes. Backend-bound commands run against
//! a wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `parkly` binary with env isolation.
///
/// Clears all `PARKLY_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn parkly_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("parkly");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PARKLY_PROFILE")
        .env_remove("PARKLY_BACKEND")
        .env_remove("PARKLY_API_KEY")
        .env_remove("PARKLY_ACCESS_TOKEN")
        .env_remove("PARKLY_LOT")
        .env_remove("PARKLY_OUTPUT")
        .env_remove("PARKLY_INSECURE")
        .env_remove("PARKLY_TIMEOUT");
    cmd
}

fn home() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = home();
    let output = parkly_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let home = home();
    parkly_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("vehicles")
            .and(predicate::str::contains("subscriptions"))
            .and(predicate::str::contains("fee"))
            .and(predicate::str::contains("reservations")),
    );
}

#[test]
fn test_version_flag() {
    let home = home();
    parkly_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("parkly"));
}

#[test]
fn test_unknown_period_is_usage_error() {
    let home = home();
    parkly_cmd(&home)
        .args(["fee", "--entry", "2024-01-01 10:00", "--price", "10", "--period", "fortnight"])
        .assert()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = home();
    parkly_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("parkly"));
}

#[test]
fn test_completions_invalid_shell() {
    let home = home();
    parkly_cmd(&home)
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}

// ── Offline fee ─────────────────────────────────────────────────────

#[test]
fn test_fee_rounds_partial_hour_up() {
    let home = home();
    parkly_cmd(&home)
        .args([
            "fee",
            "--entry",
            "2024-01-01 10:00",
            "--exit",
            "2024-01-01 11:01",
            "--price",
            "1000",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout("2000\n");
}

#[test]
fn test_fee_zero_length_stay_charges_one_unit() {
    let home = home();
    parkly_cmd(&home)
        .args([
            "fee",
            "--entry",
            "2024-01-01T10:00:00Z",
            "--exit",
            "2024-01-01T10:00:00Z",
            "--price",
            "750",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout("750\n");
}

#[test]
fn test_fee_json_reports_units() {
    let home = home();
    let output = parkly_cmd(&home)
        .args([
            "fee",
            "--entry",
            "2024-01-01 00:00",
            "--exit",
            "2024-06-01 00:00",
            "--price",
            "100",
            "--period",
            "day",
            "-o",
            "json-compact",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["units"], 152);
    assert_eq!(json["amount"], "15200");
}

#[test]
fn test_fee_oversized_price_is_usage_error() {
    let home = home();
    parkly_cmd(&home)
        .args([
            "fee",
            "--entry",
            "2024-01-01 10:00",
            "--exit",
            "2024-01-01 11:01",
            "--price",
            "79228162514264337593543950335",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn test_fee_rejects_bad_timestamp() {
    let home = home();
    parkly_cmd(&home)
        .args(["fee", "--entry", "noon", "--price", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("entry"));
}

// ── Offline subscription expiry ─────────────────────────────────────

#[test]
fn test_expiry_clamps_to_month_end() {
    let home = home();
    parkly_cmd(&home)
        .args(["subscriptions", "expiry", "--start", "2024-01-31", "-o", "plain"])
        .assert()
        .success()
        .stdout("2024-02-29\n");
}

#[test]
fn test_expiry_weekly() {
    let home = home();
    parkly_cmd(&home)
        .args([
            "subs", "expiry", "--start", "2024-01-01", "--period", "weekly", "-n", "2", "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout("2024-01-15\n");
}

#[test]
fn test_expiry_rejects_zero_quantity() {
    let home = home();
    parkly_cmd(&home)
        .args(["subscriptions", "expiry", "--start", "2024-01-01", "-n", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quantity"));
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn test_missing_config_points_at_init() {
    let home = home();
    let output = parkly_cmd(&home).args(["lots", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("parkly config init"),
        "Expected init hint in output:\n{text}"
    );
}

#[test]
fn test_backend_without_key_is_auth_error() {
    let home = home();
    parkly_cmd(&home)
        .args(["lots", "list", "--backend", "https://db.example"])
        .assert()
        .code(3);
}

#[test]
fn test_lot_required_for_spaces() {
    let home = home();
    parkly_cmd(&home)
        .args([
            "spaces",
            "list",
            "--backend",
            "https://db.example",
            "--api-key",
            "k",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No parking lot selected"));
}

#[test]
fn test_unknown_profile() {
    let home = home();
    parkly_cmd(&home)
        .args(["--profile", "nope", "occupancy"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_cancel_without_tty_requires_yes() {
    let home = home();
    parkly_cmd(&home)
        .args([
            "reservations",
            "cancel",
            "RES-1234ABCD",
            "--backend",
            "https://db.example",
            "--api-key",
            "k",
            "--lot",
            "1",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_profiles_empty() {
    let home = home();
    parkly_cmd(&home)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_config_set_then_show_masks_key() {
    let home = home();
    for (key, value) in [
        ("backend", "https://db.example"),
        ("lot", "7"),
        ("api_key", "super-secret"),
    ] {
        parkly_cmd(&home)
            .args(["config", "set", key, value])
            .assert()
            .success();
    }

    parkly_cmd(&home)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));

    parkly_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lot = 7")
                .and(predicate::str::contains("https://db.example"))
                .and(predicate::str::contains("super-secret").not()),
        );
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = home();
    parkly_cmd(&home)
        .args(["config", "set", "colour", "red"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn test_config_use_unknown_profile() {
    let home = home();
    parkly_cmd(&home)
        .args(["config", "use", "elsewhere"])
        .assert()
        .code(4);
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_lots_list_plain() {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/estacionamientos"))
        .and(header("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"est_id": 1, "est_nombre": "Centro", "est_capacidad": 40},
            {"est_id": 2, "est_nombre": "Norte"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        let home = home();
        parkly_cmd(&home)
            .args(["lots", "list", "--backend", &uri, "--api-key", "test-key", "-o", "plain"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n2\n");
}
