//! Integration tests for the `pantry` CLI binary.
//!
//! Argument parsing, help, completions and config handling run without a
//! network. Catalog commands run against a local `wiremock` server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `pantry` binary with env isolation.
///
/// Clears all `PANTRY_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn pantry_cmd(home: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pantry");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PANTRY_PROFILE")
        .env_remove("PANTRY_BASE_URL")
        .env_remove("PANTRY_OUTPUT")
        .env_remove("PANTRY_TIMEOUT")
        .env_remove("PANTRY_DEFAULT_PROFILE");
    cmd
}

/// Run a catalog command against `server` on a blocking thread.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let home = tempfile::tempdir().unwrap();
    let uri = server.uri();
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        pantry_cmd(home.path())
            .arg("--base-url")
            .arg(uri)
            .args(args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = pantry_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!("{}{}", stdout(&output), stderr(&output));
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("Open Food Facts")
            .and(predicate::str::contains("browse"))
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("lookup")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pantry"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pantry"));
}

#[test]
fn test_completions_invalid_shell() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_pages_must_be_positive() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["browse", "snacks", "--pages", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_sort_order() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["search", "tea", "--sort", "price-asc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("name-asc"));
}

#[test]
fn test_blank_search_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["search", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["--profile", "moon", "categories"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("moon"));
}

#[test]
fn test_invalid_base_url() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["--base-url", "not a url", "categories"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base-url"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();

    pantry_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    pantry_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config written"));

    pantry_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.world]")
                .and(predicate::str::contains("world.openfoodfacts.org")),
        );

    pantry_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    pantry_cmd(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

// ── Catalog commands ────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_product_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/3017620422003.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "3017620422003",
            "status": 1,
            "product": {
                "code": "3017620422003",
                "product_name": "Nutella",
                "brands": "Ferrero",
                "nutrition_grades": "e",
                "origins": ""
            }
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["product", "3017620422003"]).await;

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Nutella"));
    assert!(text.contains("Ferrero"));
    assert!(text.contains("Nutri-Score:"));
    assert!(text.contains('E'));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_product_not_found_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/000000000000.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "000000000000",
            "status": 0,
            "status_verbose": "product not found"
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["product", "000000000000"]).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_service_down_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/42.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let output = run_against(&server, &["lookup", "42"]).await;

    assert_eq!(output.status.code(), Some(7));
    assert!(stderr(&output).contains("unavailable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_browse_stops_on_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/category/snacks/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                { "code": "2", "product_name": "pretzels" },
                { "code": "1", "product_name": "Almonds" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/category/snacks/2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        &server,
        &[
            "browse",
            "snacks",
            "--pages",
            "5",
            "--sort",
            "name-asc",
            "-o",
            "json-compact",
        ],
    )
    .await;

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(view["intent"]["mode"], "category");
    assert_eq!(view["has_more"], false);
    assert_eq!(view["page"], 2);
    assert_eq!(view["accumulated_products"][0]["name"], "Almonds");
    assert_eq!(view["accumulated_products"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_filters_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .and(query_param("search_terms", "choc"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                { "code": "10", "product_name": "Dark CHOCOLATE" },
                { "code": "11", "product_name": "Vanilla wafers" },
                { "code": "12" },
                { "code": "13", "product_name": "choco spread" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["search", "choc", "-o", "plain"]).await;

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "10\n13");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_categories_skip_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tags": [
                { "name": "Snacks", "products": 12 },
                { "name": "Ghosts", "products": 0 }
            ]
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["categories", "-o", "plain"]).await;

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Snacks");
}

#[test]
fn test_connection_refused_exit_code() {
    let home = tempfile::tempdir().unwrap();
    pantry_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:1", "product", "42"])
        .assert()
        .code(7);
}
