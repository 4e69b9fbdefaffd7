//! Configuration loading tests

use std::env;
use std::io::Write;
use tempfile::NamedTempFile;
use tanuki_ctl::config::{ConfigOverrides, load_config, load_config_from_str};
use tanuki_ctl::error::{AppError, ConfigError};
use tanuki_ctl::{GitLabApi, OperationResult};

const FULL_CONFIG: &str = r#"
[gitlab]
url = "https://gitlab.company.com/"
token = "glpat-test"
api_version = "v4"
timeout_secs = 60
verify_ssl = false
"#;

/// Variables `load_config` reads besides the file
const ENV_VARS: &[&str] = &[
    "GITLAB_URL",
    "GITLAB_TOKEN",
    "GITLAB_PRIVATE_TOKEN",
    "GITLAB_ACCESS_TOKEN",
    "TANUKI_CTL_GITLAB__URL",
    "TANUKI_CTL_GITLAB__TIMEOUT_SECS",
];

fn clear_env() {
    for var in ENV_VARS {
        unsafe { env::remove_var(var) };
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn explicit() -> ConfigOverrides {
    ConfigOverrides {
        url: Some("https://gitlab.override.example/".to_string()),
        token: Some("override-token".to_string()),
    }
}

#[test]
fn test_full_config() {
    let config = load_config_from_str(FULL_CONFIG, &ConfigOverrides::default()).unwrap();

    assert_eq!(config.gitlab.url, "https://gitlab.company.com/");
    assert_eq!(config.gitlab.api_url(), "https://gitlab.company.com/api/v4");
    assert_eq!(config.gitlab.timeout_secs, 60);
    assert!(!config.gitlab.verify_ssl);
    assert_eq!(
        config.gitlab.token.as_ref().map(|t| t.expose_secret()),
        Some("glpat-test")
    );
}

#[test]
fn test_defaults_with_token_only() {
    let config = load_config_from_str(
        "",
        &ConfigOverrides {
            url: None,
            token: Some("t".to_string()),
        },
    )
    .unwrap();

    assert_eq!(config.gitlab.url, "http://localhost");
    assert_eq!(config.gitlab.api_url(), "http://localhost/api/v4");
    assert_eq!(config.gitlab.timeout_secs, 30);
    assert!(config.gitlab.verify_ssl);
}

#[test]
fn test_token_never_in_debug_output() {
    let config = load_config_from_str(FULL_CONFIG, &ConfigOverrides::default()).unwrap();
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("glpat-test"));
}

#[test]
#[serial_test::serial]
fn test_load_from_file() {
    clear_env();

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[gitlab]\ntimeout_secs = 5\nverify_ssl = false").unwrap();

    let config = load_config(file.path().to_str(), &explicit()).unwrap();

    assert_eq!(config.gitlab.timeout_secs, 5);
    assert!(!config.gitlab.verify_ssl);
    assert_eq!(config.gitlab.url, "https://gitlab.override.example/");
    assert_eq!(
        config.gitlab.api_url(),
        "https://gitlab.override.example/api/v4"
    );
}

#[test]
#[serial_test::serial]
fn test_missing_file_error() {
    let result = load_config(Some("/nonexistent/tanuki-ctl.toml"), &explicit());
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
#[serial_test::serial]
fn test_gitlab_env_vars_fill_url_and_token() {
    clear_env();
    unsafe {
        env::set_var("GITLAB_URL", "https://gitlab.env.example/");
        env::set_var("GITLAB_TOKEN", "env-token");
    }

    let file = config_file("[gitlab]\nurl = \"https://gitlab.file.example\"\n");
    let result = load_config(file.path().to_str(), &ConfigOverrides::default());
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.gitlab.url, "https://gitlab.env.example/");
    assert_eq!(config.gitlab.api_url(), "https://gitlab.env.example/api/v4");
    assert_eq!(
        config.gitlab.token.as_ref().map(|t| t.expose_secret()),
        Some("env-token")
    );
}

#[test]
#[serial_test::serial]
fn test_empty_gitlab_token_falls_through() {
    clear_env();
    unsafe {
        env::set_var("GITLAB_TOKEN", "");
        env::set_var("GITLAB_PRIVATE_TOKEN", "private-token");
        env::set_var("GITLAB_ACCESS_TOKEN", "access-token");
    }

    let file = config_file("");
    let result = load_config(file.path().to_str(), &ConfigOverrides::default());
    clear_env();

    let config = result.unwrap();
    assert_eq!(
        config.gitlab.token.as_ref().map(|t| t.expose_secret()),
        Some("private-token")
    );
}

#[test]
#[serial_test::serial]
fn test_prefixed_env_sets_nested_keys() {
    clear_env();
    unsafe {
        env::set_var("TANUKI_CTL_GITLAB__TIMEOUT_SECS", "7");
        env::set_var("TANUKI_CTL_GITLAB__URL", "https://gitlab.prefixed.example");
        env::set_var("GITLAB_TOKEN", "env-token");
    }

    let file = config_file("[gitlab]\ntimeout_secs = 60\n");
    let result = load_config(file.path().to_str(), &ConfigOverrides::default());
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.gitlab.timeout_secs, 7);
    assert_eq!(config.gitlab.url, "https://gitlab.prefixed.example");
}

#[test]
#[serial_test::serial]
fn test_cli_overrides_beat_env() {
    clear_env();
    unsafe {
        env::set_var("GITLAB_URL", "https://gitlab.env.example");
        env::set_var("GITLAB_TOKEN", "env-token");
    }

    let file = config_file("");
    let result = load_config(file.path().to_str(), &explicit());
    clear_env();

    let config = result.unwrap();
    assert_eq!(config.gitlab.url, "https://gitlab.override.example/");
    assert_eq!(
        config.gitlab.token.as_ref().map(|t| t.expose_secret()),
        Some("override-token")
    );
}

#[test]
#[serial_test::serial]
fn test_missing_token_with_empty_env() {
    clear_env();
    unsafe { env::set_var("GITLAB_TOKEN", "") };

    let file = config_file("");
    let result = load_config(file.path().to_str(), &ConfigOverrides::default());
    clear_env();

    assert!(matches!(result, Err(ConfigError::Missing { .. })));
}

#[test]
fn test_missing_token_becomes_failure_payload() {
    let err = load_config_from_str("[gitlab]\nurl = \"https://gitlab.example.com\"", &ConfigOverrides::default())
        .unwrap_err();
    let result = OperationResult::failure(AppError::from(err).to_string());

    let value: serde_json::Value =
        serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();
    assert_eq!(value["success"], false);
    assert!(
        value["message"]
            .as_str()
            .unwrap()
            .contains("GITLAB_TOKEN")
    );
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn test_client_requires_token() {
    let config = tanuki_ctl::config::GitLabConfig::default();
    assert!(matches!(GitLabApi::new(&config), Err(AppError::Auth(_))));
}
