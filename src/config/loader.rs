//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Explicit overrides (command-line `--url` / `--token`)
//! 2. Conventional GitLab variables (GITLAB_URL, GITLAB_TOKEN, ...)
//! 3. Environment variables (TANUKI_CTL_*)
//! 4. Configuration file (TOML)
//! 5. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use std::path::Path;
use tracing::debug;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "tanuki-ctl.toml",
    ".tanuki-ctl.toml",
    "~/.config/tanuki-ctl/config.toml",
    "/etc/tanuki-ctl/config.toml",
];

/// Token variables, checked in order of precedence
const TOKEN_ENV_VARS: &[&str] = &["GITLAB_TOKEN", "GITLAB_PRIVATE_TOKEN", "GITLAB_ACCESS_TOKEN"];

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub token: Option<String>,
}

/// Load configuration from a TOML string (useful for testing)
///
/// Environment variables are not consulted.
pub fn load_config_from_str(
    toml_str: &str,
    overrides: &ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder().add_source(File::from_str(toml_str, FileFormat::Toml));
    let builder = apply_overrides(builder, overrides)?;

    finish(builder)
}

/// Load configuration from files and environment
pub fn load_config(
    config_path: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                debug!(path = %expanded, "Using configuration file");
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with TANUKI_CTL_ prefix
    // e.g., TANUKI_CTL_GITLAB__URL, TANUKI_CTL_GITLAB__TIMEOUT_SECS
    // Double underscore (__) maps to nested keys (gitlab.url)
    builder = builder.add_source(
        Environment::with_prefix("TANUKI_CTL")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. Handle common GitLab token environment variables
    for env_var in TOKEN_ENV_VARS {
        if let Ok(token) = std::env::var(env_var)
            && !token.is_empty()
        {
            builder = builder
                .set_override("gitlab.token", token)
                .map_err(|e| ConfigError::Load(e.to_string()))?;
            break;
        }
    }

    // 5. Handle GITLAB_URL if set (common convention)
    if let Ok(url) = std::env::var("GITLAB_URL") {
        builder = builder
            .set_override("gitlab.url", url)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }

    // 6. Explicit overrides win over everything
    let builder = apply_overrides(builder, overrides)?;

    finish(builder)
}

fn apply_overrides(
    mut builder: ConfigBuilder<DefaultState>,
    overrides: &ConfigOverrides,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(url) = &overrides.url {
        builder = builder
            .set_override("gitlab.url", url.as_str())
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }
    if let Some(token) = &overrides.token {
        builder = builder
            .set_override("gitlab.token", token.as_str())
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }
    Ok(builder)
}

/// Build, deserialize and validate
fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // Validate GitLab URL
    if config.gitlab.url.is_empty() {
        return Err(ConfigError::Missing {
            field: "gitlab.url".to_string(),
        });
    }

    if !config.gitlab.url.starts_with("http://") && !config.gitlab.url.starts_with("https://") {
        return Err(ConfigError::Invalid {
            message: format!(
                "gitlab.url must start with http:// or https://, got: {}",
                config.gitlab.url
            ),
        });
    }

    // Only static tokens are supported, so one must be present
    let has_token = config
        .gitlab
        .token
        .as_ref()
        .is_some_and(|t| !t.expose_secret().is_empty());
    if !has_token {
        return Err(ConfigError::Missing {
            field: "gitlab.token (set GITLAB_TOKEN environment variable)".to_string(),
        });
    }

    // Validate timeout
    if config.gitlab.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            message: "gitlab.timeout_secs must be greater than 0".to_string(),
        });
    }

    Ok(())
}
