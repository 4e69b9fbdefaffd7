//! tanuki-ctl
//!
//! Grant GitLab member roles and export a year of issues or merge requests.

use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tanuki_ctl::{
    AppError, GitLabApi, OperationResult,
    api::reject_year,
    config::{ConfigOverrides, load_config},
};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// GitLab role management and yearly issue/merge request export
#[derive(Parser, Debug)]
#[command(name = "tanuki-ctl")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "TANUKI_CTL_CONFIG", global = true)]
    config: Option<String>,

    /// GitLab instance URL (overrides GITLAB_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Personal Access Token (overrides GITLAB_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TANUKI_CTL_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Log output format
    #[arg(long, env = "TANUKI_CTL_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grant or update a user's role on a repository or group
    #[command(name = "grant_role")]
    GrantRole {
        /// GitLab username
        username: String,
        /// Project path (group/project) or group path
        repository_or_group: String,
        /// Guest, Reporter, Developer, Maintainer or Owner
        role: String,
    },

    /// List issues or merge requests created in a year
    #[command(name = "get_items")]
    GetItems {
        /// mr or issues
        item_type: String,
        /// Four-digit year
        #[arg(allow_negative_numbers = true, value_parser = parse_year)]
        year: YearArg,
    },
}

/// Year as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
enum YearArg {
    Value(i64),
    /// All digits, but too wide for `i64`; rejected as a year, not as usage
    Overflow(String),
}

fn parse_year(s: &str) -> Result<YearArg, String> {
    if let Ok(year) = s.parse::<i64>() {
        return Ok(YearArg::Value(year));
    }

    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(YearArg::Overflow(s.to_string()))
    } else {
        Err(format!("invalid year '{s}': must be an integer"))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable output
    Pretty,
    /// JSON structured output
    Json,
}

fn init_logging(level: &str, format: LogFormat) {
    // Logs go to stderr; stdout carries the JSON result only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

async fn run(args: Args) -> anyhow::Result<OperationResult> {
    let overrides = ConfigOverrides {
        url: args.url,
        token: args.token,
    };

    let config = load_config(args.config.as_deref(), &overrides)
        .map_err(AppError::from)
        .inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;
    debug!(?config, "Configuration loaded");

    let api = GitLabApi::new(&config.gitlab)
        .inspect_err(|e| error!(error = %e, "Failed to create GitLab client"))?;

    let result = match args.command {
        Command::GrantRole {
            username,
            repository_or_group,
            role,
        } => {
            api.grant_role_permissions(&username, &repository_or_group, &role)
                .await
        }
        Command::GetItems {
            item_type,
            year: YearArg::Value(year),
        } => api.get_items_by_year(&item_type, year).await,
        Command::GetItems {
            item_type,
            year: YearArg::Overflow(year),
        } => reject_year(&item_type, year),
    };

    Ok(result)
}

fn print_result(result: &OperationResult) {
    match result.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => println!("{}", fallback_json(&e.to_string())),
    }
}

/// Minimal failure payload, escaped by serde_json
fn fallback_json(message: &str) -> String {
    serde_json::json!({"success": false, "message": message}).to_string()
}

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up GITLAB_URL / GITLAB_TOKEN from a local .env if present
    dotenvy::dotenv().ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            e.print().ok();
            return code;
        }
    };

    init_logging(&args.log_level, args.log_format);

    let result = run(args)
        .await
        .unwrap_or_else(|e| OperationResult::failure(e.to_string()));

    print_result(&result);
    result.exit_code()
}
