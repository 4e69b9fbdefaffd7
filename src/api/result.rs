//! Uniform outcome of the GitLab operations

use serde::Serialize;
use std::process::ExitCode;

/// What an operation reports back to the caller
///
/// Expected failures (unknown user, bad input, non-2xx responses) are
/// represented here rather than as errors. Field order matches the JSON
/// printed by the command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<serde_json::Value>>,

    pub message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: None,
            items: None,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            items: None,
            message: message.into(),
        }
    }

    /// Successful listing; `count` is taken from `items`
    pub fn with_items(items: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            items: Some(items),
            message: message.into(),
        }
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
