use cypack_domain::{ConfigError, SuiteError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::context::CommandInfo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: CommandStatus,
    pub message: String,
    #[serde(default)]
    pub details: Value,
}

impl ExecutionOutcome {
    pub fn success(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: message.into(),
            details,
        }
    }

    pub fn failure(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Failure,
            message: message.into(),
            details,
        }
    }

    pub fn user_error(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::UserError,
            message: message.into(),
            details,
        }
    }

    /// Classifies an error raised by a command: bad names and bad config are
    /// the caller's to fix, everything else is a failure.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        if let Some(issue) = err.downcast_ref::<SuiteError>() {
            let name = match issue {
                SuiteError::InvalidName { name }
                | SuiteError::ReservedName { name }
                | SuiteError::Duplicate { name } => name.clone(),
            };
            return Self::user_error(
                issue.to_string(),
                json!({
                    "reason": "invalid_suite",
                    "suite": name,
                    "hint": "Suite names must be unique per build and usable as a directory name.",
                }),
            );
        }
        if let Some(issue) = err.downcast_ref::<ConfigError>() {
            return Self::user_error(
                issue.to_string(),
                json!({
                    "reason": "invalid_config",
                    "hint": "Check cypack.toml or the path passed with --config.",
                }),
            );
        }
        let issues: Vec<String> = err.chain().map(ToString::to_string).collect();
        Self::failure(
            err.to_string(),
            json!({
                "reason": "internal_error",
                "error": err.to_string(),
                "issues": issues,
                "hint": "Re-run with `-v` for more detail; the workspace may be partially built until the next `cypack init`.",
            }),
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    UserError,
    Failure,
}

impl CommandStatus {
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            CommandStatus::Ok => 0,
            CommandStatus::UserError => 1,
            CommandStatus::Failure => 2,
        }
    }
}

#[must_use]
pub fn format_status_message(info: CommandInfo, message: &str) -> String {
    let prefix = format!("cypack {}", info.name);
    if message.is_empty() {
        prefix
    } else if message.starts_with(&prefix) {
        message.to_string()
    } else {
        format!("{prefix}: {message}")
    }
}

#[must_use]
pub fn to_json_response(info: CommandInfo, outcome: &ExecutionOutcome) -> Value {
    let status = match outcome.status {
        CommandStatus::Ok => "ok",
        CommandStatus::UserError => "user-error",
        CommandStatus::Failure => "error",
    };
    let details = match &outcome.details {
        Value::Object(_) => outcome.details.clone(),
        Value::Null => json!({}),
        other => json!({ "value": other }),
    };
    json!({
        "status": status,
        "message": format_status_message(info, &outcome.message),
        "details": details,
    })
}
