use std::path::PathBuf;

use thiserror::Error;

/// Fault raised by the automation driver while performing a tool invocation.
///
/// The replay engine never interprets the message; it is preserved verbatim
/// through retries and into the final `ActionResult`.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct DriverFault {
    pub message: String,
}

impl DriverFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the action dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The tool name is not in the registry. The message carries the full
    /// supported-tool list so callers can self-diagnose typos or version skew.
    #[error("tool '{tool}' is not supported for replay; supported tools: {}", .supported.join(", "))]
    UnsupportedTool {
        tool: String,
        supported: Vec<&'static str>,
    },

    #[error("driver fault while executing '{tool}': {fault}")]
    Driver { tool: String, fault: DriverFault },
}

impl DispatchError {
    /// Unsupported tools fail identically on every attempt, so the execution
    /// context skips the retry loop for them.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Driver { .. })
    }
}

/// Top-level errors for scenario loading and replay orchestration.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("scenario not found: {0}")]
    ScenarioNotFound(PathBuf),

    #[error("malformed scenario file: {0}")]
    ScenarioMalformed(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    ScenarioInvalid(String),

    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("target preparation failed: {0}")]
    TargetPreparation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("report serialization failed: {0}")]
    ReportSerialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
