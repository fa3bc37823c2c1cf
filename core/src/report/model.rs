use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scenario::Scenario;

/// Outcome classification of one action execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Failed,
    Skipped,
}

/// Per-action timing data. Created fresh for every execution; never shared
/// or mutated after the action completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration across all attempts, backoff sleeps included.
    pub duration_ms: u64,

    /// Attempts beyond the first.
    pub retry_count: u32,

    /// Whether at least one evidence capture succeeded for this action.
    pub screenshot_captured: bool,
}

/// Result of one action, appended in execution order to the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_index: usize,
    pub tool_name: String,

    /// The recorded parameters exactly as loaded, never the transformed copy.
    pub parameters: Map<String, Value>,

    pub status: ActionStatus,

    /// Opaque driver payload on success.
    pub result: Option<Value>,

    pub error: Option<String>,

    pub metrics: ExecutionMetrics,

    pub screenshot_before: Option<String>,
    pub screenshot_after: Option<String>,
    pub screenshot_on_error: Option<String>,
}

/// Snapshot of scenario metadata, independent of how many actions ran.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioMetadata {
    pub session_id: String,
    pub target_id: String,
    pub recorded_at: Option<String>,
    pub total_recorded_actions: usize,
}

impl ScenarioMetadata {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            session_id: scenario.session_id.clone(),
            target_id: scenario.target_id.clone(),
            recorded_at: scenario.recorded_at.clone(),
            total_recorded_actions: scenario.actions.len(),
        }
    }
}
