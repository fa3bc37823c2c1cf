use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A previously recorded sequence of device-interaction actions.
///
/// Immutable once loaded; owned by the replay engine for the duration of one
/// run. Produced by the external recording subsystem as a JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub session_id: String,

    /// Identifier of the device/emulator the scenario was recorded against.
    pub target_id: String,

    /// Timestamp written by the recorder; tolerated absent.
    #[serde(default)]
    pub recorded_at: Option<String>,

    pub actions: Vec<Action>,
}

/// One recorded step: a tool name, its parameters, and delay hints.
///
/// Parameters are opaque to the engine and meaningful only to the dispatcher
/// and the automation driver behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub tool: String,

    #[serde(default)]
    pub params: Map<String, Value>,

    #[serde(default)]
    pub delay_before_ms: u64,

    #[serde(default)]
    pub delay_after_ms: u64,
}

impl Action {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            params: Map::new(),
            delay_before_ms: 0,
            delay_after_ms: 0,
        }
    }
}
