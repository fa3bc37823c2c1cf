#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use uireplay_core::api::{AutomationDriver, DriverFault};

/// Route tracing output through the test harness so it shows up with
/// failing tests. Honors `RUST_LOG`; repeated calls are a no-op.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One recorded driver invocation, in call order.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub tool: String,
    pub params: Map<String, Value>,
    pub target_id: String,
}

#[derive(Default)]
struct ScriptState {
    /// Remaining scripted failures per tool name.
    failures_left: HashMap<String, u32>,
    /// Tools that fail on every invocation.
    always_fail: Vec<String>,
    calls: Vec<RecordedCall>,
}

/// In-memory automation driver with scriptable per-tool failures.
///
/// Succeeds with `true` by default and records every invocation so tests can
/// assert on what actually reached the driver.
#[derive(Default)]
pub struct ScriptedDriver {
    state: Mutex<ScriptState>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    /// The next `times` invocations of `tool` fail, then it succeeds again.
    pub fn fail_tool_times(&self, tool: &str, times: u32) {
        self.state
            .lock()
            .unwrap()
            .failures_left
            .insert(tool.to_string(), times);
    }

    /// Every invocation of `tool` fails.
    pub fn always_fail_tool(&self, tool: &str) {
        self.state.lock().unwrap().always_fail.push(tool.to_string());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_for(&self, tool: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.tool == tool).collect()
    }
}

#[async_trait]
impl AutomationDriver for ScriptedDriver {
    async fn invoke(
        &self,
        tool: &str,
        params: &Map<String, Value>,
        target_id: &str,
    ) -> Result<Value, DriverFault> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            tool: tool.to_string(),
            params: params.clone(),
            target_id: target_id.to_string(),
        });

        if state.always_fail.iter().any(|t| t == tool) {
            return Err(DriverFault::new(format!("scripted failure for '{tool}'")));
        }
        if let Some(left) = state.failures_left.get_mut(tool) {
            if *left > 0 {
                *left -= 1;
                return Err(DriverFault::new(format!("scripted failure for '{tool}'")));
            }
        }
        Ok(json!(true))
    }
}

/// Write a scenario JSON document to a temp file.
pub fn scenario_file(session_id: &str, target_id: &str, actions: Value) -> tempfile::NamedTempFile {
    let doc = json!({
        "session_id": session_id,
        "target_id": target_id,
        "recorded_at": "2026-05-11T10:00:00Z",
        "actions": actions,
    });
    raw_scenario_file(&serde_json::to_string_pretty(&doc).expect("serialize scenario"))
}

/// Write arbitrary bytes as a scenario file (for malformed-input tests).
pub fn raw_scenario_file(content: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("tempfile");
    f.write_all(content.as_bytes()).expect("write scenario");
    f
}

/// n click actions with no recorded delays.
pub fn click_actions(n: usize) -> Value {
    let actions: Vec<Value> = (0..n)
        .map(|i| json!({"tool": "click", "params": {"selector": format!("item-{i}")}}))
        .collect();
    json!(actions)
}
