use std::path::Path;

use serde_json::Value;

use crate::error::ReplayError;

use super::model::Scenario;

/// Load and exhaustively validate a scenario file.
///
/// Validation runs to completion before any action executes: a structurally
/// invalid scenario never begins replay. Required top-level fields are
/// `session_id`, `target_id` and the `actions` list.
pub fn load_scenario(path: &Path) -> Result<Scenario, ReplayError> {
    if !path.exists() {
        return Err(ReplayError::ScenarioNotFound(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&raw)?;

    validate_document(&doc)?;

    let scenario: Scenario = serde_json::from_value(doc)?;
    Ok(scenario)
}

fn validate_document(doc: &Value) -> Result<(), ReplayError> {
    let obj = doc
        .as_object()
        .ok_or_else(|| ReplayError::ScenarioInvalid("top level must be an object".to_string()))?;

    for field in ["session_id", "target_id"] {
        match obj.get(field) {
            None => {
                return Err(ReplayError::ScenarioInvalid(format!(
                    "missing required field '{field}'"
                )))
            }
            Some(v) if !v.is_string() => {
                return Err(ReplayError::ScenarioInvalid(format!(
                    "field '{field}' must be a string"
                )))
            }
            Some(_) => {}
        }
    }

    match obj.get("actions") {
        None => {
            return Err(ReplayError::ScenarioInvalid(
                "missing required field 'actions'".to_string(),
            ))
        }
        Some(v) if !v.is_array() => {
            return Err(ReplayError::ScenarioInvalid(
                "field 'actions' must be a list".to_string(),
            ))
        }
        Some(_) => {}
    }

    // Per-action shape checks, indexed so the recorder bug is locatable.
    if let Some(actions) = obj.get("actions").and_then(|v| v.as_array()) {
        for (idx, action) in actions.iter().enumerate() {
            let a = action.as_object().ok_or_else(|| {
                ReplayError::ScenarioInvalid(format!("action {idx} must be an object"))
            })?;
            match a.get("tool") {
                Some(v) if v.is_string() => {}
                _ => {
                    return Err(ReplayError::ScenarioInvalid(format!(
                        "action {idx} is missing a string 'tool' field"
                    )))
                }
            }
            if let Some(p) = a.get("params") {
                if !p.is_object() {
                    return Err(ReplayError::ScenarioInvalid(format!(
                        "action {idx}: 'params' must be an object"
                    )));
                }
            }
            for field in ["delay_before_ms", "delay_after_ms"] {
                if let Some(v) = a.get(field) {
                    if !v.is_u64() {
                        return Err(ReplayError::ScenarioInvalid(format!(
                            "action {idx}: '{field}' must be a non-negative integer"
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_scenario(json: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tempfile");
        f.write_all(json.as_bytes()).expect("write scenario");
        f
    }

    #[test]
    fn loads_minimal_scenario() {
        let f = write_scenario(
            r#"{"session_id": "s1", "target_id": "emu-1", "actions": []}"#,
        );
        let s = load_scenario(f.path()).expect("load");
        assert_eq!(s.session_id, "s1");
        assert_eq!(s.target_id, "emu-1");
        assert!(s.actions.is_empty());
        assert!(s.recorded_at.is_none());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_scenario(Path::new("/nonexistent/scenario.json")).unwrap_err();
        assert!(matches!(err, ReplayError::ScenarioNotFound(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        let f = write_scenario("{not json");
        let err = load_scenario(f.path()).unwrap_err();
        assert!(matches!(err, ReplayError::ScenarioMalformed(_)));
    }

    #[test]
    fn missing_actions_field_is_invalid() {
        let f = write_scenario(r#"{"session_id": "s1", "target_id": "emu-1"}"#);
        let err = load_scenario(f.path()).unwrap_err();
        match err {
            ReplayError::ScenarioInvalid(msg) => assert!(msg.contains("actions"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn actions_must_be_a_list() {
        let f = write_scenario(
            r#"{"session_id": "s1", "target_id": "emu-1", "actions": "oops"}"#,
        );
        let err = load_scenario(f.path()).unwrap_err();
        match err {
            ReplayError::ScenarioInvalid(msg) => assert!(msg.contains("must be a list"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mistyped_session_id_is_invalid() {
        let f = write_scenario(r#"{"session_id": 7, "target_id": "emu-1", "actions": []}"#);
        let err = load_scenario(f.path()).unwrap_err();
        match err {
            ReplayError::ScenarioInvalid(msg) => {
                assert!(msg.contains("session_id"), "{msg}")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn action_without_tool_is_invalid() {
        let f = write_scenario(
            r#"{"session_id": "s1", "target_id": "emu-1", "actions": [{"params": {}}]}"#,
        );
        let err = load_scenario(f.path()).unwrap_err();
        match err {
            ReplayError::ScenarioInvalid(msg) => assert!(msg.contains("action 0"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_delay_is_invalid() {
        let f = write_scenario(
            r#"{
                "session_id": "s1",
                "target_id": "emu-1",
                "actions": [{"tool": "click", "delay_before_ms": -200}]
            }"#,
        );
        let err = load_scenario(f.path()).unwrap_err();
        match err {
            ReplayError::ScenarioInvalid(msg) => {
                assert!(msg.contains("action 0"), "{msg}");
                assert!(msg.contains("delay_before_ms"), "{msg}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fractional_delay_is_invalid() {
        let f = write_scenario(
            r#"{
                "session_id": "s1",
                "target_id": "emu-1",
                "actions": [{"tool": "click", "delay_after_ms": 1.5}]
            }"#,
        );
        let err = load_scenario(f.path()).unwrap_err();
        match err {
            ReplayError::ScenarioInvalid(msg) => assert!(msg.contains("delay_after_ms"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn delays_default_to_zero() {
        let f = write_scenario(
            r#"{
                "session_id": "s1",
                "target_id": "emu-1",
                "recorded_at": "2026-05-11T10:00:00Z",
                "actions": [{"tool": "click", "params": {"selector": "Login"}}]
            }"#,
        );
        let s = load_scenario(f.path()).expect("load");
        assert_eq!(s.actions.len(), 1);
        assert_eq!(s.actions[0].delay_before_ms, 0);
        assert_eq!(s.actions[0].delay_after_ms, 0);
        assert_eq!(s.recorded_at.as_deref(), Some("2026-05-11T10:00:00Z"));
    }
}
