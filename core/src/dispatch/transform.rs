use serde_json::{Map, Value};

/// Rewrite recorded parameter names into the driver's native argument names.
///
/// Always returns a fresh map: the caller-supplied mapping is recorded
/// verbatim in the report and must never be mutated here.
pub fn transform_parameters(tool_name: &str, parameters: &Map<String, Value>) -> Map<String, Value> {
    let mut out = parameters.clone();

    // The recorder stores the screenshot destination as 'filepath'; the
    // driver argument is 'filename'.
    if tool_name == "screenshot" && !out.contains_key("filename") {
        if let Some(path) = out.remove("filepath") {
            out.insert("filename".to_string(), path);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn params(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn screenshot_filepath_becomes_filename() {
        let original = params(&[("filepath", json!("/tmp/shot.png"))]);
        let out = transform_parameters("screenshot", &original);

        assert_eq!(out.get("filename"), Some(&json!("/tmp/shot.png")));
        assert!(!out.contains_key("filepath"));
        // Caller's map is untouched.
        assert_eq!(original.get("filepath"), Some(&json!("/tmp/shot.png")));
    }

    #[test]
    fn explicit_filename_wins_over_filepath() {
        let original = params(&[
            ("filepath", json!("/tmp/old.png")),
            ("filename", json!("/tmp/new.png")),
        ]);
        let out = transform_parameters("screenshot", &original);
        assert_eq!(out.get("filename"), Some(&json!("/tmp/new.png")));
        assert_eq!(out.get("filepath"), Some(&json!("/tmp/old.png")));
    }

    #[test]
    fn other_tools_pass_through() {
        let original = params(&[("selector", json!("Login")), ("filepath", json!("x"))]);
        let out = transform_parameters("click", &original);
        assert_eq!(out, original);
    }

    #[test]
    fn empty_params_stay_empty() {
        let out = transform_parameters("screenshot", &Map::new());
        assert!(out.is_empty());
    }
}
