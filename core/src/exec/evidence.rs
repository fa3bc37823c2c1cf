use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::driver::AutomationDriver;

/// Stage an evidence capture belongs to; part of the artifact file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    Before,
    After,
    OnError,
}

impl CaptureStage {
    fn as_str(self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::OnError => "error",
        }
    }
}

/// Deterministic artifact path for one action's capture, so parallel reruns
/// of the same scenario produce comparably-named artifacts.
pub fn evidence_path(dir: &Path, action_index: usize, stage: CaptureStage) -> PathBuf {
    dir.join(format!("action_{action_index:03}_{}.png", stage.as_str()))
}

/// Capture a screenshot through the driver. Best-effort: a capture failure
/// is logged and reported as `None`, never propagated — it must not alter
/// the action's own classification.
pub async fn capture(
    driver: &dyn AutomationDriver,
    dir: &Path,
    action_index: usize,
    stage: CaptureStage,
    target_id: &str,
) -> Option<String> {
    let path = evidence_path(dir, action_index, stage);
    let path_str = path.to_string_lossy().to_string();

    let mut params = Map::new();
    params.insert("filename".to_string(), json!(path_str.clone()));

    match driver.invoke("screenshot", &params, target_id).await {
        Ok(_) => Some(path_str),
        Err(fault) => {
            tracing::warn!(
                action_index,
                stage = stage.as_str(),
                error.message = %fault,
                "evidence capture failed"
            );
            None
        }
    }
}
