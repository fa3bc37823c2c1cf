use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReplayError;
use crate::scenario::Scenario;

use super::model::{ActionResult, ActionStatus, ScenarioMetadata};

/// Derived statistics block of a finished replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Whole-run duration, load and preparation included.
    pub duration_ms: u64,
    pub total_actions: usize,
    pub successful_actions: usize,
    pub failed_actions: usize,
    pub skipped_actions: usize,
    /// Fraction in [0,1]; 0 when no actions ran.
    pub success_rate: f64,
    pub total_retries: u64,
    pub avg_action_duration_ms: f64,
}

/// Serialized replay report artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDoc {
    pub run_id: String,
    pub success: bool,
    pub scenario: ScenarioMetadata,
    pub execution: ExecutionStats,
    pub action_results: Vec<ActionResult>,
    pub errors: Vec<String>,
    /// Failed subset repeated for quick triage.
    pub failed: Vec<ActionResult>,
}

/// Accumulates per-action results and scenario metadata over one replay run.
///
/// Both lists are append-only; insertion order of action results is the
/// authoritative execution order. Statistics are derived in [`generate`],
/// never stored, so the summary cannot drift from the raw results.
///
/// [`generate`]: ReplayReport::generate
#[derive(Debug, Default)]
pub struct ReplayReport {
    run_id: String,
    scenario: ScenarioMetadata,
    action_results: Vec<ActionResult>,
    global_errors: Vec<String>,
}

impl ReplayReport {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Default::default()
        }
    }

    pub fn set_scenario_metadata(&mut self, scenario: &Scenario) {
        self.scenario = ScenarioMetadata::from_scenario(scenario);
    }

    pub fn add_action_result(&mut self, result: ActionResult) {
        self.action_results.push(result);
    }

    /// Record a scenario-level error not tied to a specific action.
    pub fn add_global_error(&mut self, error: impl Into<String>) {
        self.global_errors.push(error.into());
    }

    pub fn action_results(&self) -> &[ActionResult] {
        &self.action_results
    }

    pub fn global_errors(&self) -> &[String] {
        &self.global_errors
    }

    /// Compute the final report document. Pure over the current state:
    /// calling it twice without adding results yields identical output.
    pub fn generate(&self, run_duration_ms: u64) -> ReportDoc {
        let total = self.action_results.len();
        let successful = self.count(ActionStatus::Success);
        let failed = self.count(ActionStatus::Failed);
        let skipped = self.count(ActionStatus::Skipped);

        let success_rate = if total > 0 {
            round_to(successful as f64 / total as f64, 4)
        } else {
            0.0
        };

        let total_retries: u64 = self
            .action_results
            .iter()
            .map(|r| u64::from(r.metrics.retry_count))
            .sum();

        let avg_action_duration_ms = if total > 0 {
            let sum: u64 = self.action_results.iter().map(|r| r.metrics.duration_ms).sum();
            round_to(sum as f64 / total as f64, 2)
        } else {
            0.0
        };

        let failed_results: Vec<ActionResult> = self
            .action_results
            .iter()
            .filter(|r| r.status == ActionStatus::Failed)
            .cloned()
            .collect();

        ReportDoc {
            run_id: self.run_id.clone(),
            success: self.global_errors.is_empty() && failed == 0,
            scenario: self.scenario.clone(),
            execution: ExecutionStats {
                duration_ms: run_duration_ms,
                total_actions: total,
                successful_actions: successful,
                failed_actions: failed,
                skipped_actions: skipped,
                success_rate,
                total_retries,
                avg_action_duration_ms,
            },
            action_results: self.action_results.clone(),
            errors: self.global_errors.clone(),
            failed: failed_results,
        }
    }

    fn count(&self, status: ActionStatus) -> usize {
        self.action_results
            .iter()
            .filter(|r| r.status == status)
            .count()
    }
}

impl ReportDoc {
    /// Persist the report as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(self)
            .map_err(|e| ReplayError::ReportSerialization(e.to_string()))?;
        std::fs::write(path, body)?;
        Ok(())
    }

    /// Short human-readable summary for terminal output.
    pub fn format_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Replay report {}\n", self.run_id));
        out.push_str(&format!(
            "scenario: {} on {}\n",
            self.scenario.session_id, self.scenario.target_id
        ));
        out.push_str(&format!("success: {}\n", self.success));
        out.push_str(&format!(
            "actions: {} ok / {} failed / {} skipped of {}\n",
            self.execution.successful_actions,
            self.execution.failed_actions,
            self.execution.skipped_actions,
            self.execution.total_actions,
        ));
        out.push_str(&format!(
            "success_rate: {:.4}  retries: {}  avg_action_ms: {:.2}\n",
            self.execution.success_rate,
            self.execution.total_retries,
            self.execution.avg_action_duration_ms,
        ));
        for err in &self.errors {
            out.push_str(&format!("error: {err}\n"));
        }
        for r in &self.failed {
            out.push_str(&format!(
                "- action {} {}: {}\n",
                r.action_index,
                r.tool_name,
                r.error.as_deref().unwrap_or("unknown error"),
            ));
        }
        out
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    use crate::report::model::ExecutionMetrics;

    use super::*;

    fn result(index: usize, status: ActionStatus, retries: u32, duration_ms: u64) -> ActionResult {
        ActionResult {
            action_index: index,
            tool_name: "click".to_string(),
            parameters: Map::new(),
            status,
            result: None,
            error: match status {
                ActionStatus::Failed => Some("boom".to_string()),
                _ => None,
            },
            metrics: ExecutionMetrics {
                started_at: Utc::now(),
                duration_ms,
                retry_count: retries,
                screenshot_captured: false,
            },
            screenshot_before: None,
            screenshot_after: None,
            screenshot_on_error: None,
        }
    }

    #[test]
    fn empty_report_has_zero_rate_and_succeeds() {
        let report = ReplayReport::new("run-1");
        let doc = report.generate(0);

        assert_eq!(doc.execution.total_actions, 0);
        assert_eq!(doc.execution.success_rate, 0.0);
        assert_eq!(doc.execution.avg_action_duration_ms, 0.0);
        assert!(doc.success);
    }

    #[test]
    fn statistics_are_derived_from_results() {
        let mut report = ReplayReport::new("run-1");
        report.add_action_result(result(0, ActionStatus::Success, 0, 100));
        report.add_action_result(result(1, ActionStatus::Failed, 2, 300));
        report.add_action_result(result(2, ActionStatus::Success, 1, 200));

        let doc = report.generate(650);
        assert_eq!(doc.execution.total_actions, 3);
        assert_eq!(doc.execution.successful_actions, 2);
        assert_eq!(doc.execution.failed_actions, 1);
        assert_eq!(doc.execution.success_rate, 0.6667);
        assert_eq!(doc.execution.total_retries, 3);
        assert_eq!(doc.execution.avg_action_duration_ms, 200.0);
        assert!(!doc.success);
        assert_eq!(doc.failed.len(), 1);
        assert_eq!(doc.failed[0].action_index, 1);
    }

    #[test]
    fn all_success_rate_is_one() {
        let mut report = ReplayReport::new("run-1");
        report.add_action_result(result(0, ActionStatus::Success, 0, 10));
        report.add_action_result(result(1, ActionStatus::Success, 0, 20));

        let doc = report.generate(30);
        assert_eq!(doc.execution.success_rate, 1.0);
        assert!(doc.success);
        assert_eq!(doc.execution.total_retries, 0);
    }

    #[test]
    fn global_error_forces_failure() {
        let mut report = ReplayReport::new("run-1");
        report.add_action_result(result(0, ActionStatus::Success, 0, 10));
        report.add_global_error("target preparation failed");

        let doc = report.generate(10);
        assert!(!doc.success);
        assert_eq!(doc.errors, vec!["target preparation failed".to_string()]);
    }

    #[test]
    fn generate_is_idempotent() {
        let mut report = ReplayReport::new("run-1");
        report.add_action_result(result(0, ActionStatus::Success, 1, 50));
        report.add_action_result(result(1, ActionStatus::Failed, 3, 150));

        let first = report.generate(200);
        let second = report.generate(200);
        assert_eq!(
            serde_json::to_value(&first).expect("serialize"),
            serde_json::to_value(&second).expect("serialize"),
        );
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut report = ReplayReport::new("run-1");
        for i in 0..5 {
            report.add_action_result(result(i, ActionStatus::Success, 0, 1));
        }
        let doc = report.generate(5);
        let order: Vec<usize> = doc.action_results.iter().map(|r| r.action_index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("reports").join("nested").join("out.json");

        let report = ReplayReport::new("run-1");
        report.generate(0).save(&path).expect("save");

        let raw = std::fs::read_to_string(&path).expect("read back");
        let doc: ReportDoc = serde_json::from_str(&raw).expect("parse");
        assert_eq!(doc.run_id, "run-1");
    }
}
