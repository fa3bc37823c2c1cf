use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Map;
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::ReplayConfig;
use crate::dispatch::ActionDispatcher;
use crate::driver::AutomationDriver;
use crate::error::ReplayError;
use crate::exec::ExecutionContext;
use crate::report::{ActionStatus, ReplayReport, ReportDoc};
use crate::scenario::{load_scenario, Scenario};

use super::types::ReplayPhase;

/// Pause after switching the target's screen on, before the first action.
const TARGET_SETTLE_MS: u64 = 1000;

/// Owns the end-to-end lifecycle of one replay run: load and validate the
/// scenario, prepare the target, iterate actions through the execution
/// context, and finalize the report.
///
/// A replay invocation never raises: every fault that escapes the run body
/// (load failure, target preparation, internal errors) is recorded as a
/// scenario-level error and a finalized failed report is still produced.
/// Callers that want the load error itself can call [`ReplayEngine::load`]
/// first.
pub struct ReplayEngine {
    config: ReplayConfig,
    driver: Arc<dyn AutomationDriver>,
    dispatcher: Arc<ActionDispatcher>,
    target_override: Option<String>,
    phase: ReplayPhase,
}

impl ReplayEngine {
    pub fn new(driver: Arc<dyn AutomationDriver>, config: ReplayConfig) -> Self {
        let dispatcher = Arc::new(ActionDispatcher::new(driver.clone()));
        Self {
            config,
            driver,
            dispatcher,
            target_override: None,
            phase: ReplayPhase::Uninitialized,
        }
    }

    /// Engine with a caller-built dispatcher, e.g. a narrowed registry.
    pub fn with_dispatcher(
        driver: Arc<dyn AutomationDriver>,
        dispatcher: Arc<ActionDispatcher>,
        config: ReplayConfig,
    ) -> Self {
        Self {
            config,
            driver,
            dispatcher,
            target_override: None,
            phase: ReplayPhase::Uninitialized,
        }
    }

    /// Drive a different target than the one named in the scenario.
    pub fn with_target_override(mut self, target_id: impl Into<String>) -> Self {
        self.target_override = Some(target_id.into());
        self
    }

    pub fn phase(&self) -> ReplayPhase {
        self.phase
    }

    /// Load and validate a scenario without running it.
    pub fn load(&self, scenario_path: &Path) -> Result<Scenario, ReplayError> {
        load_scenario(scenario_path)
    }

    /// Execute one full replay run. Always returns a finalized report.
    pub async fn replay(&mut self, scenario_path: &Path) -> ReportDoc {
        let run_id = Uuid::new_v4().to_string();
        let mut report = ReplayReport::new(&run_id);
        let start = Instant::now();
        self.phase = ReplayPhase::Uninitialized;

        tracing::info!(run_id = %run_id, scenario = %scenario_path.display(), "replay starting");

        if let Err(err) = self.run_inner(scenario_path, &run_id, &mut report).await {
            tracing::warn!(run_id = %run_id, error.message = %err, "replay aborted");
            report.add_global_error(format!("replay error: {err}"));
        }

        self.transition(ReplayPhase::Finalized, &run_id);
        let doc = report.generate(start.elapsed().as_millis() as u64);
        tracing::info!(
            run_id = %run_id,
            success = doc.success,
            total = doc.execution.total_actions,
            failed = doc.execution.failed_actions,
            "replay finished"
        );
        doc
    }

    async fn run_inner(
        &mut self,
        scenario_path: &Path,
        run_id: &str,
        report: &mut ReplayReport,
    ) -> Result<(), ReplayError> {
        let scenario = self.load(scenario_path)?;
        report.set_scenario_metadata(&scenario);
        self.transition(ReplayPhase::ScenarioLoaded, run_id);

        let target_id = self
            .target_override
            .clone()
            .unwrap_or_else(|| scenario.target_id.clone());

        if self.config.prepare_target {
            self.prepare_target(&target_id).await?;
        }
        self.transition(ReplayPhase::TargetPrepared, run_id);

        let ctx = ExecutionContext::new(
            self.dispatcher.clone(),
            self.driver.clone(),
            self.config.clone(),
            target_id,
        );

        self.transition(ReplayPhase::Executing, run_id);
        let total = scenario.actions.len();
        for (idx, action) in scenario.actions.iter().enumerate() {
            self.pause(action.delay_before_ms).await;

            let result = ctx.execute(action, idx).await;
            let failed = result.status == ActionStatus::Failed;
            report.add_action_result(result);

            if failed && self.config.stop_on_error {
                tracing::info!(
                    run_id = %run_id,
                    action_index = idx,
                    "stopping replay on first failed action"
                );
                break;
            }

            // The last action never applies a trailing delay.
            if idx + 1 < total {
                self.pause(action.delay_after_ms).await;
            }
        }

        Ok(())
    }

    /// Idempotent pre-conditions on the target before the first action.
    async fn prepare_target(&self, target_id: &str) -> Result<(), ReplayError> {
        self.dispatcher
            .dispatch("screen_on", &Map::new(), target_id)
            .await
            .map_err(|e| ReplayError::TargetPreparation(e.to_string()))?;
        self.pause(TARGET_SETTLE_MS).await;
        Ok(())
    }

    /// Cooperative pause scaled by the speed multiplier.
    async fn pause(&self, delay_ms: u64) {
        if delay_ms == 0 {
            return;
        }
        let scaled = delay_ms as f64 / 1000.0 / self.config.effective_speed();
        tokio::time::sleep(Duration::from_secs_f64(scaled)).await;
    }

    fn transition(&mut self, next: ReplayPhase, run_id: &str) {
        tracing::debug!(
            run_id = %run_id,
            from = self.phase.as_str(),
            to = next.as_str(),
            "phase transition"
        );
        self.phase = next;
    }
}
