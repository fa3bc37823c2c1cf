use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;

use crate::config::ReplayConfig;
use crate::dispatch::ActionDispatcher;
use crate::driver::AutomationDriver;
use crate::report::{ActionResult, ActionStatus, ExecutionMetrics};
use crate::scenario::Action;

use super::evidence::{self, CaptureStage};
use super::retry::{backoff_delay, max_attempts};

/// Wraps a single dispatch call with retry, timing and evidence-capture
/// policy, turning it into one `ActionResult`.
///
/// Never errors: driver faults, unknown tools and capture failures all end
/// up inside the result rather than crashing the replay engine.
pub struct ExecutionContext {
    dispatcher: Arc<ActionDispatcher>,
    driver: Arc<dyn AutomationDriver>,
    config: ReplayConfig,
    target_id: String,
    evidence_dir: PathBuf,
}

impl ExecutionContext {
    pub fn new(
        dispatcher: Arc<ActionDispatcher>,
        driver: Arc<dyn AutomationDriver>,
        config: ReplayConfig,
        target_id: impl Into<String>,
    ) -> Self {
        let evidence_dir = PathBuf::from(&config.evidence_dir);
        let capture = &config.capture;
        if capture.before || capture.after || capture.on_error {
            // Best-effort: capture itself already tolerates a missing dir.
            if let Err(e) = std::fs::create_dir_all(&evidence_dir) {
                tracing::warn!(
                    dir = %evidence_dir.display(),
                    error.message = %e,
                    "could not create evidence directory"
                );
            }
        }
        Self {
            dispatcher,
            driver,
            config,
            target_id: target_id.into(),
            evidence_dir,
        }
    }

    /// Execute one action: dispatch with retries and exponential backoff,
    /// capture configured evidence, and measure the whole thing.
    pub async fn execute(&self, action: &Action, action_index: usize) -> ActionResult {
        let mut screenshot_before = None;
        let mut screenshot_after = None;
        let mut screenshot_on_error = None;

        if self.config.capture.before {
            screenshot_before = self.capture(action_index, CaptureStage::Before).await;
        }

        let started_at = Utc::now();
        let start = Instant::now();
        let attempts = max_attempts(self.config.max_retries);

        let mut last_error: Option<String> = None;
        let mut retry_count = 0u32;
        let mut outcome = None;

        for attempt in 0..attempts {
            retry_count = attempt;
            match self
                .dispatcher
                .dispatch(&action.tool, &action.params, &self.target_id)
                .await
            {
                Ok(value) => {
                    outcome = Some(value);
                    break;
                }
                Err(err) => {
                    tracing::debug!(
                        action_index,
                        tool = %action.tool,
                        attempt,
                        error.message = %err,
                        "action attempt failed"
                    );
                    let retryable = err.is_retryable();
                    last_error = Some(err.to_string());
                    if !retryable {
                        // Unknown tool: every attempt would fail identically.
                        break;
                    }
                    // Backoff only precedes a retry that will actually occur.
                    if attempt + 1 < attempts {
                        let delay = backoff_delay(
                            self.config.retry_base_delay_ms,
                            self.config.retry_max_delay_ms,
                            attempt + 1,
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        let succeeded = outcome.is_some();
        let duration_ms = start.elapsed().as_millis() as u64;

        if succeeded && self.config.capture.after {
            screenshot_after = self.capture(action_index, CaptureStage::After).await;
        }
        if !succeeded && self.config.capture.on_error {
            screenshot_on_error = self.capture(action_index, CaptureStage::OnError).await;
        }
        let screenshot_captured = screenshot_before.is_some()
            || screenshot_after.is_some()
            || screenshot_on_error.is_some();

        ActionResult {
            action_index,
            tool_name: action.tool.clone(),
            parameters: action.params.clone(),
            status: if succeeded {
                ActionStatus::Success
            } else {
                ActionStatus::Failed
            },
            result: outcome,
            error: if succeeded { None } else { last_error },
            metrics: ExecutionMetrics {
                started_at,
                duration_ms,
                retry_count,
                screenshot_captured,
            },
            screenshot_before,
            screenshot_after,
            screenshot_on_error,
        }
    }

    async fn capture(&self, action_index: usize, stage: CaptureStage) -> Option<String> {
        evidence::capture(
            self.driver.as_ref(),
            &self.evidence_dir,
            action_index,
            stage,
            &self.target_id,
        )
        .await
    }
}
