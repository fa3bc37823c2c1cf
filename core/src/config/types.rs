use serde::{Deserialize, Serialize};

/// Speed multipliers below this are treated as this value when scaling
/// delays, so a bad config can slow a run down but never stall it forever.
pub const MIN_SPEED_MULTIPLIER: f64 = 0.01;

/// Caller-supplied replay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Attempts per action beyond the first. 0 means exactly one attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff delay; doubles before each further retry.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Upper bound on a single backoff delay.
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,

    /// Scales recorded delays: > 1 speeds the run up, < 1 slows it down.
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,

    /// Abort the run at the first failed action instead of continuing.
    #[serde(default)]
    pub stop_on_error: bool,

    #[serde(default)]
    pub capture: CaptureConfig,

    /// Run idempotent target preparation (screen on) before the first action.
    #[serde(default = "default_prepare_target")]
    pub prepare_target: bool,

    /// Directory evidence captures are written under.
    #[serde(default = "default_evidence_dir")]
    pub evidence_dir: String,
}

/// Independently togglable evidence captures around each action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default)]
    pub before: bool,

    #[serde(default)]
    pub after: bool,

    #[serde(default = "default_capture_on_error")]
    pub on_error: bool,
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

fn default_retry_max_delay_ms() -> u64 {
    60_000
}

fn default_speed_multiplier() -> f64 {
    1.0
}

fn default_prepare_target() -> bool {
    true
}

fn default_evidence_dir() -> String {
    "replay_evidence".to_string()
}

fn default_capture_on_error() -> bool {
    true
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
            speed_multiplier: default_speed_multiplier(),
            stop_on_error: false,
            capture: CaptureConfig::default(),
            prepare_target: default_prepare_target(),
            evidence_dir: default_evidence_dir(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            before: false,
            after: false,
            on_error: default_capture_on_error(),
        }
    }
}

impl ReplayConfig {
    /// Speed multiplier with the positive-minimum clamp applied.
    pub fn effective_speed(&self) -> f64 {
        if self.speed_multiplier < MIN_SPEED_MULTIPLIER {
            MIN_SPEED_MULTIPLIER
        } else {
            self.speed_multiplier
        }
    }
}
