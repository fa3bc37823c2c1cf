use std::time::Duration;

/// Total attempts for a configured retry count. `retries = 0` means exactly
/// one attempt.
pub fn max_attempts(retries: u32) -> u32 {
    retries.saturating_add(1)
}

/// Backoff delay inserted before retry `retry_index` (1-based: the delay
/// before the first retry has index 1).
///
/// Grows as `base * 2^(retry_index - 1)` and is capped at `max_delay_ms`.
/// Strictly increasing below the cap. No delay is ever inserted after the
/// final attempt; callers only ask for a delay when another attempt follows.
pub fn backoff_delay(base_delay_ms: u64, max_delay_ms: u64, retry_index: u32) -> Duration {
    debug_assert!(retry_index >= 1);
    let exponent = retry_index.saturating_sub(1).min(63);
    let delay = base_delay_ms.saturating_mul(1u64.checked_shl(exponent).unwrap_or(u64::MAX));
    Duration::from_millis(delay.min(max_delay_ms))
}
