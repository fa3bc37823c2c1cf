pub mod context;
pub mod evidence;
pub mod retry;

pub use context::ExecutionContext;
pub use retry::{backoff_delay, max_attempts};
