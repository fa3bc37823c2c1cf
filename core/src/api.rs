//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `uireplay_core::api` instead of reaching into internal modules.

pub use crate::config::{load_config, CaptureConfig, ReplayConfig};
pub use crate::dispatch::{ActionDispatcher, DispatcherBuilder, ToolCategory, ToolSpec};
pub use crate::driver::{AutomationDriver, NullDriver};
pub use crate::engine::{ReplayEngine, ReplayPhase};
pub use crate::error::{DispatchError, DriverFault, ReplayError};
pub use crate::exec::ExecutionContext;
pub use crate::report::{
    ActionResult, ActionStatus, ExecutionMetrics, ExecutionStats, ReplayReport, ReportDoc,
    ScenarioMetadata,
};
pub use crate::scenario::{load_scenario, Action, Scenario};
