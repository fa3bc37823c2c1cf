pub mod model;
#[allow(clippy::module_inception)]
pub mod report;

pub use model::{ActionResult, ActionStatus, ExecutionMetrics, ScenarioMetadata};
pub use report::{ExecutionStats, ReplayReport, ReportDoc};
