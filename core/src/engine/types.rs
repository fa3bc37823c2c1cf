/// Lifecycle phase of one replay run. Transitions are linear, with no
/// branching back-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayPhase {
    Uninitialized,
    ScenarioLoaded,
    TargetPrepared,
    Executing,
    Finalized,
}

impl ReplayPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::ScenarioLoaded => "scenario_loaded",
            Self::TargetPrepared => "target_prepared",
            Self::Executing => "executing",
            Self::Finalized => "finalized",
        }
    }
}
