pub mod run;
pub mod types;

pub use run::ReplayEngine;
pub use types::ReplayPhase;
