pub mod load;
pub mod model;

pub use load::load_scenario;
pub use model::{Action, Scenario};
