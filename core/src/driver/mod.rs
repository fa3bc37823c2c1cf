pub mod traits;

pub use traits::{AutomationDriver, NullDriver};
