pub mod load;
pub mod types;

pub use load::load_config;
pub use types::{CaptureConfig, ReplayConfig};
