pub mod registry;
pub mod transform;

pub use registry::{ActionDispatcher, DispatcherBuilder, ToolCategory, ToolSpec};
pub use transform::transform_parameters;
