mod registry;
mod selectors;

pub use registry::{ModelRegistry, ModelSpec, TargetModel};
pub use selectors::{ModelSelection, ModelSelector};
