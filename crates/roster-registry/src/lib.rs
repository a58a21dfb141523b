mod registry;
mod script;

pub use registry::*;
pub use script::*;
