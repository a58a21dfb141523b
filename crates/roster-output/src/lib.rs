mod diagnostics;
mod formatters;

pub use diagnostics::*;
pub use formatters::*;
