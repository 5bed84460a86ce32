pub mod plan;
pub mod column;

pub use plan::*;
pub use column::*;
