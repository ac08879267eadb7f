pub mod graph;
pub mod topology;

pub use graph::*;
pub use topology::*;
