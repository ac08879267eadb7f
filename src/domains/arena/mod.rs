pub mod arena;
pub mod ports;

pub use arena::*;
pub use ports::*;
