pub mod intersect;
pub mod point;
pub mod wall;

pub use intersect::*;
pub use point::*;
pub use wall::*;
