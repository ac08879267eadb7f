pub mod arena;
pub mod geometry;
pub mod logger;
pub mod pursuit;
pub mod visibility;

pub use logger::{DomainLogger, DynLogger, FileLogger};
