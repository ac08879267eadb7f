pub mod pointer;
pub mod simulation_service;

pub use pointer::*;
pub use simulation_service::*;
