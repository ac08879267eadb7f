pub mod agent;
pub mod events;
pub mod motion;
pub mod projections;
pub mod rules;
pub mod search;
pub mod session;

pub use agent::*;
pub use events::*;
pub use motion::*;
pub use projections::*;
pub use rules::*;
pub use search::*;
pub use session::*;
