use super::arena::ArenaSegments;
use crate::common::DomainResult;

/// Port the pursuit domain depends on for obstacle layouts.
/// Implementations (adapters) hand over a finished segment list; editing,
/// saving and history stay on their side.
pub trait ArenaSource: Send + Sync {
    fn load_segments(&self, name: &str) -> DomainResult<ArenaSegments>;
    fn list_arenas(&self) -> DomainResult<Vec<String>>;
}
