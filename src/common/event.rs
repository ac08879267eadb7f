pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    fn session_id(&self) -> &str;
    /// Simulation tick the event was raised on.
    fn tick(&self) -> u64;
}
