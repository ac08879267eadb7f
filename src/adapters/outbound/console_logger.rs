use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

struct ConsoleBridge;

impl DomainLogger for ConsoleBridge {
    fn info(&self, msg: &str) { println!("[pursuit] {}", msg); }
    fn warn(&self, msg: &str) { println!("[pursuit] WARN: {}", msg); }
    fn error(&self, msg: &str) { eprintln!("[pursuit] ERROR: {}", msg); }
}

/// Console-backed logger, the fallback when no file sink can be opened.
pub fn init_console_logger() -> DynLogger {
    Arc::new(ConsoleBridge)
}
