use super::console_logger::init_console_logger;
use super::file_logger::init_file_logger;
use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Forwards every message to each of its sinks in order.
pub struct MultiLogger {
    sinks: Vec<DynLogger>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }
}

/// File sink plus console, or console alone when the file sink fails.
pub fn init_combined_logger(path: &str) -> DynLogger {
    let console = init_console_logger();
    match init_file_logger(path) {
        Ok(file) => Arc::new(MultiLogger::new(vec![file, console])) as Arc<dyn DomainLogger>,
        Err(e) => {
            console.warn(&format!("{}; logging to console only", e));
            console
        }
    }
}
