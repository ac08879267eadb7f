use crate::domains::logger::{DomainLogger, DynLogger, FileLogger};
use log::LevelFilter;
use std::sync::Arc;

/// Install the fast_log file sink and hand back a logger to inject into the
/// service and session.
pub fn init_file_logger(path: &str) -> Result<DynLogger, String> {
    FileLogger::init(path, LevelFilter::Info)
        .map_err(|e| format!("Failed to initialize fast_log at {}: {}", path, e))?;
    Ok(Arc::new(FileLogger) as Arc<dyn DomainLogger>)
}
