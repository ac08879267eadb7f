use pursuit_app::adapters::outbound::{init_combined_logger, FilesystemArenaSource};
use pursuit_app::application::SimulationService;
use pursuit_app::domains::arena::ArenaSource;
use pursuit_app::Config;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SUMMARY_EVERY: u64 = 60;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // `log` records belong to fast_log, so no LogTracer bridge here
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting pursuit-app");

    let config = if Path::new("config.toml").exists() {
        Config::load("config.toml")?
    } else {
        info!("config.toml not found, running the built-in demo");
        Config::default()
    };

    let logger = init_combined_logger(&config.logging.file);
    let source: Arc<dyn ArenaSource> = Arc::new(FilesystemArenaSource::new(config.arena.data_dir.clone()));
    match source.list_arenas() {
        Ok(names) if !names.is_empty() => info!("Available arenas: {}", names.join(", ")),
        Ok(_) => {}
        Err(e) => error!("Failed to list arenas: {}", e),
    }

    let mut service = SimulationService::from_config(&config, source, logger.clone())?;
    info!(
        "Session {} running: {} pursuers, {} walls",
        service.session().id(),
        service.session().agents().len(),
        service.session().arena().walls().len()
    );

    let mut ticker = tokio::time::interval(Duration::from_millis(config.simulation.tick_interval_ms.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = service.step();
                if frame.tick % SUMMARY_EVERY == 0 {
                    info!(
                        "tick {}: target at {}, {} replans so far",
                        frame.tick,
                        frame.target,
                        service.overview().replans
                    );
                }
                if service.is_finished() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    let overview = service.overview();
    logger.info(&format!(
        "session {} finished after {} ticks: {} replans, {} lost routes, {} blocked moves",
        overview.session_id,
        service.session().ticks(),
        overview.replans,
        overview.routes_lost,
        overview.blocked_moves
    ));
    info!("Shutting down pursuit-app");
    Ok(())
}
