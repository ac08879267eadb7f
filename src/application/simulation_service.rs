use super::pointer::PointerTrack;
use crate::common::{ApplicationResult, DomainEvent, DomainResult};
use crate::config::Config;
use crate::domains::arena::{Arena, ArenaSource};
use crate::domains::geometry::Point;
use crate::domains::logger::DynLogger;
use crate::domains::pursuit::{Frame, PursuitEvent, PursuitOverview, Session, SessionSetup};
use std::sync::Arc;

/// Drives a [`Session`] with a scripted pointer and folds its events into a
/// [`PursuitOverview`].
pub struct SimulationService {
    session: Session,
    pointer: PointerTrack,
    overview: PursuitOverview,
    logger: DynLogger,
    max_ticks: u64,
}

impl SimulationService {
    pub fn from_config(
        config: &Config,
        source: Arc<dyn ArenaSource>,
        logger: DynLogger,
    ) -> ApplicationResult<Self> {
        let (arena, label) = match &config.arena.name {
            Some(name) => (source.load_segments(name)?.into_arena()?, name.as_str()),
            None => (Arena::from_segments(&config.arena.walls)?, "inline"),
        };
        let target_start = Point::from(config.target.start);
        let setup = SessionSetup {
            id: format!("pursuit-{}-{}", label, config.simulation.seed),
            arena,
            target_start,
            target_speed: config.target.speed,
            agents: config.agent_spawns(),
            settings: config.session_settings(),
        };

        let session = Session::start(setup, logger.clone())?;
        let mut service = Self {
            overview: PursuitOverview::new(session.id().to_string()),
            pointer: PointerTrack::from_config(&config.target.pointer, target_start),
            session,
            logger,
            max_ticks: config.simulation.max_ticks,
        };
        service.drain_events();
        Ok(service)
    }

    /// Advance one tick with the pointer taken from the track.
    pub fn step(&mut self) -> Frame {
        let pointer = self.pointer.at(self.session.ticks());
        let frame = self.session.tick(pointer);
        self.drain_events();
        frame
    }

    /// Run `ticks` steps back to back and return the last frame.
    pub fn run_for(&mut self, ticks: u64) -> Option<Frame> {
        let mut last = None;
        for _ in 0..ticks {
            last = Some(self.step());
        }
        last
    }

    /// True once the configured tick budget is spent; never for a budget of 0.
    pub fn is_finished(&self) -> bool {
        self.max_ticks != 0 && self.session.ticks() >= self.max_ticks
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.drain_events();
    }

    /// Apply an arena edit and rebuild the static visibility graph.
    pub fn edit_arena<R, F>(&mut self, edit: F) -> DomainResult<R>
    where
        F: FnOnce(&mut Arena) -> DomainResult<R>,
    {
        let result = self.session.edit_arena(edit)?;
        self.drain_events();
        Ok(result)
    }

    fn drain_events(&mut self) {
        for event in self.session.uncommitted_events() {
            self.overview.apply_event(event);
            match event {
                PursuitEvent::RouteLost { agent_id, rule, tick, .. } => {
                    self.logger.warn(&format!(
                        "tick {}: {} ({:?}) has no route to the target",
                        tick, agent_id, rule
                    ));
                }
                PursuitEvent::RouteReplanned { .. } | PursuitEvent::MovementBlocked { .. } => {
                    tracing::trace!(event = event.event_type(), tick = event.tick(), "pursuit event");
                }
                PursuitEvent::SessionStarted { .. }
                | PursuitEvent::StaticGraphBuilt { .. }
                | PursuitEvent::SessionReset { .. } => {
                    tracing::debug!(event = event.event_type(), session = event.session_id(), "lifecycle");
                }
            }
        }
        self.session.mark_events_as_committed();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn overview(&self) -> &PursuitOverview {
        &self.overview
    }

    pub fn pointer_track(&self) -> &PointerTrack {
        &self.pointer
    }

    pub fn max_ticks(&self) -> u64 {
        self.max_ticks
    }
}
