use super::agent::{Agent, AgentId, AgentSpawn};
use super::events::PursuitEvent;
use super::motion::{integrate, Motion};
use super::projections::{AgentFrame, Frame, GraphFrame, RenderOptions};
use super::rules::{Decision, PlanNote, RuleKind, StepContext, Tracked};
use super::search::Waypoint;
use crate::common::{DomainError, DomainResult};
use crate::domains::arena::Arena;
use crate::domains::geometry::Point;
use crate::domains::logger::DynLogger;
use crate::domains::visibility::{AgentView, Node, RecomputeScope, VisibilityGraph};
use std::collections::HashSet;

/// Full visibility refresh every this many ticks unless configured otherwise.
pub const DEFAULT_REFRESH_INTERVAL: u64 = 5;

/// Id reserved for the pointer-driven target.
pub const TARGET_ID: AgentId = AgentId(u32::MAX);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub refresh_interval: u64,
    pub seed: u64,
    pub render: RenderOptions,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            seed: 7,
            render: RenderOptions::default(),
        }
    }
}

/// Inputs for [`Session::start`].
#[derive(Debug, Clone)]
pub struct SessionSetup {
    pub id: String,
    pub arena: Arena,
    pub target_start: Point,
    pub target_speed: f64,
    pub agents: Vec<AgentSpawn>,
    pub settings: SessionSettings,
}

/// One play session: an arena, a pointer-driven target and the pursuers.
///
/// Advances one tick at a time. Within a tick the target moves first, then
/// visibility is refreshed, then every pursuer steps once.
pub struct Session {
    id: String,
    arena: Arena,
    graph: VisibilityGraph,
    target_spawn: AgentSpawn,
    target: Agent,
    spawns: Vec<AgentSpawn>,
    agents: Vec<Agent>,
    pointer: Point,
    tick: u64,
    refresh_pending: bool,
    settings: SessionSettings,
    logger: DynLogger,
    uncommitted_events: Vec<PursuitEvent>,
}

impl Session {
    pub fn uncommitted_events(&self) -> &[PursuitEvent] {
        &self.uncommitted_events
    }
    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }
    fn add_event(&mut self, event: PursuitEvent) {
        self.uncommitted_events.push(event);
    }
}

impl Session {
    /// Validate the setup, build the static graph and spawn everyone.
    pub fn start(setup: SessionSetup, logger: DynLogger) -> DomainResult<Self> {
        let SessionSetup { id, arena, target_start, target_speed, agents: spawns, settings } = setup;
        if settings.refresh_interval == 0 {
            return Err(DomainError::InvalidCommand {
                reason: "refresh interval must be at least one tick".to_string(),
            });
        }

        let target_spawn = AgentSpawn {
            id: TARGET_ID,
            start: target_start,
            speed: target_speed,
            rule: RuleKind::Seek,
            tracked: Tracked::Pointer,
        };
        target_spawn.validate()?;

        let mut ids = HashSet::new();
        for spawn in &spawns {
            spawn.validate()?;
            if spawn.id == TARGET_ID || !ids.insert(spawn.id) {
                return Err(DomainError::InvalidCommand {
                    reason: format!("Agent id {} is already taken", spawn.id),
                });
            }
        }

        let graph = VisibilityGraph::build(&arena);
        let mut session = Self {
            target: target_spawn.spawn(settings.seed),
            agents: spawns.iter().map(|s| s.spawn(settings.seed)).collect(),
            pointer: target_start.detached(),
            id,
            arena,
            graph,
            target_spawn,
            spawns,
            tick: 0,
            refresh_pending: true,
            settings,
            logger,
            uncommitted_events: Vec::new(),
        };

        session.add_event(PursuitEvent::SessionStarted {
            session_id: session.id.clone(),
            walls: session.arena.walls().len(),
            agents: session.agents.len(),
            tick: 0,
        });
        session.record_static_build();
        session.logger.info(&format!(
            "session {} started: {} walls, {} pursuers",
            session.id,
            session.arena.walls().len(),
            session.agents.len()
        ));
        Ok(session)
    }

    fn record_static_build(&mut self) {
        self.add_event(PursuitEvent::StaticGraphBuilt {
            session_id: self.id.clone(),
            endpoints: self.graph.endpoint_count(),
            edges: self.graph.static_edge_count(),
            tick: self.tick,
        });
    }

    /// Re-spawn target and pursuers from their spawn parameters.
    pub fn reset(&mut self) {
        for agent in &self.agents {
            self.graph.forget(agent.id);
        }
        self.target = self.target_spawn.spawn(self.settings.seed);
        self.agents = self.spawns.iter().map(|s| s.spawn(self.settings.seed)).collect();
        self.pointer = self.target.position;
        self.add_event(PursuitEvent::SessionReset { session_id: self.id.clone(), tick: self.tick });
        self.tick = 0;
        self.refresh_pending = true;
        self.logger.info(&format!("session {} reset", self.id));
    }

    /// Apply an external edit to the arena and rebuild the static graph.
    ///
    /// The rebuild runs whether or not `edit` succeeds.
    pub fn edit_arena<R, F>(&mut self, edit: F) -> DomainResult<R>
    where
        F: FnOnce(&mut Arena) -> DomainResult<R>,
    {
        let result = edit(&mut self.arena);
        self.rebuild_static();
        result
    }

    /// O(N²) static rebuild; dynamic links are refreshed on the next tick.
    pub fn rebuild_static(&mut self) {
        self.graph.recompute(&self.arena, RecomputeScope::Static);
        self.refresh_pending = true;
        self.record_static_build();
        self.logger.info(&format!(
            "session {} static graph: {} endpoints, {} edges",
            self.id,
            self.graph.endpoint_count(),
            self.graph.static_edge_count()
        ));
    }

    /// Advance one tick with the pointer at `pointer`.
    pub fn tick(&mut self, pointer: Point) -> Frame {
        let tick = self.tick;
        self.pointer = pointer.detached();

        // target first so every pursuer sees the same snapshot
        let target_ctx = StepContext {
            view: AgentView::new(&self.arena, &self.graph, TARGET_ID, self.target.position, self.target.position),
            speed: self.target.speed,
            pointer: self.pointer,
        };
        if let Decision::MoveToward(destination) = self.target.rule.step(&target_ctx).decision {
            let (next, _) = integrate(self.target.position, self.target.speed, destination, &self.arena);
            self.target.position = next;
        }
        let target_at = self.target.position;

        if self.refresh_pending || tick % self.settings.refresh_interval == 0 {
            self.graph.recompute(&self.arena, RecomputeScope::Target { at: target_at });
            for agent in &self.agents {
                self.graph.recompute(
                    &self.arena,
                    RecomputeScope::Agent { id: agent.id, at: agent.position, target: target_at },
                );
            }
            self.refresh_pending = false;
        } else {
            for agent in &self.agents {
                self.graph.recompute(
                    &self.arena,
                    RecomputeScope::TargetEdge { id: agent.id, at: agent.position, target: target_at },
                );
            }
        }

        let mut events = Vec::new();
        for agent in self.agents.iter_mut() {
            let ctx = StepContext {
                view: AgentView::new(&self.arena, &self.graph, agent.id, agent.position, target_at),
                speed: agent.speed,
                pointer: self.pointer,
            };
            let outcome = agent.rule.step(&ctx);

            match outcome.note {
                Some(PlanNote::Planned { waypoints }) => {
                    tracing::debug!(agent = %agent.id, waypoints, tick, "route planned");
                    events.push(PursuitEvent::RouteReplanned {
                        session_id: self.id.clone(),
                        agent_id: agent.id,
                        rule: agent.rule.kind(),
                        waypoints,
                        tick,
                    });
                }
                Some(PlanNote::Unreachable) => {
                    tracing::debug!(agent = %agent.id, tick, "target unreachable");
                    events.push(PursuitEvent::RouteLost {
                        session_id: self.id.clone(),
                        agent_id: agent.id,
                        rule: agent.rule.kind(),
                        tick,
                    });
                }
                None => {}
            }

            if let Decision::MoveToward(destination) = outcome.decision {
                let (next, motion) = integrate(agent.position, agent.speed, destination, &self.arena);
                agent.position = next;
                if let Motion::Halted { crossing } = motion {
                    tracing::trace!(agent = %agent.id, %crossing, tick, "movement halted at wall");
                    events.push(PursuitEvent::MovementBlocked {
                        session_id: self.id.clone(),
                        agent_id: agent.id,
                        crossing,
                        tick,
                    });
                }
            }
        }
        self.uncommitted_events.extend(events);
        self.tick += 1;
        self.frame(tick)
    }

    /// Snapshot of the current state, labelled with the last completed tick.
    pub fn snapshot(&self) -> Frame {
        self.frame(self.tick.saturating_sub(1))
    }

    fn frame(&self, tick: u64) -> Frame {
        let render = self.settings.render;
        let agents = self
            .agents
            .iter()
            .map(|agent| AgentFrame {
                id: agent.id,
                rule: agent.rule.kind(),
                position: agent.position,
                route: render.show_routes.then(|| self.remaining_route(agent)),
            })
            .collect();
        let graph = render.show_graph.then(|| GraphFrame {
            static_edges: self.graph.static_edges(),
            target_links: self.graph.target_links().iter().copied().collect(),
            agent_links: self
                .agents
                .iter()
                .filter_map(|a| self.graph.agent_links(a.id).map(|links| (a.id, links.clone())))
                .collect(),
        });
        Frame {
            session_id: self.id.clone(),
            tick,
            pointer: self.pointer,
            target: self.target.position,
            agents,
            graph,
        }
    }

    fn remaining_route(&self, agent: &Agent) -> Vec<Point> {
        let Some((route, cursor)) = agent.rule.route() else {
            return Vec::new();
        };
        let live = |w: &Waypoint| if w.node == Node::Target { self.target.position } else { w.point };
        std::iter::once(agent.position)
            .chain(route.waypoints().iter().skip(cursor).map(live))
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of ticks run since start or the last reset.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn graph(&self) -> &VisibilityGraph {
        &self.graph
    }

    pub fn target(&self) -> &Agent {
        &self.target
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> DomainResult<&Agent> {
        self.agents
            .iter()
            .find(|a| a.id == id)
            .ok_or(DomainError::AgentNotFound { id: id.0 })
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }
}
