use super::agent::AgentId;
use super::events::PursuitEvent;
use super::rules::RuleKind;
use crate::domains::geometry::Point;
use crate::domains::visibility::AgentLinks;
use serde::{Deserialize, Serialize};

/// Which optional parts a [`Frame`] carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub show_routes: bool,
    #[serde(default)]
    pub show_graph: bool,
}

/// Per-tick snapshot handed to an external renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub session_id: String,
    pub tick: u64,
    pub pointer: Point,
    pub target: Point,
    pub agents: Vec<AgentFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphFrame>,
}

impl Frame {
    pub fn agent(&self, id: AgentId) -> Option<&AgentFrame> {
        self.agents.iter().find(|a| a.id == id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentFrame {
    pub id: AgentId,
    pub rule: RuleKind,
    pub position: Point,
    /// Remaining route from the agent to the target, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<Point>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphFrame {
    pub static_edges: Vec<(usize, usize)>,
    pub target_links: Vec<usize>,
    pub agent_links: Vec<(AgentId, AgentLinks)>,
}

/// Running counters over a session's events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PursuitOverview {
    pub session_id: String,
    pub last_tick: u64,
    pub static_edges: usize,
    pub replans: u64,
    pub routes_lost: u64,
    pub blocked_moves: u64,
    pub resets: u64,
}

impl PursuitOverview {
    pub fn new(session_id: String) -> Self {
        Self { session_id, ..Self::default() }
    }

    pub fn apply_event(&mut self, event: &PursuitEvent) {
        match event {
            PursuitEvent::SessionStarted { tick, .. } => {
                self.last_tick = *tick;
            }
            PursuitEvent::StaticGraphBuilt { edges, tick, .. } => {
                self.static_edges = *edges;
                self.last_tick = *tick;
            }
            PursuitEvent::RouteReplanned { tick, .. } => {
                self.replans += 1;
                self.last_tick = *tick;
            }
            PursuitEvent::RouteLost { tick, .. } => {
                self.routes_lost += 1;
                self.last_tick = *tick;
            }
            PursuitEvent::MovementBlocked { tick, .. } => {
                self.blocked_moves += 1;
                self.last_tick = *tick;
            }
            PursuitEvent::SessionReset { tick, .. } => {
                self.resets += 1;
                self.last_tick = *tick;
            }
        }
    }
}
