use super::agent::AgentId;
use super::rules::RuleKind;
use crate::common::DomainEvent;
use crate::domains::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PursuitEvent {
    SessionStarted {
        session_id: String,
        walls: usize,
        agents: usize,
        tick: u64,
    },
    StaticGraphBuilt {
        session_id: String,
        endpoints: usize,
        edges: usize,
        tick: u64,
    },
    RouteReplanned {
        session_id: String,
        agent_id: AgentId,
        rule: RuleKind,
        waypoints: usize,
        tick: u64,
    },
    RouteLost {
        session_id: String,
        agent_id: AgentId,
        rule: RuleKind,
        tick: u64,
    },
    MovementBlocked {
        session_id: String,
        agent_id: AgentId,
        crossing: Point,
        tick: u64,
    },
    SessionReset {
        session_id: String,
        tick: u64,
    },
}

impl DomainEvent for PursuitEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PursuitEvent::SessionStarted { .. } => "SessionStarted",
            PursuitEvent::StaticGraphBuilt { .. } => "StaticGraphBuilt",
            PursuitEvent::RouteReplanned { .. } => "RouteReplanned",
            PursuitEvent::RouteLost { .. } => "RouteLost",
            PursuitEvent::MovementBlocked { .. } => "MovementBlocked",
            PursuitEvent::SessionReset { .. } => "SessionReset",
        }
    }

    fn session_id(&self) -> &str {
        match self {
            PursuitEvent::SessionStarted { session_id, .. }
            | PursuitEvent::StaticGraphBuilt { session_id, .. }
            | PursuitEvent::RouteReplanned { session_id, .. }
            | PursuitEvent::RouteLost { session_id, .. }
            | PursuitEvent::MovementBlocked { session_id, .. }
            | PursuitEvent::SessionReset { session_id, .. } => session_id,
        }
    }

    fn tick(&self) -> u64 {
        match self {
            PursuitEvent::SessionStarted { tick, .. }
            | PursuitEvent::StaticGraphBuilt { tick, .. }
            | PursuitEvent::RouteReplanned { tick, .. }
            | PursuitEvent::RouteLost { tick, .. }
            | PursuitEvent::MovementBlocked { tick, .. }
            | PursuitEvent::SessionReset { tick, .. } => *tick,
        }
    }
}
