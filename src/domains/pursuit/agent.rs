use super::rules::{MoveRule, RuleKind, Tracked};
use crate::common::{DomainError, DomainResult};
use crate::domains::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// Everything needed to (re)create an agent when a session starts or resets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpawn {
    pub id: AgentId,
    pub start: Point,
    pub speed: f64,
    pub rule: RuleKind,
    /// What a `seek` rule follows. Ignored by the other rules.
    #[serde(default)]
    pub tracked: Tracked,
}

impl AgentSpawn {
    pub fn new(id: u32, start: Point, speed: f64, rule: RuleKind) -> Self {
        Self {
            id: AgentId(id),
            start,
            speed,
            rule,
            tracked: Tracked::Target,
        }
    }

    pub fn tracking(mut self, tracked: Tracked) -> Self {
        self.tracked = tracked;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !self.start.is_finite() {
            return Err(DomainError::InvalidGeometry {
                reason: format!("{} spawns at a non-finite position", self.id),
            });
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(DomainError::InvalidCommand {
                reason: format!("{} needs a positive speed, got {}", self.id, self.speed),
            });
        }
        Ok(())
    }

    /// Fresh agent with empty route state. `seed` feeds the random rules.
    pub fn spawn(&self, seed: u64) -> Agent {
        Agent {
            id: self.id,
            position: self.start.detached(),
            speed: self.speed,
            rule: MoveRule::from_kind(self.rule, self.tracked, seed ^ u64::from(self.id.0)),
        }
    }
}

/// A moving point with a speed cap and a movement rule.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub position: Point,
    pub speed: f64,
    pub rule: MoveRule,
}
