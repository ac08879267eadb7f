use super::graph::VisibilityGraph;
use crate::domains::arena::Arena;
use crate::domains::geometry::Point;
use crate::domains::pursuit::agent::AgentId;
use serde::{Deserialize, Serialize};

/// A vertex of the graph a search walks over.
///
/// Identity is by index, never by coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    /// The searching agent itself.
    Start,
    /// Obstacle endpoint by arena index.
    Endpoint(usize),
    /// The chased target.
    Target,
}

/// Read access to a graph for the search routines.
pub trait Topology {
    /// Neighbours of `node` in a stable order; searches break ties by it.
    fn neighbors(&self, node: Node) -> Vec<Node>;

    fn position(&self, node: Node) -> Option<Point>;

    /// Edge weight. Euclidean length unless a topology says otherwise.
    fn cost(&self, from: Node, to: Node) -> f64 {
        match (self.position(from), self.position(to)) {
            (Some(a), Some(b)) => a.distance_to(&b),
            _ => f64::INFINITY,
        }
    }

    fn is_neighbor(&self, from: Node, to: Node) -> bool {
        self.neighbors(from).contains(&to)
    }
}

/// One agent's view: its private links out of `Start`, the shared static
/// graph between endpoints, and the endpoint links into `Target`.
pub struct AgentView<'a> {
    arena: &'a Arena,
    graph: &'a VisibilityGraph,
    agent: AgentId,
    origin: Point,
    target: Point,
}

impl<'a> AgentView<'a> {
    pub fn new(
        arena: &'a Arena,
        graph: &'a VisibilityGraph,
        agent: AgentId,
        origin: Point,
        target: Point,
    ) -> Self {
        Self { arena, graph, agent, origin, target }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Whether the agent currently has a direct edge to the target.
    pub fn sees_target(&self) -> bool {
        self.graph.agent_links(self.agent).is_some_and(|links| links.target)
    }
}

impl Topology for AgentView<'_> {
    fn neighbors(&self, node: Node) -> Vec<Node> {
        match node {
            Node::Start => match self.graph.agent_links(self.agent) {
                Some(links) => {
                    let mut out: Vec<Node> = links.endpoints.iter().map(|&i| Node::Endpoint(i)).collect();
                    if links.target {
                        out.push(Node::Target);
                    }
                    out
                }
                None => Vec::new(),
            },
            Node::Endpoint(index) => {
                let mut out: Vec<Node> = self
                    .graph
                    .static_neighbors(index)
                    .into_iter()
                    .map(Node::Endpoint)
                    .collect();
                if self.graph.target_links().contains(&index) {
                    out.push(Node::Target);
                }
                out
            }
            Node::Target => Vec::new(),
        }
    }

    fn position(&self, node: Node) -> Option<Point> {
        match node {
            Node::Start => Some(self.origin),
            Node::Endpoint(index) => self.arena.endpoint(index).copied(),
            Node::Target => Some(self.target),
        }
    }
}
