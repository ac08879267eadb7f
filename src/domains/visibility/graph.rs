use crate::domains::arena::Arena;
use crate::domains::geometry::Point;
use crate::domains::pursuit::agent::AgentId;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// What a call to [`VisibilityGraph::recompute`] refreshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecomputeScope {
    /// Endpoint-to-endpoint edges. O(N²) clear-path tests.
    Static,
    /// Which endpoints see the target at `at`.
    Target { at: Point },
    /// Full private link set of one agent: every endpoint plus the target.
    Agent { id: AgentId, at: Point, target: Point },
    /// Only the agent's direct edge to the target. One clear-path test.
    TargetEdge { id: AgentId, at: Point, target: Point },
}

/// Private visibility set of one agent. Never mirrored into the static graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentLinks {
    pub endpoints: BTreeSet<usize>,
    pub target: bool,
}

/// Visibility between obstacle endpoints, the target and each agent.
///
/// Node `i` of the static graph is arena endpoint `i`; edges carry their
/// Euclidean length.
#[derive(Debug, Clone, Default)]
pub struct VisibilityGraph {
    statics: UnGraph<Point, f64>,
    target_links: BTreeSet<usize>,
    agents: HashMap<AgentId, AgentLinks>,
}

impl VisibilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the static part already built for `arena`.
    pub fn build(arena: &Arena) -> Self {
        let mut graph = Self::new();
        graph.recompute(arena, RecomputeScope::Static);
        graph
    }

    /// Refresh the part of the graph named by `scope` against `arena`.
    ///
    /// Running the same scope twice on unchanged geometry gives the same
    /// edges. Dynamic scopes never touch endpoint-to-endpoint edges; a static
    /// rebuild drops all dynamic links since endpoint indices may have moved.
    pub fn recompute(&mut self, arena: &Arena, scope: RecomputeScope) {
        match scope {
            RecomputeScope::Static => self.rebuild_static(arena),
            RecomputeScope::Target { at } => {
                self.target_links = visible_endpoints(arena, &at);
            }
            RecomputeScope::Agent { id, at, target } => {
                let links = AgentLinks {
                    endpoints: visible_endpoints(arena, &at),
                    target: arena.is_clear_path(&at, &target),
                };
                self.agents.insert(id, links);
            }
            RecomputeScope::TargetEdge { id, at, target } => {
                let visible = arena.is_clear_path(&at, &target);
                self.agents.entry(id).or_default().target = visible;
            }
        }
    }

    fn rebuild_static(&mut self, arena: &Arena) {
        let endpoints = arena.endpoints();
        let mut statics = UnGraph::with_capacity(endpoints.len(), endpoints.len());
        let indices: Vec<NodeIndex> = endpoints.iter().map(|p| statics.add_node(*p)).collect();

        for i in 0..endpoints.len() {
            for j in (i + 1)..endpoints.len() {
                if arena.is_clear_path(&endpoints[i], &endpoints[j]) {
                    let length = endpoints[i].distance_to(&endpoints[j]);
                    statics.add_edge(indices[i], indices[j], length);
                }
            }
        }

        tracing::debug!(
            endpoints = statics.node_count(),
            edges = statics.edge_count(),
            "static visibility graph rebuilt"
        );
        self.statics = statics;
        self.target_links.clear();
        self.agents.clear();
    }

    /// Drop an agent's private link set.
    pub fn forget(&mut self, id: AgentId) {
        self.agents.remove(&id);
    }

    pub fn endpoint_count(&self) -> usize {
        self.statics.node_count()
    }

    pub fn static_edge_count(&self) -> usize {
        self.statics.edge_count()
    }

    /// Static neighbours of endpoint `index`, ascending.
    pub fn static_neighbors(&self, index: usize) -> Vec<usize> {
        if index >= self.statics.node_count() {
            return Vec::new();
        }
        let mut out: Vec<usize> = self
            .statics
            .neighbors(NodeIndex::new(index))
            .map(NodeIndex::index)
            .collect();
        out.sort_unstable();
        out
    }

    pub fn has_static_edge(&self, a: usize, b: usize) -> bool {
        let count = self.statics.node_count();
        a < count && b < count && self.statics.contains_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    /// Every static edge once, as `(low, high)` endpoint indices, sorted.
    pub fn static_edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .statics
            .edge_references()
            .map(|edge| {
                let (a, b) = (edge.source().index(), edge.target().index());
                (a.min(b), a.max(b))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    pub fn target_links(&self) -> &BTreeSet<usize> {
        &self.target_links
    }

    pub fn agent_links(&self, id: AgentId) -> Option<&AgentLinks> {
        self.agents.get(&id)
    }
}

fn visible_endpoints(arena: &Arena, from: &Point) -> BTreeSet<usize> {
    arena
        .endpoints()
        .iter()
        .enumerate()
        .filter(|(_, endpoint)| arena.is_clear_path(from, endpoint))
        .map(|(index, _)| index)
        .collect()
}
