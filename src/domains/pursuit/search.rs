use crate::domains::geometry::Point;
use crate::domains::visibility::{Node, Topology};
use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    pub node: Node,
    /// Position of `node` when the route was computed.
    pub point: Point,
}

/// Ordered, loop-free sequence of waypoints starting at the searching agent.
/// Empty means the goal was unreachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn from_nodes<T: Topology>(topology: &T, nodes: &[Node]) -> Self {
        let waypoints = nodes
            .iter()
            .filter_map(|&node| topology.position(node).map(|point| Waypoint { node, point }))
            .collect();
        Self { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.waypoints.iter().map(|w| w.node).collect()
    }

    pub fn points(&self) -> Vec<Point> {
        self.waypoints.iter().map(|w| w.point).collect()
    }

    /// Summed edge cost along the route under `topology`.
    pub fn cost<T: Topology>(&self, topology: &T) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| topology.cost(pair[0].node, pair[1].node))
            .sum()
    }

    pub fn has_repeats(&self) -> bool {
        let mut seen = HashSet::new();
        !self.waypoints.iter().all(|w| seen.insert(w.node))
    }

    pub(crate) fn remove(&mut self, index: usize) -> Waypoint {
        self.waypoints.remove(index)
    }
}

fn unwind(parents: &HashMap<Node, Option<Node>>, goal: Node) -> Vec<Node> {
    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(&Some(parent)) = parents.get(&current) {
        nodes.push(parent);
        current = parent;
    }
    nodes.reverse();
    nodes
}

/// Fewest-edges route. Ties go to the first route discovered.
pub fn breadth_first<T: Topology>(topology: &T, start: Node, goal: Node) -> Route {
    let mut parents: HashMap<Node, Option<Node>> = HashMap::from([(start, None)]);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        if node == goal {
            return Route::from_nodes(topology, &unwind(&parents, goal));
        }
        for next in topology.neighbors(node) {
            if parents.contains_key(&next) {
                continue;
            }
            parents.insert(next, Some(node));
            queue.push_back(next);
        }
    }
    Route::default()
}

/// First route a stack-based depth-first traversal reaches. Not necessarily shortest.
pub fn depth_first<T: Topology>(topology: &T, start: Node, goal: Node) -> Route {
    let mut parents: HashMap<Node, Option<Node>> = HashMap::new();
    let mut stack: Vec<(Node, Option<Node>)> = vec![(start, None)];

    while let Some((node, parent)) = stack.pop() {
        if parents.contains_key(&node) {
            continue;
        }
        parents.insert(node, parent);
        if node == goal {
            return Route::from_nodes(topology, &unwind(&parents, goal));
        }
        for next in topology.neighbors(node) {
            if !parents.contains_key(&next) {
                stack.push((next, Some(node)));
            }
        }
    }
    Route::default()
}

/// Cheapest route by accumulated [`Topology::cost`].
///
/// Frontier entries are ordered by cost, then by insertion so equal-cost
/// ties resolve the same way every run.
pub fn weighted_shortest<T: Topology>(topology: &T, start: Node, goal: Node) -> Route {
    let mut settled: HashMap<Node, Option<Node>> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut sequence: u64 = 0;
    frontier.push(Reverse((OrderedFloat(0.0), sequence, start, None::<Node>)));

    while let Some(Reverse((OrderedFloat(cost), _, node, parent))) = frontier.pop() {
        if settled.contains_key(&node) {
            continue;
        }
        settled.insert(node, parent);
        if node == goal {
            return Route::from_nodes(topology, &unwind(&settled, goal));
        }
        for next in topology.neighbors(node) {
            if settled.contains_key(&next) {
                continue;
            }
            sequence += 1;
            let next_cost = cost + topology.cost(node, next);
            frontier.push(Reverse((OrderedFloat(next_cost), sequence, next, Some(node))));
        }
    }
    Route::default()
}

/// Hop to a uniformly random unvisited neighbour until the goal is reached.
/// A dead end discards the attempt.
pub fn randomized_walk<T: Topology, R: Rng + ?Sized>(
    topology: &T,
    start: Node,
    goal: Node,
    rng: &mut R,
) -> Route {
    let mut visited = HashSet::from([start]);
    let mut nodes = vec![start];
    let mut current = start;

    while current != goal {
        let options: Vec<Node> = topology
            .neighbors(current)
            .into_iter()
            .filter(|n| !visited.contains(n))
            .collect();
        let Some(&next) = options.choose(rng) else {
            tracing::trace!(hops = nodes.len(), "randomized walk hit a dead end");
            return Route::default();
        };
        visited.insert(next);
        nodes.push(next);
        current = next;
    }
    Route::from_nodes(topology, &nodes)
}
