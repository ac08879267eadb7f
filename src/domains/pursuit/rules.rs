use super::search::{breadth_first, depth_first, randomized_walk, weighted_shortest, Route};
use crate::domains::geometry::Point;
use crate::domains::visibility::{AgentView, Node};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Label of a movement rule, as used in configuration, events and frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    StandStill,
    RandomWalk,
    Seek,
    BreadthFirst,
    DepthFirst,
    Weighted,
    RandomizedWalk,
}

/// The point a seek rule heads for.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tracked {
    /// Externally driven position, e.g. the mouse.
    Pointer,
    /// The session's target agent.
    #[default]
    Target,
    Fixed(Point),
}

/// What an agent wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    Stay,
    MoveToward(Point),
}

/// Planning news from a cached-route rule, surfaced as session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanNote {
    Planned { waypoints: usize },
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub decision: Decision,
    pub note: Option<PlanNote>,
}

impl StepOutcome {
    fn stay() -> Self {
        Self { decision: Decision::Stay, note: None }
    }

    fn toward(point: Point) -> Self {
        Self { decision: Decision::MoveToward(point), note: None }
    }

    fn noted(mut self, note: Option<PlanNote>) -> Self {
        self.note = note;
        self
    }
}

/// Inputs a rule may read during one step.
pub struct StepContext<'a> {
    pub view: AgentView<'a>,
    pub speed: f64,
    pub pointer: Point,
}

/// Planning -> Following -> Replanning cycle shared by the depth-first and
/// randomized-walk rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CachedRoute {
    /// Nothing planned yet.
    #[default]
    Planning,
    /// Walking `route`; `cursor` is the waypoint currently headed for.
    Following { route: Route, cursor: usize },
    /// Reached the end of a route without sight of the target.
    Replanning,
    /// Last attempt found no route; retried quietly every step.
    Stalled,
}

impl CachedRoute {
    pub fn route(&self) -> Option<(&Route, usize)> {
        match self {
            CachedRoute::Following { route, cursor } => Some((route, *cursor)),
            _ => None,
        }
    }

    fn follow<F>(&mut self, view: &AgentView<'_>, plan: F) -> StepOutcome
    where
        F: FnOnce(&AgentView<'_>) -> Route,
    {
        let mut note = None;
        if !matches!(self, CachedRoute::Following { .. }) {
            let route = plan(view);
            if route.len() < 2 {
                if *self != CachedRoute::Stalled {
                    note = Some(PlanNote::Unreachable);
                }
                *self = CachedRoute::Stalled;
                return StepOutcome::stay().noted(note);
            }
            note = Some(PlanNote::Planned { waypoints: route.len() });
            *self = CachedRoute::Following { route, cursor: 1 };
        }

        let CachedRoute::Following { route, cursor } = self else {
            return StepOutcome::stay().noted(note);
        };
        let last = route.len() - 1;
        let mut waypoint = resolve(route, *cursor, view);
        if view.origin().approx_eq(&waypoint) && *cursor < last {
            *cursor += 1;
            waypoint = resolve(route, *cursor, view);
        }
        let at_end = *cursor == last;

        // out of sight at the last hop: hold position, plan again next step
        if at_end && !view.sees_target() {
            *self = CachedRoute::Replanning;
            return StepOutcome::stay().noted(note);
        }
        StepOutcome::toward(waypoint).noted(note)
    }
}

/// Where waypoint `index` is right now: the target is followed live, every
/// other waypoint stays where it was planned.
fn resolve(route: &Route, index: usize, view: &AgentView<'_>) -> Point {
    match route.get(index) {
        Some(w) if w.node == Node::Target => view.target(),
        Some(w) => w.point,
        None => view.origin(),
    }
}

/// Drop the first waypoint when `origin` already stands on it, unless it is
/// the last hop before the target.
fn skip_reached_hop(route: &mut Route, origin: Point) {
    if route.len() > 3 && route.get(1).is_some_and(|w| origin.approx_eq(&w.point)) {
        route.remove(1);
    }
}

/// Per-agent movement policy. Each variant owns only the state it needs.
#[derive(Debug, Clone)]
pub enum MoveRule {
    StandStill,
    RandomWalk { rng: StdRng },
    Seek(Tracked),
    /// Replans every step; keeps the last route for display.
    BreadthFirst { route: Route },
    DepthFirst { plan: CachedRoute },
    /// Replans every step; keeps the last route for display.
    Weighted { route: Route },
    RandomizedWalk { plan: CachedRoute, rng: StdRng },
}

impl MoveRule {
    pub fn from_kind(kind: RuleKind, tracked: Tracked, seed: u64) -> Self {
        match kind {
            RuleKind::StandStill => MoveRule::StandStill,
            RuleKind::RandomWalk => MoveRule::RandomWalk { rng: StdRng::seed_from_u64(seed) },
            RuleKind::Seek => MoveRule::Seek(tracked),
            RuleKind::BreadthFirst => MoveRule::BreadthFirst { route: Route::default() },
            RuleKind::DepthFirst => MoveRule::DepthFirst { plan: CachedRoute::Planning },
            RuleKind::Weighted => MoveRule::Weighted { route: Route::default() },
            RuleKind::RandomizedWalk => MoveRule::RandomizedWalk {
                plan: CachedRoute::Planning,
                rng: StdRng::seed_from_u64(seed),
            },
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            MoveRule::StandStill => RuleKind::StandStill,
            MoveRule::RandomWalk { .. } => RuleKind::RandomWalk,
            MoveRule::Seek(_) => RuleKind::Seek,
            MoveRule::BreadthFirst { .. } => RuleKind::BreadthFirst,
            MoveRule::DepthFirst { .. } => RuleKind::DepthFirst,
            MoveRule::Weighted { .. } => RuleKind::Weighted,
            MoveRule::RandomizedWalk { .. } => RuleKind::RandomizedWalk,
        }
    }

    /// Current route and the index of the waypoint being headed for.
    pub fn route(&self) -> Option<(&Route, usize)> {
        match self {
            MoveRule::BreadthFirst { route } | MoveRule::Weighted { route } if !route.is_empty() => {
                Some((route, 1.min(route.len() - 1)))
            }
            MoveRule::DepthFirst { plan } | MoveRule::RandomizedWalk { plan, .. } => plan.route(),
            _ => None,
        }
    }

    /// Pick this tick's destination. Never blocks; an unreachable target
    /// means staying put.
    pub fn step(&mut self, ctx: &StepContext<'_>) -> StepOutcome {
        let view = &ctx.view;
        match self {
            MoveRule::StandStill => StepOutcome::stay(),
            MoveRule::RandomWalk { rng } => {
                let angle = rng.gen::<f64>() * TAU;
                let origin = view.origin();
                StepOutcome::toward(Point::new(
                    origin.x + angle.cos() * ctx.speed,
                    origin.y + angle.sin() * ctx.speed,
                ))
            }
            MoveRule::Seek(tracked) => StepOutcome::toward(match tracked {
                Tracked::Pointer => ctx.pointer,
                Tracked::Target => view.target(),
                Tracked::Fixed(point) => *point,
            }),
            MoveRule::BreadthFirst { route } => {
                *route = breadth_first(view, Node::Start, Node::Target);
                if route.len() < 2 {
                    return StepOutcome::stay();
                }
                StepOutcome::toward(resolve(route, 1, view))
            }
            MoveRule::DepthFirst { plan } => {
                plan.follow(view, |v| depth_first(v, Node::Start, Node::Target))
            }
            MoveRule::Weighted { route } => {
                *route = weighted_shortest(view, Node::Start, Node::Target);
                if route.len() < 2 {
                    return StepOutcome::stay();
                }
                skip_reached_hop(route, view.origin());
                StepOutcome::toward(resolve(route, 1, view))
            }
            MoveRule::RandomizedWalk { plan, rng } => {
                plan.follow(view, |v| randomized_walk(v, Node::Start, Node::Target, rng))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::arena::Arena;
    use crate::domains::pursuit::agent::AgentId;
    use crate::domains::visibility::{RecomputeScope, VisibilityGraph};

    const ID: AgentId = AgentId(1);

    fn direct(view: &AgentView<'_>) -> Route {
        Route::from_nodes(view, &[Node::Start, Node::Target])
    }

    #[test]
    fn unreachable_is_reported_once() {
        let arena = Arena::new();
        let graph = VisibilityGraph::new();
        let view = AgentView::new(&arena, &graph, ID, Point::new(0.0, 0.0), Point::new(5.0, 0.0));
        let mut plan = CachedRoute::default();

        let first = plan.follow(&view, |v| depth_first(v, Node::Start, Node::Target));
        assert_eq!(first, StepOutcome { decision: Decision::Stay, note: Some(PlanNote::Unreachable) });
        let second = plan.follow(&view, |v| depth_first(v, Node::Start, Node::Target));
        assert_eq!(second, StepOutcome::stay());
        assert_eq!(plan, CachedRoute::Stalled);
    }

    #[test]
    fn last_hop_without_sight_replans() {
        let arena = Arena::new();
        let graph = VisibilityGraph::new();
        let target = Point::new(5.0, 0.0);
        let view = AgentView::new(&arena, &graph, ID, Point::new(0.0, 0.0), target);
        let mut plan = CachedRoute::default();

        let outcome = plan.follow(&view, direct);
        assert_eq!(outcome.decision, Decision::Stay);
        assert_eq!(outcome.note, Some(PlanNote::Planned { waypoints: 2 }));
        assert_eq!(plan, CachedRoute::Replanning);
    }

    #[test]
    fn reaching_a_waypoint_with_the_target_hidden_holds_position() {
        let arena = Arena::from_segments(&[[0.0, 15.0, 20.0, 15.0], [5.0, -10.0, 5.0, 10.0]]).unwrap();
        let mut graph = VisibilityGraph::build(&arena);
        let at = Point::new(5.0, 10.0);
        let target = Point::new(10.0, 20.0);
        graph.recompute(&arena, RecomputeScope::Target { at: target });
        graph.recompute(&arena, RecomputeScope::Agent { id: ID, at, target });
        let view = AgentView::new(&arena, &graph, ID, at, target);
        assert!(!view.sees_target());

        let route = Route::from_nodes(&view, &[Node::Start, Node::Endpoint(3), Node::Target]);
        let mut plan = CachedRoute::Following { route, cursor: 1 };
        let outcome = plan.follow(&view, |_| Route::default());
        assert_eq!(outcome, StepOutcome::stay());
        assert_eq!(plan, CachedRoute::Replanning);

        // next step plans from where the agent stands
        let outcome = plan.follow(&view, |v| {
            Route::from_nodes(v, &[Node::Start, Node::Endpoint(1), Node::Target])
        });
        assert_eq!(outcome.decision, Decision::MoveToward(Point::new(20.0, 15.0)));
        assert_eq!(outcome.note, Some(PlanNote::Planned { waypoints: 3 }));
    }

    fn two_walls() -> Arena {
        Arena::from_segments(&[[0.0, 0.0, 10.0, 0.0], [20.0, 0.0, 20.0, 10.0]]).unwrap()
    }

    #[test]
    fn weighted_drops_a_reached_waypoint() {
        let arena = two_walls();
        let graph = VisibilityGraph::new();
        let at = Point::new(10.0, 0.0);
        let view = AgentView::new(&arena, &graph, ID, at, Point::new(30.0, 5.0));
        let mut route = Route::from_nodes(
            &view,
            &[Node::Start, Node::Endpoint(1), Node::Endpoint(2), Node::Target],
        );

        skip_reached_hop(&mut route, at);
        assert_eq!(route.nodes(), vec![Node::Start, Node::Endpoint(2), Node::Target]);
        assert_eq!(resolve(&route, 1, &view), Point::new(20.0, 0.0));
    }

    #[test]
    fn weighted_keeps_a_reached_last_hop() {
        let arena = two_walls();
        let graph = VisibilityGraph::new();
        let at = Point::new(10.0, 0.0);
        let view = AgentView::new(&arena, &graph, ID, at, Point::new(30.0, 5.0));
        let mut route = Route::from_nodes(&view, &[Node::Start, Node::Endpoint(1), Node::Target]);

        skip_reached_hop(&mut route, at);
        assert_eq!(route.len(), 3);
        assert_eq!(resolve(&route, 1, &view), at);
    }

    #[test]
    fn weighted_keeps_a_waypoint_not_yet_reached() {
        let arena = two_walls();
        let graph = VisibilityGraph::new();
        let at = Point::new(9.0, 0.0);
        let view = AgentView::new(&arena, &graph, ID, at, Point::new(30.0, 5.0));
        let mut route = Route::from_nodes(
            &view,
            &[Node::Start, Node::Endpoint(1), Node::Endpoint(2), Node::Target],
        );

        skip_reached_hop(&mut route, at);
        assert_eq!(resolve(&route, 1, &view), Point::new(10.0, 0.0));
    }

    #[test]
    fn last_hop_in_sight_keeps_following() {
        let arena = Arena::new();
        let mut graph = VisibilityGraph::new();
        let at = Point::new(0.0, 0.0);
        let target = Point::new(5.0, 0.0);
        graph.recompute(&arena, RecomputeScope::Agent { id: ID, at, target });
        let view = AgentView::new(&arena, &graph, ID, at, target);
        let mut plan = CachedRoute::default();

        plan.follow(&view, direct);
        assert!(matches!(plan, CachedRoute::Following { cursor: 1, .. }));
        // no replanning while following
        let outcome = plan.follow(&view, |_| Route::default());
        assert_eq!(outcome, StepOutcome::toward(target));
    }

    #[test]
    fn kinds_round_trip() {
        let kinds = [
            RuleKind::StandStill,
            RuleKind::RandomWalk,
            RuleKind::Seek,
            RuleKind::BreadthFirst,
            RuleKind::DepthFirst,
            RuleKind::Weighted,
            RuleKind::RandomizedWalk,
        ];
        for kind in kinds {
            assert_eq!(MoveRule::from_kind(kind, Tracked::Target, 1).kind(), kind);
        }
        assert_eq!(serde_json::to_string(&RuleKind::RandomizedWalk).unwrap(), "\"randomized_walk\"");
    }
}
