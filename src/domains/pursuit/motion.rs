use crate::domains::arena::Arena;
use crate::domains::geometry::Point;

/// Closer than this to a blocking crossing, an agent stops instead of
/// halving the gap again.
pub const HALT_DISTANCE: f64 = 0.5;

/// How a tick's displacement was committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Destination equals the current position.
    Idle,
    /// Full (speed-clamped) step taken.
    Clear,
    /// Stopped halfway to the nearest wall crossing.
    Blocked { crossing: Point },
    /// Already within [`HALT_DISTANCE`] of the crossing; no movement.
    Halted { crossing: Point },
}

/// Turn a desired destination into the next committed position.
///
/// The step is clamped to `speed`. If the straight move would cross a wall,
/// the agent instead moves halfway to the nearest crossing, or stays put when
/// it is already close to it.
pub fn integrate(from: Point, speed: f64, destination: Point, arena: &Arena) -> (Point, Motion) {
    let mut dx = destination.x - from.x;
    let mut dy = destination.y - from.y;
    let d = (dx * dx + dy * dy).sqrt();
    if d == 0.0 {
        return (from, Motion::Idle);
    }

    if d > speed {
        dx = dx * speed / d;
        dy = dy * speed / d;
    }
    let candidate = Point::new(from.x + dx, from.y + dy);

    match arena.nearest_crossing(&from, &candidate) {
        None => (candidate, Motion::Clear),
        Some(crossing) if from.distance_to(&crossing) >= HALT_DISTANCE => {
            (from.midpoint(&crossing), Motion::Blocked { crossing })
        }
        Some(crossing) => (from, Motion::Halted { crossing }),
    }
}
