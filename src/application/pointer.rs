use crate::config::PointerConfig;
use crate::domains::geometry::Point;

/// Scripted stand-in for the mouse: visits each waypoint in turn and holds
/// it for `hold_ticks` ticks, then starts over.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTrack {
    waypoints: Vec<Point>,
    hold_ticks: u64,
    rest: Point,
}

impl PointerTrack {
    /// `rest` is reported while the track has no waypoints.
    pub fn new(waypoints: Vec<Point>, hold_ticks: u64, rest: Point) -> Self {
        Self { waypoints, hold_ticks: hold_ticks.max(1), rest }
    }

    pub fn from_config(config: &PointerConfig, rest: Point) -> Self {
        let waypoints = config.waypoints.iter().copied().map(Point::from).collect();
        Self::new(waypoints, config.hold_ticks, rest)
    }

    /// Pointer position during `tick`.
    pub fn at(&self, tick: u64) -> Point {
        if self.waypoints.is_empty() {
            return self.rest;
        }
        let index = (tick / self.hold_ticks) % self.waypoints.len() as u64;
        self.waypoints[index as usize]
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    pub fn hold_ticks(&self) -> u64 {
        self.hold_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_track_rests() {
        let rest = Point::new(3.0, 4.0);
        let track = PointerTrack::new(Vec::new(), 10, rest);
        assert_eq!(track.at(0), rest);
        assert_eq!(track.at(1_000), rest);
    }

    #[test]
    fn holds_then_cycles() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let track = PointerTrack::new(vec![a, b], 3, Point::new(5.0, 5.0));
        let seen: Vec<Point> = (0..8).map(|t| track.at(t)).collect();
        assert_eq!(seen, vec![a, a, a, b, b, b, a, a]);
    }

    #[test]
    fn zero_hold_is_one_tick() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 2.0);
        let track = PointerTrack::new(vec![a, b], 0, a);
        assert_eq!(track.hold_ticks(), 1);
        assert_eq!(track.at(1), b);
    }
}
