use serde::{Deserialize, Serialize};
use std::fmt;

/// Two positions closer than this count as the same place when an agent
/// checks whether it has reached a waypoint.
pub const ARRIVAL_EPSILON: f64 = 1e-9;

/// Index of a wall inside its [`Arena`](crate::domains::arena::Arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(pub usize);

/// A position in the plane, optionally owned by a wall.
///
/// The owner is a lookup-only back reference used for the wall exemption in
/// clear-path queries. Equality compares coordinates only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<WallId>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, wall: None }
    }

    pub fn on_wall(x: f64, y: f64, wall: WallId) -> Self {
        Self { x, y, wall: Some(wall) }
    }

    /// Same coordinates without the wall owner.
    pub fn detached(self) -> Self {
        Self::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(self, other)
    }

    pub fn approx_eq(&self, other: &Point) -> bool {
        self.distance_to(other) <= ARRIVAL_EPSILON
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(xy: [f64; 2]) -> Self {
        Point::new(xy[0], xy[1])
    }
}

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_wall_owner() {
        let a = Point::on_wall(1.0, 2.0, WallId(3));
        let b = Point::new(1.0, 2.0);
        assert_eq!(a, b);
        assert_eq!(b.wall, None);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }
}
