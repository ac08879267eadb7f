use super::intersect::intersect;
use super::point::{Point, WallId};
use serde::{Deserialize, Serialize};

/// Distance from either end of a wall inside which crossings are ignored.
pub const WALL_BUFFER: f64 = 0.1;

/// An obstacle segment. Both endpoints are owned by the wall and carry its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub p1: Point,
    pub p2: Point,
}

impl Wall {
    pub fn new(id: WallId, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            id,
            p1: Point::on_wall(x1, y1, id),
            p2: Point::on_wall(x2, y2, id),
        }
    }

    pub fn from_segment(id: WallId, segment: [f64; 4]) -> Self {
        Self::new(id, segment[0], segment[1], segment[2], segment[3])
    }

    pub fn segment(&self) -> [f64; 4] {
        [self.p1.x, self.p1.y, self.p2.x, self.p2.y]
    }

    pub fn endpoints(&self) -> [Point; 2] {
        [self.p1, self.p2]
    }

    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    pub(crate) fn reassign(&mut self, id: WallId) {
        self.id = id;
        self.p1.wall = Some(id);
        self.p2.wall = Some(id);
    }

    /// Where the path `a -> b` is blocked by this wall, if anywhere.
    ///
    /// Paths that start or end on one of this wall's own endpoints are never
    /// blocked by it, unless both ends belong to the wall: a path along the
    /// wall is blocked right where it starts. Crossings inside the buffer
    /// zone around either endpoint do not block.
    pub fn intersection(&self, a: &Point, b: &Point) -> Option<Point> {
        let owns_a = a.wall == Some(self.id);
        let owns_b = b.wall == Some(self.id);
        if owns_a || owns_b {
            return if owns_a && owns_b { Some(a.detached()) } else { None };
        }

        let crash = intersect(a, b, &self.p1, &self.p2)?;
        if crash.distance_to(&self.p1) < WALL_BUFFER || crash.distance_to(&self.p2) < WALL_BUFFER {
            return None;
        }
        Some(crash)
    }

    pub fn blocks(&self, a: &Point, b: &Point) -> bool {
        self.intersection(a, b).is_some()
    }
}
