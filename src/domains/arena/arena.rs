use crate::common::{DomainError, DomainResult};
use crate::domains::geometry::{Point, Wall, WallId};
use serde::{Deserialize, Serialize};

/// Every blocking crossing of the path `a -> b` with the given walls.
pub fn intersections(a: &Point, b: &Point, walls: &[Wall]) -> Vec<Point> {
    walls.iter().filter_map(|wall| wall.intersection(a, b)).collect()
}

/// True when no wall blocks the straight path `a -> b`.
pub fn clear_path(a: &Point, b: &Point, walls: &[Wall]) -> bool {
    !walls.iter().any(|wall| wall.blocks(a, b))
}

/// The obstacle layout a session plays on.
///
/// Endpoint `i` is `p1` of wall `i / 2` when `i` is even and `p2` otherwise.
/// Editing re-indexes walls so ids always match their position.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    walls: Vec<Wall>,
    endpoints: Vec<Point>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `[x1, y1, x2, y2]` segments, rejecting non-finite coordinates.
    pub fn from_segments(segments: &[[f64; 4]]) -> DomainResult<Self> {
        let mut arena = Self::new();
        for segment in segments {
            arena.add_wall(*segment)?;
        }
        Ok(arena)
    }

    pub fn add_wall(&mut self, segment: [f64; 4]) -> DomainResult<WallId> {
        if segment.iter().any(|c| !c.is_finite()) {
            return Err(DomainError::InvalidGeometry {
                reason: format!("wall {:?} has a non-finite coordinate", segment),
            });
        }
        let id = WallId(self.walls.len());
        let wall = Wall::from_segment(id, segment);
        self.endpoints.extend(wall.endpoints());
        self.walls.push(wall);
        Ok(id)
    }

    pub fn remove_wall(&mut self, id: WallId) -> DomainResult<Wall> {
        if id.0 >= self.walls.len() {
            return Err(DomainError::InvalidCommand {
                reason: format!("Wall {} does not exist", id.0),
            });
        }
        let removed = self.walls.remove(id.0);
        for (index, wall) in self.walls.iter_mut().enumerate().skip(id.0) {
            wall.reassign(WallId(index));
        }
        self.reindex();
        Ok(removed)
    }

    fn reindex(&mut self) {
        self.endpoints = self.walls.iter().flat_map(Wall::endpoints).collect();
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id.0)
    }

    pub fn endpoints(&self) -> &[Point] {
        &self.endpoints
    }

    pub fn endpoint(&self, index: usize) -> Option<&Point> {
        self.endpoints.get(index)
    }

    pub fn segments(&self) -> Vec<[f64; 4]> {
        self.walls.iter().map(Wall::segment).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    pub fn intersections(&self, a: &Point, b: &Point) -> Vec<Point> {
        intersections(a, b, &self.walls)
    }

    pub fn is_clear_path(&self, a: &Point, b: &Point) -> bool {
        clear_path(a, b, &self.walls)
    }

    /// Closest blocking crossing of `a -> b` as seen from `a`.
    pub fn nearest_crossing(&self, a: &Point, b: &Point) -> Option<Point> {
        self.intersections(a, b)
            .into_iter()
            .min_by(|p, q| a.distance_to(p).total_cmp(&a.distance_to(q)))
    }
}

/// Wire form of an arena: the ordered `[x1, y1, x2, y2]` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArenaSegments(pub Vec<[f64; 4]>);

impl ArenaSegments {
    pub fn into_arena(self) -> DomainResult<Arena> {
        Arena::from_segments(&self.0)
    }
}

impl From<&Arena> for ArenaSegments {
    fn from(arena: &Arena) -> Self {
        ArenaSegments(arena.segments())
    }
}
