use pursuit_app::domains::arena::Arena;
use pursuit_app::domains::geometry::{distance, intersect, Point, Wall, WallId};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn test_crossing_diagonals_meet_in_the_middle() {
    let hit = intersect(&p(0.0, 0.0), &p(10.0, 10.0), &p(0.0, 10.0), &p(10.0, 0.0));
    assert_eq!(hit, Some(p(5.0, 5.0)));
}

#[test]
fn test_intersect_is_symmetric() {
    let cases = [
        [p(0.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(10.0, 0.0)],
        [p(1.0, 2.0), p(7.0, -3.0), p(2.5, -4.0), p(3.0, 6.0)],
        [p(0.0, 0.0), p(10.0, 0.0), p(5.0, 0.0), p(5.0, 10.0)],
        [p(-3.0, 1.0), p(4.0, 1.5), p(0.1, -2.0), p(0.3, 9.0)],
        [p(0.0, 0.0), p(1.0, 1.0), p(5.0, 0.0), p(5.0, 10.0)],
    ];
    for [a1, a2, b1, b2] in cases {
        let forward = intersect(&a1, &a2, &b1, &b2);
        assert_eq!(forward, intersect(&b1, &b2, &a1, &a2));
        assert_eq!(forward, intersect(&a2, &a1, &b2, &b1));
        assert_eq!(forward, intersect(&b2, &b1, &a2, &a1));
    }
}

#[test]
fn test_parallel_and_collinear_segments_never_intersect() {
    assert_eq!(intersect(&p(0.0, 0.0), &p(10.0, 0.0), &p(0.0, 1.0), &p(10.0, 1.0)), None);
    assert_eq!(intersect(&p(0.0, 0.0), &p(10.0, 0.0), &p(5.0, 0.0), &p(15.0, 0.0)), None);
    assert_eq!(intersect(&p(2.0, 0.0), &p(2.0, 5.0), &p(2.0, 3.0), &p(2.0, 9.0)), None);
    assert_eq!(intersect(&p(0.0, 0.0), &p(4.0, 4.0), &p(1.0, 0.0), &p(5.0, 4.0)), None);
}

#[test]
fn test_touching_and_missing_segments() {
    // T-junction counts, the ranges are inclusive
    assert_eq!(
        intersect(&p(0.0, 0.0), &p(10.0, 0.0), &p(5.0, 0.0), &p(5.0, 10.0)),
        Some(p(5.0, 0.0))
    );
    // vertical line is outside the other segment's x range
    assert_eq!(intersect(&p(0.0, 0.0), &p(1.0, 1.0), &p(5.0, 0.0), &p(5.0, 10.0)), None);
    // intercept lies above the vertical segment
    assert_eq!(intersect(&p(0.0, 20.0), &p(10.0, 20.0), &p(5.0, 0.0), &p(5.0, 10.0)), None);
}

#[test]
fn test_zero_length_segment_never_intersects() {
    assert_eq!(intersect(&p(5.0, 5.0), &p(5.0, 5.0), &p(0.0, 0.0), &p(10.0, 10.0)), None);
}

#[test]
fn test_distance_and_point_equality() {
    assert_eq!(distance(&p(0.0, 0.0), &p(3.0, 4.0)), 5.0);
    assert_eq!(Point::on_wall(1.0, 2.0, WallId(3)), p(1.0, 2.0));
    assert_ne!(p(1.0, 2.0), p(1.0, 2.000001));
}

#[test]
fn test_crossings_near_wall_endpoints_do_not_block() {
    let wall = Wall::new(WallId(0), 0.0, 0.0, 10.0, 0.0);
    assert!(!wall.blocks(&p(0.05, -1.0), &p(0.05, 1.0)));
    assert!(!wall.blocks(&p(9.95, -1.0), &p(9.95, 1.0)));
    assert_eq!(wall.intersection(&p(5.0, -1.0), &p(5.0, 1.0)), Some(p(5.0, 0.0)));
}

#[test]
fn test_own_endpoint_exempts_the_wall() {
    let wall = Wall::new(WallId(4), 0.0, 0.0, 10.0, 0.0);
    let [start, end] = wall.endpoints();
    // leaves the wall through its own body, still not blocked by it
    assert_eq!(wall.intersection(&start, &p(5.0, -3.0)), None);
    assert_eq!(wall.intersection(&p(5.0, 3.0), &end), None);
    // both ends on the wall: blocked at the start
    assert_eq!(wall.intersection(&start, &end), Some(start));
}

#[test]
fn test_clear_path_is_symmetric() {
    let arena = Arena::from_segments(&[
        [5.0, -10.0, 5.0, 10.0],
        [0.0, 12.0, 12.0, 12.0],
        [8.0, 3.0, 14.0, -2.0],
    ])
    .unwrap();
    let mut probes: Vec<Point> = arena.endpoints().to_vec();
    probes.extend([p(0.0, 0.0), p(10.0, 0.0), p(6.0, 14.0), p(2.0, -8.0), p(13.0, 5.0)]);

    for a in &probes {
        for b in &probes {
            assert_eq!(arena.is_clear_path(a, b), arena.is_clear_path(b, a), "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_arena_lists_every_crossing() {
    let arena = Arena::from_segments(&[[2.0, -5.0, 2.0, 5.0], [4.0, -5.0, 4.0, 5.0]]).unwrap();
    let hits = arena.intersections(&p(0.0, 0.0), &p(10.0, 0.0));
    assert_eq!(hits.len(), 2);
    assert_eq!(arena.nearest_crossing(&p(0.0, 0.0), &p(10.0, 0.0)), Some(p(2.0, 0.0)));
    assert!(!arena.is_clear_path(&p(0.0, 0.0), &p(10.0, 0.0)));
    assert!(arena.is_clear_path(&p(0.0, 0.0), &p(0.0, 10.0)));
}

#[test]
fn test_arena_rejects_non_finite_coordinates() {
    assert!(Arena::from_segments(&[[0.0, 0.0, f64::NAN, 1.0]]).is_err());
    assert!(Arena::from_segments(&[[0.0, f64::INFINITY, 1.0, 1.0]]).is_err());
}

#[test]
fn test_remove_wall_reindexes_endpoints() {
    let mut arena = Arena::from_segments(&[
        [0.0, 0.0, 1.0, 0.0],
        [2.0, 0.0, 3.0, 0.0],
        [4.0, 0.0, 5.0, 0.0],
    ])
    .unwrap();
    let removed = arena.remove_wall(WallId(0)).unwrap();
    assert_eq!(removed.segment(), [0.0, 0.0, 1.0, 0.0]);
    assert_eq!(arena.walls().len(), 2);
    assert_eq!(arena.endpoints().len(), 4);
    assert_eq!(arena.endpoints()[0], p(2.0, 0.0));
    assert_eq!(arena.endpoints()[0].wall, Some(WallId(0)));
    assert_eq!(arena.endpoints()[3].wall, Some(WallId(1)));
    assert!(arena.remove_wall(WallId(5)).is_err());
}
