use super::point::Point;
use std::cmp::Ordering;

/// Relative tolerance under which two slopes are treated as parallel.
pub const SLOPE_EPSILON: f64 = 1e-12;

/// Intersection of segments `a1-a2` and `b1-b2`, or `None`.
///
/// Parallel and collinear pairs never intersect, and neither does a segment
/// of zero length. The crossing must fall inside both segments' coordinate
/// ranges (inclusive). Operands are put into a canonical order first so the
/// result does not depend on argument order.
pub fn intersect(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> Option<Point> {
    if a1 == a2 || b1 == b2 {
        return None;
    }

    let (a1, a2) = ordered(a1, a2);
    let (b1, b2) = ordered(b1, b2);
    let (mut a1, mut a2, mut b1, mut b2) = match compare_segments(a1, a2, b1, b2) {
        Ordering::Greater => (b1, b2, a1, a2),
        _ => (a1, a2, b1, b2),
    };

    // keep any vertical segment in `a`
    if b1.x == b2.x {
        std::mem::swap(&mut a1, &mut b1);
        std::mem::swap(&mut a2, &mut b2);
    }

    if a1.x == a2.x {
        if b1.x == b2.x {
            return None;
        }
        let x = a1.x;
        if x < b1.x.min(b2.x) || x > b1.x.max(b2.x) {
            return None;
        }
        let b_slope = (b1.y - b2.y) / (b1.x - b2.x);
        let y = b1.y + b_slope * (x - b1.x);
        if y < a1.y.min(a2.y) || y > a1.y.max(a2.y) {
            return None;
        }
        return Some(Point::new(x, y));
    }

    let a_slope = (a1.y - a2.y) / (a1.x - a2.x);
    let b_slope = (b1.y - b2.y) / (b1.x - b2.x);
    if slopes_equal(a_slope, b_slope) {
        return None;
    }

    // y = m*x + (y1 - m*x1) for both lines, solved for x
    let x = (b1.y - b_slope * b1.x - a1.y + a_slope * a1.x) / (a_slope - b_slope);
    if x < a1.x.min(a2.x) || x > a1.x.max(a2.x) || x < b1.x.min(b2.x) || x > b1.x.max(b2.x) {
        return None;
    }
    let y = a1.y + (x - a1.x) * a_slope;
    Some(Point::new(x, y))
}

fn slopes_equal(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= SLOPE_EPSILON * scale
}

fn compare_points(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

fn ordered<'a>(p: &'a Point, q: &'a Point) -> (&'a Point, &'a Point) {
    if compare_points(p, q) == Ordering::Greater {
        (q, p)
    } else {
        (p, q)
    }
}

fn compare_segments(a1: &Point, a2: &Point, b1: &Point, b2: &Point) -> Ordering {
    compare_points(a1, b1).then_with(|| compare_points(a2, b2))
}
