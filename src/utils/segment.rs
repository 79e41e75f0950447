use serde::{Deserialize, Serialize};

use crate::utils::Point;

/// Directed line segment `from -> to`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(_from: Point, _to: Point) -> Self {
        Segment { from: _from, to: _to }
    }
    /// Same segment with endpoints swapped. Flips the counted direction of a counting line.
    pub fn reversed(&self) -> Self {
        Segment {
            from: self.to,
            to: self.from,
        }
    }
    fn is_finite(&self) -> bool {
        self.from.x.is_finite() && self.from.y.is_finite() && self.to.x.is_finite() && self.to.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the ordered triplet (p, q, r): sign of `(q - p) x (r - q)`.
///
/// Frame coordinates have the y axis pointing down, so "clockwise" here is what
/// a viewer of the image sees as clockwise.
///
/// The sign is compared against exact zero. Contours carry whole pixel coordinates and
/// centers are at most half-pixel, so the products are exact in `f32` at frame scale.
pub fn orientation(p: &Point, q: &Point, r: &Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val > 0.0 {
        Orientation::Clockwise
    } else if val < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Colinear
    }
}

/// Given colinear p, q, r: whether q lies within the bounding box of segment pr
pub fn on_segment(p: &Point, q: &Point, r: &Point) -> bool {
    q.x <= f32::max(p.x, r.x)
        && q.x >= f32::min(p.x, r.x)
        && q.y <= f32::max(p.y, r.y)
        && q.y >= f32::min(p.y, r.y)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intersection {
    pub intersects: bool,
    /// Crossing direction discriminator, see [`segments_intersect`]
    pub direction_down: bool,
}

/// Tests whether `s1` and `s2` intersect, including the four colinear-touching cases.
///
/// `intersects` is symmetric in its arguments. `direction_down` is not: it describes
/// where `s2` comes from relative to the directed segment `s1`. It is true when
/// `s2.from` lies on the clockwise side of `s1`, or, when `s2.from` lies exactly on
/// the supporting line of `s1`, when `s2.to` lies on the counter-clockwise side.
/// For a counting line drawn left to right this means "moving downwards in the image".
/// A segment running along `s1` (both ends colinear) is never `direction_down`.
///
/// `direction_down` is computed the same way whichever case produced the intersection.
/// Segments with non-finite coordinates never intersect.
pub fn segments_intersect(s1: &Segment, s2: &Segment) -> Intersection {
    if !s1.is_finite() || !s2.is_finite() {
        return Intersection::default();
    }
    let (p1, q1, p2, q2) = (&s1.from, &s1.to, &s2.from, &s2.to);

    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    let direction_down = match o1 {
        Orientation::Clockwise => true,
        Orientation::CounterClockwise => false,
        Orientation::Colinear => o2 == Orientation::CounterClockwise,
    };

    let intersects = (o1 != o2 && o3 != o4)
        || (o1 == Orientation::Colinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Colinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Colinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Colinear && on_segment(p2, q1, q2));

    Intersection {
        intersects,
        direction_down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_orientation() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(10.0, 0.0);
        assert_eq!(orientation(&p, &q, &Point::new(20.0, 0.0)), Orientation::Colinear);
        // y grows downwards: a point "below" a left-to-right segment turns clockwise on screen
        assert_eq!(orientation(&p, &q, &Point::new(20.0, 10.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(&p, &q, &Point::new(20.0, -10.0)), Orientation::Clockwise);
    }

    #[test]
    fn test_orientation_at_frame_scale() {
        // Half-pixel centers spanning a full HD frame
        let p = Point::new(0.5, 0.5);
        let q = Point::new(1919.5, 1079.5);
        let on_line = Point::new(3838.5, 2158.5);
        assert_eq!(orientation(&p, &q, &on_line), Orientation::Colinear);
        assert_eq!(orientation(&q, &on_line, &p), Orientation::Colinear);
        assert_eq!(orientation(&on_line, &p, &q), Orientation::Colinear);
        // Half a pixel off the line is already a side
        let below = Point::new(3838.5, 2159.0);
        let above = Point::new(3838.5, 2158.0);
        assert_eq!(orientation(&p, &q, &below), Orientation::CounterClockwise);
        assert_eq!(orientation(&p, &q, &above), Orientation::Clockwise);
        // One unit of cross product at full HD magnitude
        let p = Point::new(0.0, 0.0);
        let q = Point::new(1000.0, 1.0);
        assert_eq!(orientation(&p, &q, &Point::new(1999.0, 2.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(&p, &q, &Point::new(2001.0, 2.0)), Orientation::Clockwise);
    }

    #[test]
    fn test_on_segment() {
        let p = Point::new(0.0, 0.0);
        let r = Point::new(10.0, 10.0);
        assert!(on_segment(&p, &Point::new(5.0, 5.0), &r));
        assert!(on_segment(&p, &r, &r));
        assert!(!on_segment(&p, &Point::new(11.0, 11.0), &r));
    }

    #[test]
    fn test_moving_down_across_horizontal_line() {
        let line = seg(0.0, 55.0, 100.0, 55.0);
        let motion = seg(10.0, 50.0, 10.0, 60.0);
        let ans = segments_intersect(&line, &motion);
        assert!(ans.intersects);
        assert!(ans.direction_down);

        let upwards = motion.reversed();
        let ans = segments_intersect(&line, &upwards);
        assert!(ans.intersects);
        assert!(!ans.direction_down);

        // Inverting the line flips the counted direction
        let ans = segments_intersect(&line.reversed(), &upwards);
        assert!(ans.intersects);
        assert!(ans.direction_down);
    }

    #[test]
    fn test_symmetry() {
        let pairs = vec![
            (seg(0.0, 55.0, 100.0, 55.0), seg(10.0, 50.0, 10.0, 60.0)),
            (seg(0.0, 0.0, 10.0, 10.0), seg(0.0, 10.0, 10.0, 0.0)),
            (seg(0.0, 0.0, 10.0, 0.0), seg(20.0, 0.0, 30.0, 0.0)),
            (seg(0.0, 0.0, 10.0, 0.0), seg(5.0, 0.0, 30.0, 0.0)),
            (seg(0.0, 0.0, 10.0, 0.0), seg(5.0, 1.0, 5.0, 8.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(
                segments_intersect(&a, &b).intersects,
                segments_intersect(&b, &a).intersects
            );
        }
        // ...while the direction depends on argument order
        let line = seg(0.0, 55.0, 100.0, 55.0);
        let motion = seg(10.0, 50.0, 10.0, 60.0);
        assert!(segments_intersect(&line, &motion).direction_down);
        assert!(!segments_intersect(&motion, &line).direction_down);
    }

    #[test]
    fn test_colinear_cases() {
        let line = seg(0.0, 55.0, 100.0, 55.0);
        // Motion ends on the line coming from above
        let ans = segments_intersect(&line, &seg(10.0, 50.0, 10.0, 55.0));
        assert!(ans.intersects);
        assert!(ans.direction_down);
        // Motion starts on the line and leaves downwards
        let ans = segments_intersect(&line, &seg(10.0, 55.0, 10.0, 60.0));
        assert!(ans.intersects);
        assert!(ans.direction_down);
        // Motion starts on the line and leaves upwards
        let ans = segments_intersect(&line, &seg(10.0, 55.0, 10.0, 50.0));
        assert!(ans.intersects);
        assert!(!ans.direction_down);
        // Motion slides along the line
        let ans = segments_intersect(&line, &seg(10.0, 55.0, 30.0, 55.0));
        assert!(ans.intersects);
        assert!(!ans.direction_down);
        // Colinear but disjoint
        let ans = segments_intersect(&line, &seg(110.0, 55.0, 130.0, 55.0));
        assert!(!ans.intersects);
    }

    #[test]
    fn test_no_intersection() {
        let line = seg(0.0, 55.0, 100.0, 55.0);
        assert!(!segments_intersect(&line, &seg(10.0, 40.0, 10.0, 50.0)).intersects);
        // Passes beyond the end of the line
        assert!(!segments_intersect(&line, &seg(110.0, 50.0, 110.0, 60.0)).intersects);
        // Parallel
        assert!(!segments_intersect(&line, &seg(0.0, 60.0, 100.0, 60.0)).intersects);
    }

    #[test]
    fn test_degenerate_input() {
        let line = seg(0.0, 55.0, 100.0, 55.0);
        let ans = segments_intersect(&line, &seg(f32::NAN, 50.0, 10.0, 60.0));
        assert_eq!(ans, Intersection::default());
        let ans = segments_intersect(&seg(0.0, 0.0, f32::INFINITY, 0.0), &seg(10.0, -5.0, 10.0, 5.0));
        assert!(!ans.intersects);
        // Stationary object sitting on the line
        let ans = segments_intersect(&line, &seg(10.0, 55.0, 10.0, 55.0));
        assert!(ans.intersects);
        assert!(!ans.direction_down);
    }
}
