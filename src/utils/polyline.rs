use itertools::Itertools;

use crate::utils::{euclidean_distance, Point, Segment};

/// Editable chain of points. Every two consecutive points form one counting segment.
///
/// Each segment can be inverted: its endpoints are swapped on export, which flips
/// the direction in which crossings of that segment are counted.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    // inverted[i] belongs to the segment points[i] -> points[i + 1]
    inverted: Vec<bool>,
}

impl Polyline {
    /// Creates new polyline. Returns None when less than two points are given
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::utils::{Point, Polyline};
    /// let polyline = Polyline::new(vec![Point::new(0.0, 100.0), Point::new(640.0, 100.0)]).unwrap();
    /// assert_eq!(polyline.segments().len(), 1);
    /// ```
    pub fn new(_points: Vec<Point>) -> Option<Self> {
        if _points.len() < 2 {
            return None;
        }
        let inverted = vec![false; _points.len()];
        Some(Polyline {
            points: _points,
            inverted,
        })
    }
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }
    pub fn is_inverted(&self, segment: usize) -> bool {
        segment < self.segment_count() && self.inverted[segment]
    }
    /// Segments in point order, inverted ones with swapped endpoints
    pub fn segments(&self) -> Vec<Segment> {
        self.points
            .iter()
            .tuple_windows()
            .zip(self.inverted.iter())
            .map(|((a, b), &inv)| {
                let segment = Segment::new(*a, *b);
                if inv {
                    segment.reversed()
                } else {
                    segment
                }
            })
            .collect()
    }
    /// Inserts point before `index` (index == len appends)
    pub fn insert_point(&mut self, index: usize, pt: Point) -> bool {
        if index > self.points.len() {
            return false;
        }
        self.points.insert(index, pt);
        self.inverted.insert(index, false);
        true
    }
    /// Removes point. Refused when the polyline would be left with a single point
    pub fn delete_point(&mut self, index: usize) -> bool {
        if self.points.len() <= 2 || index >= self.points.len() {
            return false;
        }
        self.points.remove(index);
        self.inverted.remove(index);
        true
    }
    /// Moves point. Returns whether anything actually changed
    pub fn move_point(&mut self, index: usize, pt: Point) -> bool {
        match self.points.get_mut(index) {
            Some(v) if *v != pt => {
                *v = pt;
                true
            }
            _ => false,
        }
    }
    pub fn toggle_inverted(&mut self, segment: usize) -> bool {
        if segment >= self.segment_count() {
            return false;
        }
        self.inverted[segment] = !self.inverted[segment];
        true
    }
    /// Index of the segment whose supporting line passes closest to `pt`
    /// (distance to the foot of the perpendicular).
    pub fn nearest_segment(&self, pt: &Point) -> usize {
        let mut min_index = 0;
        let mut min_distance = f32::MAX;
        for (i, (a, b)) in self.points.iter().tuple_windows().enumerate() {
            let dist = distance_to_supporting_line(a, b, pt);
            if dist < min_distance {
                min_distance = dist;
                min_index = i;
            }
        }
        min_index
    }
}

// Zero-length segments have no supporting line: fall back to the endpoint distance
fn distance_to_supporting_line(a: &Point, b: &Point, pt: &Point) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
        return euclidean_distance(a, pt);
    }
    let t = ((pt.x - a.x) * dx + (pt.y - a.y) * dy) / len_sq;
    let foot = Point::new(a.x + t * dx, a.y + t * dy);
    euclidean_distance(&foot, pt)
}
