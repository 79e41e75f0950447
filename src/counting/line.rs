use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::{Point, Polyline, Segment};

/// Stable identifier of a counting line. Not tied to the line's position in the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line#{}", self.0)
    }
}

/// User configured directed segment. Crossing it from the clockwise side
/// (top side for a left-to-right line) is counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountingLine {
    pub id: LineId,
    pub from: Point,
    pub to: Point,
}

impl CountingLine {
    pub fn new(_id: LineId, _segment: Segment) -> Self {
        CountingLine {
            id: _id,
            from: _segment.from,
            to: _segment.to,
        }
    }
    pub fn segment(&self) -> Segment {
        Segment::new(self.from, self.to)
    }
    /// Line spanning the whole frame width at `round(frame_height * ratio)`,
    /// directed left to right so that downward motion is counted.
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::counting::{CountingLine, LineId};
    /// let line = CountingLine::horizontal(LineId(0), 1280, 720, 0.3);
    /// assert_eq!(line.from.y, 216.0);
    /// assert_eq!(line.to.x, 1279.0);
    /// ```
    pub fn horizontal(id: LineId, frame_width: u32, frame_height: u32, ratio: f32) -> Self {
        let y = f32::round(frame_height as f32 * ratio);
        let right = frame_width.saturating_sub(1) as f32;
        CountingLine::new(id, Segment::new(Point::new(0.0, y), Point::new(right, y)))
    }
}

impl Polyline {
    /// One counting line per segment, ids follow segment position
    pub fn to_counting_lines(&self) -> Vec<CountingLine> {
        self.segments()
            .into_iter()
            .enumerate()
            .map(|(i, segment)| CountingLine::new(LineId(i as u32), segment))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_to_counting_lines() {
        let mut polyline = Polyline::new(vec![
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(200.0, 150.0),
        ])
        .unwrap();
        polyline.toggle_inverted(1);
        let lines = polyline.to_counting_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, LineId(0));
        assert_eq!(lines[1].id, LineId(1));
        assert_eq!(lines[1].from, Point::new(200.0, 150.0));
        assert_eq!(lines[1].to, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_line_json() {
        let line: CountingLine =
            serde_json::from_str(r#"{"id": 3, "from": {"x": 0.0, "y": 10.0}, "to": {"x": 50.0, "y": 10.0}}"#).unwrap();
        assert_eq!(line.id, LineId(3));
        assert_eq!(line.segment(), Segment::new(Point::new(0.0, 10.0), Point::new(50.0, 10.0)));
        assert_eq!(line.id.to_string(), "line#3");
    }
}
