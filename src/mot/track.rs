use std::collections::HashSet;

use itertools::Itertools;
use uuid::Uuid;

use crate::counting::LineId;
use crate::mot::{CenterHistory, Detection};
use crate::utils::{euclidean_distance, Contour, Point, Rect, Segment};

/// Object tracked across frames
#[derive(Debug, Clone)]
pub struct Track {
    id: Uuid,
    contour: Contour,
    current_bbox: Rect,
    track: CenterHistory,
    diagonal: f32,
    aspect_ratio: f32,
    predicted_next_position: Point,
    matched: bool,
    no_match_times: usize,
    counted_on: HashSet<LineId>,
}

impl Track {
    /// Starts a new track from a detection. The track counts as matched in the frame it was born
    pub fn new(detection: Detection) -> Self {
        let current_bbox = detection.get_bbox();
        let center = detection.get_center();
        let diagonal = detection.get_diagonal();
        let aspect_ratio = detection.get_aspect_ratio();
        let mut track = CenterHistory::default();
        track.push(center);
        Track {
            id: Uuid::new_v4(),
            contour: detection.into_contour(),
            current_bbox,
            track,
            diagonal,
            aspect_ratio,
            predicted_next_position: center,
            matched: true,
            no_match_times: 0,
            counted_on: HashSet::new(),
        }
    }
    pub fn get_id(&self) -> Uuid {
        self.id
    }
    pub fn get_contour(&self) -> &Contour {
        &self.contour
    }
    pub fn get_bbox(&self) -> Rect {
        self.current_bbox
    }
    /// Latest center. History is never empty
    pub fn get_center(&self) -> Point {
        self.track.last().copied().unwrap_or(self.predicted_next_position)
    }
    pub fn get_diagonal(&self) -> f32 {
        self.diagonal
    }
    pub fn get_aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
    pub fn get_track(&self) -> &CenterHistory {
        &self.track
    }
    pub fn track_len(&self) -> usize {
        self.track.len()
    }
    pub fn get_predicted_position(&self) -> Point {
        self.predicted_next_position
    }
    pub fn is_matched(&self) -> bool {
        self.matched
    }
    pub fn deactivate(&mut self) {
        self.matched = false
    }
    pub fn get_no_match_times(&self) -> usize {
        self.no_match_times
    }
    pub fn inc_no_match(&mut self) {
        self.no_match_times += 1
    }
    pub fn reset_no_match(&mut self) {
        self.no_match_times = 0
    }
    pub fn is_counted_on(&self, line: LineId) -> bool {
        self.counted_on.contains(&line)
    }
    /// Returns false if the track had already been counted on this line
    pub fn mark_counted(&mut self, line: LineId) -> bool {
        self.counted_on.insert(line)
    }
    pub fn get_counted_lines(&self) -> Vec<LineId> {
        let mut lines: Vec<LineId> = self.counted_on.iter().copied().collect();
        lines.sort();
        lines
    }
    /// Latest motion: second-to-last center -> last center
    pub fn motion_segment(&self) -> Option<Segment> {
        self.track
            .last_two()
            .map(|(prev, current)| Segment::new(prev, current))
    }
    /// Extrapolates next center from the last `depth` centers.
    ///
    /// Consecutive displacements inside the window are averaged with weights 1, 2, 3, ...
    /// (oldest to newest), so recent motion dominates. With less than two centers
    /// the displacement is zero and the prediction is the last center.
    pub fn predict_next_position(&mut self, depth: usize) {
        let mut delta_x = 0.0;
        let mut delta_y = 0.0;
        let mut sum = 0.0;
        for (i, (prev, current)) in self.track.tail(depth).tuple_windows().enumerate() {
            let weight = (i + 1) as f32;
            delta_x += (current.x - prev.x) * weight;
            delta_y += (current.y - prev.y) * weight;
            sum += weight;
        }
        if sum > 0.0 {
            delta_x /= sum;
            delta_y /= sum;
        }
        let last = self.get_center();
        self.predicted_next_position = Point::new(last.x + delta_x, last.y + delta_y);
    }
    /// Takes over shape of the matched detection and appends its center to the history
    pub fn update(&mut self, detection: Detection) {
        self.current_bbox = detection.get_bbox();
        self.diagonal = detection.get_diagonal();
        self.aspect_ratio = detection.get_aspect_ratio();
        self.track.push(detection.get_center());
        self.contour = detection.into_contour();
        self.matched = true;
        self.no_match_times = 0;
    }
    pub fn distance_to_predicted(&self, detection: &Detection) -> f32 {
        euclidean_distance(&self.predicted_next_position, &detection.get_center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn detection_at(cx: f32, cy: f32) -> Detection {
        let (w, h) = (60.0, 80.0);
        Detection::from_contour(vec![
            Point::new(cx - w / 2.0, cy - h / 2.0),
            Point::new(cx + w / 2.0, cy - h / 2.0),
            Point::new(cx + w / 2.0, cy + h / 2.0),
            Point::new(cx - w / 2.0, cy + h / 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_track() {
        let track = Track::new(detection_at(100.0, 100.0));
        assert_eq!(track.track_len(), 1);
        assert!(track.is_matched());
        assert_eq!(track.get_no_match_times(), 0);
        assert_eq!(track.get_center(), Point::new(100.0, 100.0));
        assert!(track.motion_segment().is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Track::new(detection_at(100.0, 100.0));
        let b = Track::new(detection_at(100.0, 100.0));
        assert_ne!(a.get_id(), b.get_id());
    }

    #[test]
    fn test_predict_single_center() {
        let mut track = Track::new(detection_at(100.0, 100.0));
        track.predict_next_position(5);
        assert_eq!(track.get_predicted_position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_predict_constant_velocity() {
        let mut track = Track::new(detection_at(100.0, 100.0));
        for i in 1..8 {
            track.update(detection_at(100.0 + 10.0 * i as f32, 100.0));
        }
        track.predict_next_position(5);
        let predicted = track.get_predicted_position();
        assert_relative_eq!(predicted.x, 180.0);
        assert_relative_eq!(predicted.y, 100.0);
    }

    #[test]
    fn test_predict_weights_recent_motion() {
        let mut track = Track::new(detection_at(0.0, 0.0));
        // displacements: 10, 10, 40
        track.update(detection_at(10.0, 0.0));
        track.update(detection_at(20.0, 0.0));
        track.update(detection_at(60.0, 0.0));
        track.predict_next_position(5);
        // (10*1 + 10*2 + 40*3) / 6 = 25
        assert_relative_eq!(track.get_predicted_position().x, 85.0);
    }

    #[test]
    fn test_update_and_miss_streak() {
        let mut track = Track::new(detection_at(100.0, 100.0));
        track.deactivate();
        track.inc_no_match();
        track.inc_no_match();
        assert_eq!(track.get_no_match_times(), 2);
        track.update(detection_at(100.0, 110.0));
        assert!(track.is_matched());
        assert_eq!(track.get_no_match_times(), 0);
        assert_eq!(
            track.motion_segment(),
            Some(Segment::new(Point::new(100.0, 100.0), Point::new(100.0, 110.0)))
        );
    }

    #[test]
    fn test_counted_lines() {
        let mut track = Track::new(detection_at(100.0, 100.0));
        assert!(track.mark_counted(LineId(1)));
        assert!(!track.mark_counted(LineId(1)));
        assert!(track.mark_counted(LineId(0)));
        assert!(track.is_counted_on(LineId(1)));
        assert_eq!(track.get_counted_lines(), vec![LineId(0), LineId(1)]);
    }
}
