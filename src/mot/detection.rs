use serde::{Deserialize, Serialize};

use crate::mot::mot_errors::TrackerError;
use crate::utils::{bounding_rect, contour_area, Contour, Point, Rect};

/// Candidate object shape of a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    contour: Contour,
    bbox: Rect,
    center: Point,
    diagonal: f32,
    aspect_ratio: f32,
}

impl Detection {
    /// Builds detection from a polygon boundary.
    ///
    /// Fails for polygons with less than 3 points and for polygons whose bounding
    /// box has zero width or height (aspect ratio would be undefined).
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::mot::Detection;
    /// use line_counter::utils::Point;
    /// let contour = vec![Point::new(0.0, 0.0), Point::new(60.0, 0.0), Point::new(60.0, 80.0), Point::new(0.0, 80.0)];
    /// let detection = Detection::from_contour(contour).unwrap();
    /// assert_eq!(detection.get_center(), Point::new(30.0, 40.0));
    /// ```
    pub fn from_contour(contour: Contour) -> Result<Self, TrackerError> {
        if contour.len() < 3 {
            return Err(TrackerError::TooFewPoints(contour.len()));
        }
        if contour.iter().any(|pt| !pt.x.is_finite() || !pt.y.is_finite()) {
            return Err(TrackerError::NonFinite);
        }
        let bbox = bounding_rect(&contour).ok_or(TrackerError::TooFewPoints(0))?;
        if bbox.width <= 0.0 || bbox.height <= 0.0 {
            return Err(TrackerError::DegenerateBBox {
                width: bbox.width,
                height: bbox.height,
            });
        }
        Ok(Detection {
            center: bbox.center(),
            diagonal: bbox.diagonal(),
            aspect_ratio: bbox.width / bbox.height,
            contour,
            bbox,
        })
    }
    pub fn get_contour(&self) -> &Contour {
        &self.contour
    }
    pub fn get_bbox(&self) -> Rect {
        self.bbox
    }
    /// Bounding box center
    pub fn get_center(&self) -> Point {
        self.center
    }
    pub fn get_diagonal(&self) -> f32 {
        self.diagonal
    }
    pub fn get_aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
    /// Contour area / bounding box area
    pub fn get_solidity(&self) -> f32 {
        contour_area(&self.contour) / self.bbox.area()
    }
    pub(crate) fn into_contour(self) -> Contour {
        self.contour
    }
}

/// Acceptance thresholds. Every comparison is strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    /// Minimum bounding box area (px^2)
    pub min_area: f32,
    pub min_aspect_ratio: f32,
    pub max_aspect_ratio: f32,
    pub min_width: f32,
    /// Only checked when set
    pub min_height: Option<f32>,
    pub min_diagonal: f32,
    /// Minimum contour area / bounding box area. Rejects thin and sparse blobs (shadows, noise)
    pub min_solidity: f32,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        DetectionThresholds {
            min_area: 600.0,
            min_aspect_ratio: 0.2,
            max_aspect_ratio: 4.0,
            min_width: 40.0,
            min_height: Some(40.0),
            min_diagonal: 70.0,
            min_solidity: 0.5,
        }
    }
}

/// Classifies raw contours into detections
#[derive(Debug, Clone, Default)]
pub struct DetectionFilter {
    thresholds: DetectionThresholds,
}

impl DetectionFilter {
    /// Creates news instance of DetectionFilter
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::mot::{DetectionFilter, DetectionThresholds};
    /// let relaxed = DetectionThresholds { min_height: None, ..DetectionThresholds::default() };
    /// let filter = DetectionFilter::new(relaxed);
    /// ```
    pub fn new(_thresholds: DetectionThresholds) -> Self {
        DetectionFilter {
            thresholds: _thresholds,
        }
    }
    pub fn get_thresholds(&self) -> &DetectionThresholds {
        &self.thresholds
    }
    pub fn set_thresholds(&mut self, thresholds: DetectionThresholds) {
        self.thresholds = thresholds
    }
    pub fn accepts(&self, detection: &Detection) -> bool {
        let t = &self.thresholds;
        let bbox = detection.get_bbox();
        let aspect_ratio = detection.get_aspect_ratio();
        bbox.area() > t.min_area
            && t.min_aspect_ratio < aspect_ratio
            && aspect_ratio < t.max_aspect_ratio
            && bbox.width > t.min_width
            && t.min_height.map_or(true, |h| bbox.height > h)
            && detection.get_diagonal() > t.min_diagonal
            && detection.get_solidity() > t.min_solidity
    }
    /// Returns detection for a contour passing every threshold
    pub fn classify(&self, contour: Contour) -> Option<Detection> {
        let detection = match Detection::from_contour(contour) {
            Ok(v) => v,
            Err(err) => {
                log::trace!("Contour rejected: {}", err);
                return None;
            }
        };
        if !self.accepts(&detection) {
            log::trace!(
                "Contour rejected by thresholds: bbox {:?}, solidity {:.2}",
                detection.get_bbox(),
                detection.get_solidity()
            );
            return None;
        }
        Some(detection)
    }
    /// Classifies a whole frame. Arrival order is preserved
    pub fn filter_contours(&self, contours: Vec<Contour>) -> Vec<Detection> {
        contours
            .into_iter()
            .filter_map(|contour| self.classify(contour))
            .collect()
    }
}
