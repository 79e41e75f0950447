use serde::{Deserialize, Serialize};

use crate::mot::{Detection, Track, HISTORY_DEPTH};

/// Tunables of [`SimpleTracker`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    // Track is removed once its miss streak reaches this value. Default is 5
    pub max_no_match: usize,
    // Number of points in object's track to predict next position. Default is 5
    pub depth_prediction: usize,
    // Detection matches a track when the distance to the track's predicted position
    // is below detection's diagonal multiplied by this value. Default is 0.5
    pub match_distance_ratio: f32,
    // Number of first frames where every detection starts a new track. Default is 2
    pub bootstrap_frames: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerSettings {
            max_no_match: 5,
            depth_prediction: HISTORY_DEPTH,
            match_distance_ratio: 0.5,
            bootstrap_frames: 2,
        }
    }
}

/// Naive implementation of Multi-object tracker (MOT).
///
/// Association is greedy: every detection, in arrival order, picks the track with the
/// closest predicted position. A track already claimed in this frame stays eligible
/// for the following detections, so a later detection may take it over again.
pub struct SimpleTracker {
    settings: TrackerSettings,
    // Number of processed frames
    frames: usize,
    // Storage. Creation order is the scan order
    objects: Vec<Track>,
}

impl SimpleTracker {
    /// Creates default instance of SimpleTracker
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::mot::SimpleTracker;
    /// let mut tracker = SimpleTracker::default();
    /// ```
    pub fn default() -> Self {
        SimpleTracker::new(TrackerSettings::default())
    }
    /// Creates news instance of SimpleTracker
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::mot::{SimpleTracker, TrackerSettings};
    /// let settings = TrackerSettings { max_no_match: 10, ..TrackerSettings::default() };
    /// let mut tracker = SimpleTracker::new(settings);
    /// ```
    pub fn new(_settings: TrackerSettings) -> Self {
        SimpleTracker {
            settings: _settings,
            frames: 0,
            objects: Vec::new(),
        }
    }
    pub fn get_settings(&self) -> &TrackerSettings {
        &self.settings
    }
    pub fn frames_processed(&self) -> usize {
        self.frames
    }
    pub fn get_objects(&self) -> &[Track] {
        &self.objects
    }
    pub fn get_objects_mut(&mut self) -> &mut [Track] {
        &mut self.objects
    }
    pub fn len(&self) -> usize {
        self.objects.len()
    }
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
    // Matches new objects to existing ones
    pub fn match_objects(&mut self, new_objects: Vec<Detection>) {
        self.frames += 1;
        if self.frames <= self.settings.bootstrap_frames {
            // Nothing to match against yet: start from scratch with current detections
            self.objects = new_objects.into_iter().map(Track::new).collect();
            log::debug!("Bootstrap frame {}: {} tracks", self.frames, self.objects.len());
            return;
        }

        for object in self.objects.iter_mut() {
            // Make sure that object is marked as not matched
            object.deactivate();
            object.predict_next_position(self.settings.depth_prediction);
        }

        for new_object in new_objects {
            // Find existing track with min distance to new one. First seen wins on ties
            let mut min_idx: Option<usize> = None;
            let mut min_distance = f32::MAX;
            for (j, object) in self.objects.iter().enumerate() {
                let dist = object.distance_to_predicted(&new_object);
                if dist < min_distance {
                    min_distance = dist;
                    min_idx = Some(j);
                }
            }
            let threshold = new_object.get_diagonal() * self.settings.match_distance_ratio;
            if min_distance < threshold {
                if let Some(object) = min_idx.and_then(|j| self.objects.get_mut(j)) {
                    object.update(new_object);
                    continue;
                }
            }
            // Otherwise register object as a new one
            let track = Track::new(new_object);
            log::debug!("New track {} at {:?}", track.get_id(), track.get_center());
            self.objects.push(track);
        }

        // Clean up existing data
        let max_no_match = self.settings.max_no_match;
        self.objects.retain_mut(|object| {
            if object.is_matched() {
                return true;
            }
            object.inc_no_match();
            // Remove object if it was not found for a long time
            let delete = object.get_no_match_times() >= max_no_match;
            if delete {
                log::debug!("Track {} evicted after {} missed frames", object.get_id(), max_no_match);
            }
            !delete // <- if we want to keep object closure should return true
        });
    }
}
