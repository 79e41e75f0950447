//! Per-frame pipeline: contours -> detections -> tracks -> line counts
use std::sync::Arc;

use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};

use crate::config::{validate_lines, ConfigError, EngineConfig};
use crate::counting::{CountingLine, LineCount, LineCounter, LineId};
use crate::mot::{DetectionFilter, SimpleTracker, Track};
use crate::utils::{Contour, Polyline};

/// Message from the line editor
#[derive(Debug, Clone, PartialEq)]
pub enum LineConfigEvent {
    LinesChanged(Vec<CountingLine>),
}

/// Cloneable sender side of the line configuration channel.
/// Safe to use from any thread while the engine keeps processing frames.
#[derive(Debug, Clone)]
pub struct LineConfigHandle {
    tx: Sender<LineConfigEvent>,
}

impl LineConfigHandle {
    /// Queues a new line set. It becomes active at the start of the next processed frame.
    /// Returns false when the engine is gone.
    ///
    /// A set with duplicate line ids is refused by the engine, which keeps its previous lines.
    pub fn set_lines(&self, lines: Vec<CountingLine>) -> bool {
        self.tx.send(LineConfigEvent::LinesChanged(lines)).is_ok()
    }
    pub fn set_polyline(&self, polyline: &Polyline) -> bool {
        self.set_lines(polyline.to_counting_lines())
    }
}

/// Immutable result of one processed frame
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// 1-based
    pub frame_index: usize,
    pub processed_at: DateTime<Utc>,
    pub tracks: Arc<[Track]>,
    pub lines: Arc<[CountingLine]>,
    /// Per-line counts, in line configuration order
    pub counts: Vec<LineCount>,
    /// Lines crossed by at least one track during this frame
    pub crossed: Vec<LineId>,
}

/// Supplier of per-frame contours. `None` signals end of stream
pub trait ContourSource {
    fn next_contours(&mut self) -> Option<Vec<Contour>>;
}

impl<I> ContourSource for I
where
    I: Iterator<Item = Vec<Contour>>,
{
    fn next_contours(&mut self) -> Option<Vec<Contour>> {
        self.next()
    }
}

/// Tracking and counting engine. Processes one frame at a time
pub struct CountingEngine {
    filter: DetectionFilter,
    tracker: SimpleTracker,
    counter: LineCounter,
    events_tx: Sender<LineConfigEvent>,
    events_rx: Receiver<LineConfigEvent>,
    snapshot_tx: Option<Sender<FrameSnapshot>>,
}

impl CountingEngine {
    /// Creates news instance of CountingEngine
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::{config::EngineConfig, counting::{CountingLine, LineId}, engine::CountingEngine};
    /// let mut cfg = EngineConfig::default();
    /// cfg.lines.push(CountingLine::horizontal(LineId(0), 640, 480, 0.3));
    /// let mut engine = CountingEngine::new(cfg).unwrap();
    /// let snapshot = engine.process_frame(vec![]);
    /// assert_eq!(snapshot.counts[0].count, 0);
    /// ```
    ///
    /// Fails when the configuration does not pass [`EngineConfig::validate`]
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(CountingEngine::from_valid_config(config))
    }
    fn from_valid_config(config: EngineConfig) -> Self {
        let (events_tx, events_rx) = unbounded();
        CountingEngine {
            filter: DetectionFilter::new(config.detection),
            tracker: SimpleTracker::new(config.tracker),
            counter: LineCounter::new(config.lines),
            events_tx,
            events_rx,
            snapshot_tx: None,
        }
    }
    /// Every processed frame's snapshot is also offered to `tx`.
    /// Frames are never held back by the sink: when a bounded sink is full the snapshot is dropped.
    pub fn with_snapshot_sink(mut self, tx: Sender<FrameSnapshot>) -> Self {
        self.snapshot_tx = Some(tx);
        self
    }
    pub fn config_handle(&self) -> LineConfigHandle {
        LineConfigHandle {
            tx: self.events_tx.clone(),
        }
    }
    pub fn get_tracker(&self) -> &SimpleTracker {
        &self.tracker
    }
    pub fn get_counter(&self) -> &LineCounter {
        &self.counter
    }
    pub fn get_counts(&self) -> Vec<LineCount> {
        self.counter.get_counts()
    }
    // Only the most recent queued line set matters
    fn apply_line_events(&mut self) {
        if let Some(LineConfigEvent::LinesChanged(lines)) = self.events_rx.try_iter().last() {
            if let Err(e) = validate_lines(&lines) {
                log::warn!("Line configuration rejected, keeping previous lines: {}", e);
                return;
            }
            log::info!("Line configuration replaced: {} lines", lines.len());
            self.counter.set_lines(Arc::from(lines));
        }
    }
    /// Runs the full cycle for one frame: apply queued line edits, filter contours,
    /// match tracks, evict lost tracks, count crossings.
    pub fn process_frame(&mut self, contours: Vec<Contour>) -> FrameSnapshot {
        self.apply_line_events();

        let detections = self.filter.filter_contours(contours);
        self.tracker.match_objects(detections);
        let crossed = self.counter.evaluate(self.tracker.get_objects_mut());

        let snapshot = FrameSnapshot {
            frame_index: self.tracker.frames_processed(),
            processed_at: Utc::now(),
            tracks: Arc::from(self.tracker.get_objects().to_vec()),
            lines: self.counter.get_lines(),
            counts: self.counter.get_counts(),
            crossed,
        };
        if let Some(tx) = &self.snapshot_tx {
            // Slow or gone consumer loses the snapshot, frame cycle goes on
            match tx.try_send(snapshot.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    log::warn!("Snapshot sink is full, dropping frame {}", snapshot.frame_index);
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::warn!("Snapshot sink is disconnected, dropping frame {}", snapshot.frame_index);
                }
            }
        }
        snapshot
    }
    /// Processes frames until the source is exhausted. Returns number of processed frames
    pub fn run<S: ContourSource>(&mut self, source: &mut S) -> usize {
        let mut frames = 0;
        while let Some(contours) = source.next_contours() {
            self.process_frame(contours);
            frames += 1;
        }
        log::info!("Contour stream exhausted after {} frames", frames);
        frames
    }
}

impl Default for CountingEngine {
    fn default() -> Self {
        CountingEngine::from_valid_config(EngineConfig::default())
    }
}
