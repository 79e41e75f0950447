use std::collections::HashMap;
use std::sync::Arc;

use crate::counting::{CountingLine, LineId};
use crate::mot::Track;
use crate::utils::segments_intersect;

/// Count of a single line as reported to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCount {
    pub id: LineId,
    pub count: usize,
}

/// Directional line-crossing counter.
///
/// The active line set is an immutable snapshot replaced as a whole. Counts are keyed
/// by [`LineId`] and never decrease: a line removed from the configuration and later
/// re-added under the same id continues from its previous value.
#[derive(Debug, Clone)]
pub struct LineCounter {
    lines: Arc<[CountingLine]>,
    counts: HashMap<LineId, usize>,
}

impl LineCounter {
    /// Creates news instance of LineCounter
    ///
    /// Basic usage:
    ///
    /// ```
    /// use line_counter::counting::{CountingLine, LineCounter, LineId};
    /// let counter = LineCounter::new(vec![CountingLine::horizontal(LineId(0), 640, 480, 0.3)]);
    /// assert_eq!(counter.get_count(LineId(0)), 0);
    /// ```
    pub fn new(lines: Vec<CountingLine>) -> Self {
        let mut counter = LineCounter {
            lines: Arc::from(Vec::new()),
            counts: HashMap::new(),
        };
        counter.set_lines(Arc::from(lines));
        counter
    }
    /// Current line snapshot
    pub fn get_lines(&self) -> Arc<[CountingLine]> {
        Arc::clone(&self.lines)
    }
    /// Replaces the whole line set
    pub fn set_lines(&mut self, lines: Arc<[CountingLine]>) {
        for line in lines.iter() {
            self.counts.entry(line.id).or_insert(0);
        }
        self.lines = lines;
    }
    pub fn get_count(&self, id: LineId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }
    /// Counts of the active lines, in configuration order
    pub fn get_counts(&self) -> Vec<LineCount> {
        self.lines
            .iter()
            .map(|line| LineCount {
                id: line.id,
                count: self.get_count(line.id),
            })
            .collect()
    }
    /// Tests latest motion of every track against every active line.
    ///
    /// A track is credited at most once per line for its whole lifetime.
    /// Returns ids of the lines crossed during this call, in configuration order.
    pub fn evaluate(&mut self, tracks: &mut [Track]) -> Vec<LineId> {
        // Hold on to one snapshot for the whole pass
        let lines = Arc::clone(&self.lines);
        let mut crossed = Vec::new();
        for line in lines.iter() {
            let line_segment = line.segment();
            let mut line_crossed = false;
            for track in tracks.iter_mut() {
                if track.is_counted_on(line.id) {
                    continue;
                }
                let motion = match track.motion_segment() {
                    Some(v) => v,
                    None => continue,
                };
                let intersection = segments_intersect(&line_segment, &motion);
                if intersection.intersects && intersection.direction_down {
                    *self.counts.entry(line.id).or_insert(0) += 1;
                    track.mark_counted(line.id);
                    line_crossed = true;
                    log::info!(
                        "Track {} crossed {} (count {})",
                        track.get_id(),
                        line.id,
                        self.get_count(line.id)
                    );
                }
            }
            if line_crossed {
                crossed.push(line.id);
            }
        }
        crossed
    }
}
