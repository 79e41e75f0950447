//! Vehicle counting on top of a simple blob tracker.
//!
//! Every frame an external segmentation step supplies contours. They are filtered into
//! detections, associated with tracks, and each track's latest motion is tested against
//! the configured counting lines.
pub mod config;
pub mod counting;
pub mod engine;
pub mod mot;
pub mod utils;

pub use crate::config::{ConfigError, EngineConfig};
pub use crate::counting::{CountingLine, LineCounter, LineId};
pub use crate::engine::{ContourSource, CountingEngine, FrameSnapshot, LineConfigHandle};
pub use crate::mot::{Detection, DetectionFilter, SimpleTracker, Track};
