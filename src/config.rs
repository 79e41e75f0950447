use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::counting::CountingLine;
use crate::mot::{DetectionThresholds, TrackerSettings, HISTORY_DEPTH};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Can't read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Can't parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine setup. Every section falls back to its defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub detection: DetectionThresholds,
    pub tracker: TrackerSettings,
    pub lines: Vec<CountingLine>,
}

impl EngineConfig {
    /// Load from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.detection;
        if d.min_aspect_ratio >= d.max_aspect_ratio {
            return Err(ConfigError::Invalid(format!(
                "aspect ratio band is empty: [{}, {}]",
                d.min_aspect_ratio, d.max_aspect_ratio
            )));
        }
        let t = &self.tracker;
        if t.max_no_match == 0 {
            return Err(ConfigError::Invalid("max_no_match must be positive".to_string()));
        }
        if t.depth_prediction == 0 || t.depth_prediction > HISTORY_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "depth_prediction must be in [1, {}], got {}",
                HISTORY_DEPTH, t.depth_prediction
            )));
        }
        if !(t.match_distance_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "match_distance_ratio must be positive, got {}",
                t.match_distance_ratio
            )));
        }
        validate_lines(&self.lines)
    }
}

/// Every counting line must carry its own id: counts and per-track bookkeeping are keyed by it
pub fn validate_lines(lines: &[CountingLine]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for line in lines {
        if !seen.insert(line.id) {
            return Err(ConfigError::Invalid(format!("duplicate {}", line.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::LineId;

    #[test]
    fn test_defaults_when_empty() {
        let cfg = EngineConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.detection.min_width, 40.0);
        assert_eq!(cfg.tracker.max_no_match, 5);
        assert!(cfg.lines.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let cfg = EngineConfig::from_json(
            r#"{
                "detection": {"min_width": 30.0, "min_height": null},
                "tracker": {"bootstrap_frames": 1},
                "lines": [
                    {"id": 4, "from": {"x": 0.0, "y": 200.0}, "to": {"x": 640.0, "y": 200.0}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.detection.min_width, 30.0);
        assert_eq!(cfg.detection.min_height, None);
        assert_eq!(cfg.detection.min_area, 600.0);
        assert_eq!(cfg.tracker.bootstrap_frames, 1);
        assert_eq!(cfg.tracker.max_no_match, 5);
        assert_eq!(cfg.lines[0].id, LineId(4));
    }

    #[test]
    fn test_invalid() {
        let err = EngineConfig::from_json(r#"{"detection": {"min_aspect_ratio": 5.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = EngineConfig::from_json(r#"{"tracker": {"max_no_match": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let line = r#"{"id": 1, "from": {"x": 0.0, "y": 0.0}, "to": {"x": 1.0, "y": 0.0}}"#;
        let err = EngineConfig::from_json(&format!(r#"{{"lines": [{}, {}]}}"#, line, line)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = EngineConfig::from_json(r#"{"tracker": {"depth_prediction": 6}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let cfg = EngineConfig::from_json(r#"{"tracker": {"depth_prediction": 5}}"#).unwrap();
        assert_eq!(cfg.tracker.depth_prediction, HISTORY_DEPTH);
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        let err = EngineConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
