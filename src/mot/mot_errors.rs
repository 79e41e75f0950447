use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("Contour must have at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("Degenerate bounding box: width {width}, height {height}")]
    DegenerateBBox { width: f32, height: f32 },
    #[error("Non-finite coordinate in contour")]
    NonFinite,
}
