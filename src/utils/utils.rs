use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(_x: f32, _y: f32, _width: f32, _height: f32) -> Self {
        Rect {
            x: _x,
            y: _y,
            width: _width,
            height: _height,
        }
    }
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
    /// Center of the rectangle (not the centroid of whatever shape it encloses)
    pub fn center(&self) -> Point {
        Point::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }
    pub fn diagonal(&self) -> f32 {
        f32::sqrt(self.width * self.width + self.height * self.height)
    }
}

/// Point in frame pixel coordinates (y axis grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(_x: f32, _y: f32) -> Self {
        Point { x: _x, y: _y }
    }
}

/// Polygon boundary as produced by the segmentation step
pub type Contour = Vec<Point>;

pub fn euclidean_distance(p1: &Point, p2: &Point) -> f32 {
    let x_squared = f32::powi(p1.x - p2.x, 2);
    let y_squared = f32::powi(p1.y - p2.y, 2);
    f32::sqrt(x_squared + y_squared)
}

/// Axis-aligned rectangle enclosing every point of the contour.
/// Returns None for an empty contour.
pub fn bounding_rect(contour: &[Point]) -> Option<Rect> {
    let first = contour.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for pt in &contour[1..] {
        min_x = min_x.min(pt.x);
        min_y = min_y.min(pt.y);
        max_x = max_x.max(pt.x);
        max_y = max_y.max(pt.y);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Unsigned polygon area (shoelace formula). Contour is treated as closed.
pub fn contour_area(contour: &[Point]) -> f32 {
    if contour.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, a) in contour.iter().enumerate() {
        let b = &contour[(i + 1) % contour.len()];
        twice_area += a.x * b.y - b.x * a.y;
    }
    f32::abs(twice_area) * 0.5
}
