use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict intersection test: rectangles sharing only an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Area shared by both rectangles, zero when they only touch or are apart
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let overlap_w = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_h = self.bottom().min(other.bottom()) - self.y.max(other.y);

        if overlap_w <= 0.0 || overlap_h <= 0.0 {
            0.0
        } else {
            overlap_w * overlap_h
        }
    }

    pub fn fits_within(&self, canvas_width: f64, canvas_height: f64) -> bool {
        self.right() <= canvas_width && self.bottom() <= canvas_height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Rounds a coordinate to the nearest grid line.
///
/// A non-positive grid leaves the coordinate untouched.
pub fn snap_to_grid(coord: f64, grid_size: i32) -> f64 {
    if grid_size <= 0 {
        return coord;
    }

    let grid = f64::from(grid_size);
    (coord / grid).round() * grid
}
