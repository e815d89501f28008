use serde::{Deserialize, Serialize};

/// Axis-aligned box in page-normalized coordinates (`[0, 1]` on both axes).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Builds a normalized box from pixel coordinates.
    ///
    /// Callers must pass non-zero image dimensions. Results are clamped into
    /// `[0, 1]` because detectors routinely report polygons a few pixels past
    /// the image border.
    pub fn from_pixels(x0: f32, y0: f32, x1: f32, y1: f32, width: u32, height: u32) -> Self {
        let w = width as f32;
        let h = height as f32;
        Self {
            x0: (x0 / w).clamp(0.0, 1.0),
            y0: (y0 / h).clamp(0.0, 1.0),
            x1: (x1 / w).clamp(0.0, 1.0),
            y1: (y1 / h).clamp(0.0, 1.0),
        }
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) * 0.5
    }

    /// Componentwise arithmetic mean. `None` for an empty iterator.
    pub fn mean<'a, I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a BBox>,
    {
        let mut count = 0usize;
        let mut acc = [0.0f32; 4];
        for b in boxes {
            acc[0] += b.x0;
            acc[1] += b.y0;
            acc[2] += b.x1;
            acc[3] += b.y1;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f32;
        Some(Self::new(acc[0] / n, acc[1] / n, acc[2] / n, acc[3] / n))
    }

    /// Describes why this box cannot be used for layout, if anything.
    pub fn degeneracy(&self) -> Option<&'static str> {
        let coords = [self.x0, self.y0, self.x1, self.y1];
        if coords.iter().any(|c| !c.is_finite()) {
            return Some("non-finite coordinate");
        }
        if coords.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Some("coordinate outside [0, 1]");
        }
        if self.x1 < self.x0 || self.y1 < self.y0 {
            return Some("inverted corners");
        }
        None
    }
}
