use crate::foundation::error::{DogViewError, DogViewResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Largest raster edge we will allocate.
pub const MAX_DIM: u32 = 16_384;

impl Canvas {
    pub fn new(width: u32, height: u32) -> DogViewResult<Self> {
        if width == 0 || height == 0 {
            return Err(DogViewError::validation("canvas must be at least 1x1"));
        }
        if width > MAX_DIM || height > MAX_DIM {
            return Err(DogViewError::validation(format!(
                "canvas too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        // 16:9, matching an aspect-video viewport.
        Self {
            width: 1280,
            height: 720,
        }
    }
}
