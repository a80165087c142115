//! Eye-height simulation: zoom the scene up from the ground and shrink the owner's feet
//! less aggressively, so a small dog looks up at a towering world.

use std::time::Duration;

use crate::{
    animation::ease::Ease,
    foundation::core::{Affine, Canvas, Point, Rect},
    model::SizeCategory,
};

/// Where the zoom pivots, in normalized canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub fn point_in(self, rect: Rect) -> Point {
        match self {
            Self::BottomCenter => Point::new(rect.center().x, rect.y1),
            Self::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }
}

/// Scale about an anchor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub anchor: Anchor,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        anchor: Anchor::BottomCenter,
    };

    /// Media zoom for a size class.
    pub fn for_size(size: SizeCategory) -> Self {
        let scale = match size {
            SizeCategory::Small => 3.5,
            SizeCategory::Medium => 2.0,
            SizeCategory::Large => 1.3,
            SizeCategory::Unknown => 1.0,
        };
        Self {
            scale,
            anchor: Anchor::BottomCenter,
        }
    }

    /// Feet overlay scale for a size class. Gentler than the media zoom so the feet stay
    /// proportionate as the background grows.
    pub fn overlay_for_size(size: SizeCategory) -> Self {
        let scale = match size {
            SizeCategory::Small => 1.05,
            SizeCategory::Medium => 0.90,
            SizeCategory::Large => 0.75,
            SizeCategory::Unknown => 1.0,
        };
        Self {
            scale,
            anchor: Anchor::BottomRight,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.scale == 1.0
    }

    /// Transform from content space to canvas space.
    pub fn affine(&self, canvas: Canvas) -> Affine {
        let pivot = self.anchor.point_in(canvas.rect()).to_vec2();
        Affine::translate(pivot) * Affine::scale(self.scale) * Affine::translate(-pivot)
    }

    /// The part of the content that ends up covering the whole canvas.
    pub fn visible_rect(&self, canvas: Canvas) -> Rect {
        self.affine(canvas)
            .inverse()
            .transform_rect_bbox(canvas.rect())
    }

    /// Interpolate the scale; the anchor snaps to `to`.
    pub fn lerp(&self, to: &Self, t: f64, ease: Ease) -> Self {
        Self {
            scale: ease.lerp(self.scale, to.scale, t),
            anchor: to.anchor,
        }
    }
}

/// Caption describing the vantage point.
pub fn describe(size: SizeCategory) -> &'static str {
    match size {
        SizeCategory::Small => "Low Angle (Macro)",
        SizeCategory::Medium => "Waist-height perspective.",
        SizeCategory::Large => "Near human hip-height.",
        SizeCategory::Unknown => "",
    }
}

/// Smooth change between two view transforms when the size class changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTransition {
    pub from: ViewTransform,
    pub to: ViewTransform,
    pub duration: Duration,
    pub ease: Ease,
}

impl ScaleTransition {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

    /// Already at rest on `view`.
    pub fn settled(view: ViewTransform) -> Self {
        Self {
            from: view,
            to: view,
            duration: Duration::ZERO,
            ease: Ease::OutCubic,
        }
    }

    pub fn new(from: ViewTransform, to: ViewTransform) -> Self {
        Self {
            from,
            to,
            duration: Self::DEFAULT_DURATION,
            ease: Ease::OutCubic,
        }
    }

    /// Restart toward `to`, beginning from wherever this transition was at `elapsed`.
    pub fn retarget(&self, elapsed: Duration, to: ViewTransform) -> Self {
        let current = self.sample(elapsed);
        if current == to {
            return Self::settled(to);
        }
        Self::new(current, to)
    }

    pub fn sample(&self, elapsed: Duration) -> ViewTransform {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from.lerp(&self.to, t, self.ease)
    }

    /// `frames` evenly spaced samples, first at the start and last at the target.
    pub fn frames(&self, frames: u32) -> Vec<ViewTransform> {
        match frames {
            0 => Vec::new(),
            1 => vec![self.to],
            n => (0..n)
                .map(|i| self.sample(self.duration.mul_f64(f64::from(i) / f64::from(n - 1))))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/perspective/scaler.rs"]
mod tests;
