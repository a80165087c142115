use crate::foundation::{
    color::Color,
    core::{Affine, BezPath, Point, Vec2},
};

/// Shared paint servers emitted once in the document `<defs>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientRef {
    /// Horizontal edge darkening that reads as a cylinder.
    SkinShade,
    /// Diagonal white highlight for glossy leather.
    LeatherShine,
}

impl GradientRef {
    pub fn id(self) -> &'static str {
        match self {
            Self::SkinShade => "skinShade",
            Self::LeatherShine => "leatherShine",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterRef {
    /// Blurred, offset alpha under the source graphic.
    SoftShadow,
}

impl FilterRef {
    pub fn id(self) -> &'static str {
        match self {
            Self::SoftShadow => "softShadow",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(GradientRef),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub round_cap: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Path(BezPath),
    Ellipse { center: Point, radii: Vec2 },
}

impl Shape {
    fn transformed(self, affine: Affine) -> Self {
        match self {
            Self::Path(mut p) => {
                p.apply_affine(affine);
                Self::Path(p)
            }
            // Only translations are ever baked into ellipses.
            Self::Ellipse { center, radii } => Self::Ellipse {
                center: affine * center,
                radii,
            },
        }
    }
}

/// Which primitive of the leg stack an op belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Leg,
    Sock,
    Shoe,
    Pant,
}

/// One declarative drawing instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOp {
    pub layer: Layer,
    pub shape: Shape,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub opacity: f64,
    pub filter: Option<FilterRef>,
}

impl DrawOp {
    pub fn fill(layer: Layer, path: BezPath, paint: Paint) -> Self {
        Self {
            layer,
            shape: Shape::Path(path),
            fill: Some(paint),
            stroke: None,
            opacity: 1.0,
            filter: None,
        }
    }

    pub fn solid(layer: Layer, path: BezPath, color: Color) -> Self {
        Self::fill(layer, path, Paint::Solid(color))
    }

    pub fn stroke(layer: Layer, path: BezPath, stroke: Stroke) -> Self {
        Self {
            layer,
            shape: Shape::Path(path),
            fill: None,
            stroke: Some(stroke),
            opacity: 1.0,
            filter: None,
        }
    }

    pub fn ellipse(layer: Layer, center: Point, radii: Vec2, color: Color) -> Self {
        Self {
            layer,
            shape: Shape::Ellipse { center, radii },
            fill: Some(Paint::Solid(color)),
            stroke: None,
            opacity: 1.0,
            filter: None,
        }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self { opacity, ..self }
    }

    pub fn with_filter(self, filter: FilterRef) -> Self {
        Self {
            filter: Some(filter),
            ..self
        }
    }

    /// Bake a local offset into the geometry.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            shape: self.shape.transformed(Affine::translate((dx, dy))),
            ..self
        }
    }
}

/// Closed polygon through `pts`.
pub(crate) fn polygon(pts: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = pts.iter().copied();
    if let Some(first) = iter.next() {
        path.move_to(first);
        for p in iter {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

/// Open polyline through `pts`.
pub(crate) fn polyline(pts: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = pts.iter().copied();
    if let Some(first) = iter.next() {
        path.move_to(first);
        for p in iter {
            path.line_to(p);
        }
    }
    path
}

/// One leg's ops plus where the leg sits in the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LegGroup {
    pub transform: Affine,
    pub ops: Vec<DrawOp>,
}

/// The full owner-feet overlay: two legs sharing one outfit.
#[derive(Clone, Debug, PartialEq)]
pub struct FeetComposition {
    pub legs: [LegGroup; 2],
}

impl FeetComposition {
    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.legs.iter().flat_map(|l| l.ops.iter())
    }

    /// Whether the document needs the gradient in its `<defs>`.
    pub fn uses_gradient(&self, g: GradientRef) -> bool {
        self.ops().any(|op| op.fill == Some(Paint::Gradient(g)))
    }

    pub fn uses_filter(&self, filter: FilterRef) -> bool {
        self.ops().any(|op| op.filter == Some(filter))
    }
}
