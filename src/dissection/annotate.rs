//! Dimension lines drawn beside the assembly.

use crate::dissection::bounds::AssemblyBounds;
use crate::float_types::Real;
use nalgebra::Point3;

/// Distance between the bounds and each dimension line.
pub const DIMENSION_MARGIN: Real = 2.0;
/// How far above the line midpoint its label sits.
pub const LABEL_LIFT: Real = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLine {
    pub axis: Axis,
    pub start: Point3<Real>,
    pub end: Point3<Real>,
    /// Length with one decimal, e.g. `"27.0"`.
    pub label: String,
    pub label_position: Point3<Real>,
}

impl DimensionLine {
    fn new(axis: Axis, start: Point3<Real>, end: Point3<Real>) -> Self {
        let length = (end - start).norm();
        let mut label_position = nalgebra::center(&start, &end);
        label_position.y += LABEL_LIFT;
        DimensionLine {
            axis,
            start,
            end,
            label: format!("{length:.1}"),
            label_position,
        }
    }

    pub fn length(&self) -> Real {
        (self.end - self.start).norm()
    }
}

/// Width (X), height (Y) and depth (Z) lines for `bounds`.
pub fn annotate(bounds: &AssemblyBounds) -> [DimensionLine; 3] {
    let (lo, hi) = (bounds.min(), bounds.max());
    let m = DIMENSION_MARGIN;
    [
        DimensionLine::new(
            Axis::X,
            Point3::new(lo.x, lo.y - m, hi.z + m),
            Point3::new(hi.x, lo.y - m, hi.z + m),
        ),
        DimensionLine::new(
            Axis::Y,
            Point3::new(lo.x - m, lo.y, hi.z + m),
            Point3::new(lo.x - m, hi.y, hi.z + m),
        ),
        DimensionLine::new(
            Axis::Z,
            Point3::new(hi.x + m, lo.y - m, lo.z),
            Point3::new(hi.x + m, lo.y - m, hi.z),
        ),
    ]
}

/// [`annotate`], or nothing while the pieces are pulled apart.
pub fn visible_annotations(bounds: &AssemblyBounds, explode: bool) -> Option<[DimensionLine; 3]> {
    (!explode).then(|| annotate(bounds))
}
