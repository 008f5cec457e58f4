//! Bounds of the whole assembly, and the centering / floor values derived from them.

use crate::dissection::cuboid::Cuboid;
use crate::dissection::decomposition::Piece;
use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use nalgebra::{Point3, Vector3};

/// Gap between the bottom of the assembly and the floor.
pub const FLOAT_OFFSET: Real = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyBounds {
    pub aabb: Aabb,
}

impl AssemblyBounds {
    /// Bounds of every box of `pieces` moved by the matching entry of `offsets`.
    ///
    /// Pieces without an offset are taken where they are.
    pub fn compute(pieces: &[Piece], offsets: &[Vector3<Real>]) -> Self {
        let boxes = pieces.iter().enumerate().flat_map(|(i, piece)| {
            let offset = offsets.get(i).copied().unwrap_or_else(Vector3::zeros);
            piece.boxes.iter().map(move |b| b.translated(&offset))
        });
        Self::from_boxes(boxes)
    }

    pub fn from_boxes<I: IntoIterator<Item = Cuboid>>(boxes: I) -> Self {
        Self::from_aabbs(boxes.into_iter().map(|b| b.to_aabb()))
    }

    /// Merged bounds; empty input collapses to a point at the origin.
    pub fn from_aabbs<I: IntoIterator<Item = Aabb>>(aabbs: I) -> Self {
        let aabb = aabbs
            .into_iter()
            .reduce(|acc, bb| acc.merged(&bb))
            .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()));
        AssemblyBounds { aabb }
    }

    pub fn min(&self) -> Point3<Real> {
        self.aabb.mins
    }

    pub fn max(&self) -> Point3<Real> {
        self.aabb.maxs
    }

    pub fn size(&self) -> Vector3<Real> {
        self.aabb.maxs - self.aabb.mins
    }

    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.aabb.mins, &self.aabb.maxs)
    }

    /// Translation that puts the center at the origin.
    pub fn recenter_offset(&self) -> Vector3<Real> {
        -self.center().coords
    }

    /// Height of the floor plane under the recentred assembly.
    pub fn floor_reference(&self) -> Real {
        -self.size().y / 2.0 - FLOAT_OFFSET
    }

    /// Whether `other` fits inside these bounds.
    pub fn contains(&self, other: &AssemblyBounds) -> bool {
        self.aabb.contains(&other.aabb)
    }
}
