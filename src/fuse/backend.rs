//! The boolean capability the fuser needs, and the BSP-tree implementation of it.

use crate::dissection::cuboid::Cuboid;
use crate::float_types::Real;
use crate::mesh::{Mesh, welded::WeldedMesh};
use nalgebra::{Point3, Unit, Vector3};

/// Minimal solid-modelling surface used to fuse pieces.
///
/// Implementations are free to pick their own solid representation; the fuser only
/// ever hands solids back to the backend that made them and asks for a welded mesh
/// at the end.
pub trait BooleanBackend {
    type Solid: Clone;

    /// Solid occupying exactly `cuboid`.
    fn cuboid(&self, cuboid: &Cuboid) -> Self::Solid;

    fn union(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    /// `a` minus `b`.
    fn subtract(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    fn intersect(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    /// Rotate by `angle` radians about `axis` through `pivot`.
    fn rotate_about(
        &self,
        solid: &Self::Solid,
        pivot: &Point3<Real>,
        axis: &Unit<Vector3<Real>>,
        angle: Real,
    ) -> Self::Solid;

    /// Triangulate and weld the solid's boundary.
    fn weld(&self, solid: &Self::Solid, tolerance: Real) -> WeldedMesh;
}

/// Backend built on the crate's polygon [`Mesh`] and its BSP-tree booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspBackend;

impl BooleanBackend for BspBackend {
    type Solid = Mesh;

    fn cuboid(&self, cuboid: &Cuboid) -> Mesh {
        Mesh::from_cuboid(cuboid)
    }

    fn union(&self, a: &Mesh, b: &Mesh) -> Mesh {
        a.union(b)
    }

    fn subtract(&self, a: &Mesh, b: &Mesh) -> Mesh {
        a.difference(b)
    }

    fn intersect(&self, a: &Mesh, b: &Mesh) -> Mesh {
        a.intersection(b)
    }

    fn rotate_about(&self, solid: &Mesh, pivot: &Point3<Real>, axis: &Unit<Vector3<Real>>, angle: Real) -> Mesh {
        solid.rotated_about(pivot, axis, angle)
    }

    fn weld(&self, solid: &Mesh, tolerance: Real) -> WeldedMesh {
        WeldedMesh::from_mesh(solid, tolerance)
    }
}
