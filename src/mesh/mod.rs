//! Polygon solids and their Boolean operations.
//!
//! A [`Mesh`] is the closed boundary of a solid as a list of convex polygons.
//! Booleans go through [`bsp`] trees; the result is a polygon soup that
//! [`welded::WeldedMesh`] turns into an indexed, watertight triangle mesh.

use crate::float_types::Real;
use crate::mesh::polygon::Polygon;
use nalgebra::{Isometry3, Point3, Unit, UnitQuaternion, Vector3};

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod welded;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub const fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Mesh { polygons }
    }

    /// Fan triangles of every polygon.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.polygons.iter().flat_map(Polygon::triangles)
    }

    /// The same surface facing the other way: the complement solid.
    pub fn inverted(&self) -> Mesh {
        let mut polygons = self.polygons.clone();
        for polygon in &mut polygons {
            polygon.flip();
        }
        Mesh { polygons }
    }

    /// ```text
    ///     +-------+            +-------+
    ///     |   a   |            |       |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |       |
    ///          +-------+            +-------+
    /// ```
    pub fn union(&self, other: &Mesh) -> Mesh {
        Mesh::from_polygons(bsp::union(self.polygons.clone(), other.polygons.clone()))
    }

    /// `a − b = ¬(¬a ∪ b)`.
    ///
    /// ```text
    ///     +-------+            +-------+
    ///     |   a   |            |       |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          +-------+
    /// ```
    pub fn difference(&self, other: &Mesh) -> Mesh {
        self.inverted().union(other).inverted()
    }

    /// `a ∩ b = ¬(¬a ∪ ¬b)`.
    ///
    /// ```text
    ///     +-------+
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          +-------+
    /// ```
    pub fn intersection(&self, other: &Mesh) -> Mesh {
        self.inverted().union(&other.inverted()).inverted()
    }

    /// Rotated by `angle` radians about the line through `pivot` along `axis`.
    pub fn rotated_about(&self, pivot: &Point3<Real>, axis: &Unit<Vector3<Real>>, angle: Real) -> Mesh {
        let motion = Isometry3::rotation_wrt_point(UnitQuaternion::from_axis_angle(axis, angle), *pivot);
        Mesh {
            polygons: self
                .polygons
                .iter()
                .map(|polygon| polygon.transformed(&motion))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dissection::cuboid::Cuboid;
    use crate::mesh::welded::WeldedMesh;

    fn block(mins: [Real; 3], maxs: [Real; 3]) -> Mesh {
        Mesh::from_cuboid(&Cuboid::from_corners(Point3::from(mins), Point3::from(maxs)))
    }

    fn measure(mesh: &Mesh) -> WeldedMesh {
        WeldedMesh::from_mesh(mesh, 1e-9)
    }

    #[test]
    fn booleans_of_overlapping_blocks() {
        let a = block([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = block([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]);

        let union = measure(&a.union(&b));
        assert!((union.volume() - 15.0).abs() < 1e-9);
        assert!(union.is_closed());

        let difference = measure(&a.difference(&b));
        assert!((difference.volume() - 7.0).abs() < 1e-9);
        assert!(difference.is_closed());

        let intersection = measure(&a.intersection(&b));
        assert!((intersection.volume() - 1.0).abs() < 1e-9);
        assert!(intersection.is_closed());
    }

    #[test]
    fn inverted_mesh_has_negative_volume() {
        let a = block([0.0, 0.0, 0.0], [1.0, 2.0, 3.0]);
        assert!((measure(&a.inverted()).volume() + 6.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_about_a_pivot() {
        let a = block([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let pivot = Point3::new(1.0, 1.0, 1.0);
        let turned = measure(&a.rotated_about(&pivot, &Vector3::z_axis(), 0.3));
        assert!((turned.volume() - 8.0).abs() < 1e-9);
        let bb = turned.bounding_box();
        assert!((nalgebra::center(&bb.mins, &bb.maxs) - pivot).norm() < 1e-9);
    }
}
