//! Convex planar polygons, the unit of work of the BSP tree.

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use nalgebra::{Isometry3, Point3};

/// A convex ring of points lying in `plane`, wound counter-clockwise seen from the
/// side the plane faces.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Point3<Real>>,
    pub plane: Plane,
}

impl Polygon {
    pub fn new(vertices: Vec<Point3<Real>>, plane: Plane) -> Self {
        debug_assert!(vertices.len() >= 3, "polygon needs at least three vertices");
        Polygon { vertices, plane }
    }

    /// Turn the polygon inside out.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Fan from the first vertex; exact for convex rings.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        let anchor = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(move |pair| [anchor, pair[0], pair[1]])
    }

    pub fn area(&self) -> Real {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    /// Copy moved by a rigid motion.
    pub fn transformed(&self, motion: &Isometry3<Real>) -> Self {
        let vertices: Vec<Point3<Real>> = self.vertices.iter().map(|p| motion * p).collect();
        let plane = Plane::new(motion * self.plane.normal, &vertices[0]);
        Polygon { vertices, plane }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Translation3, UnitQuaternion, Vector3};

    fn pentagon() -> Polygon {
        let ring: Vec<_> = [[0.0, 0.0], [2.0, 0.0], [3.0, 1.0], [1.0, 3.0], [-1.0, 1.0]]
            .iter()
            .map(|[x, y]| Point3::new(*x, *y, 1.0))
            .collect();
        let plane = Plane::new(Vector3::z(), &ring[0]);
        Polygon::new(ring, plane)
    }

    #[test]
    fn fan_covers_the_ring() {
        let poly = pentagon();
        assert_eq!(poly.triangles().count(), 3);
        assert!((poly.area() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn flip_reverses_plane() {
        let mut poly = pentagon();
        let area = poly.area();
        poly.flip();
        assert_eq!(poly.plane.normal, -Vector3::z());
        assert_eq!(poly.plane.offset, -1.0);
        assert!((poly.area() - area).abs() < 1e-12);
    }

    #[test]
    fn motion_carries_the_plane() {
        let motion = Isometry3::from_parts(
            Translation3::new(0.0, 0.0, 2.0),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI as Real),
        );
        let moved = pentagon().transformed(&motion);
        assert!((moved.plane.normal + Vector3::z()).norm() < 1e-12);
        assert!((moved.plane.offset - -1.0).abs() < 1e-12);
        assert!(moved.vertices.iter().all(|p| (p.z - 1.0).abs() < 1e-12));
    }
}
