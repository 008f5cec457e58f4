//! Box solids.

use crate::dissection::cuboid::Cuboid;
use crate::mesh::{Mesh, plane::Plane, polygon::Polygon};
use nalgebra::Vector3;

/// Corner indices into [`Cuboid::corners`] (bit 0 = +X, bit 1 = +Y, bit 2 = +Z),
/// counter-clockwise seen from outside, with the outward normal.
const FACES: [([usize; 4], [i8; 3]); 6] = [
    ([0, 2, 3, 1], [0, 0, -1]),
    ([4, 5, 7, 6], [0, 0, 1]),
    ([0, 1, 5, 4], [0, -1, 0]),
    ([2, 6, 7, 3], [0, 1, 0]),
    ([0, 4, 6, 2], [-1, 0, 0]),
    ([1, 3, 7, 5], [1, 0, 0]),
];

impl Mesh {
    /// Six quads bounding `cuboid`.
    ///
    /// Face planes are built from the exact axis normals, so faces of two boxes
    /// that share a side land on the same plane bit for bit.
    pub fn from_cuboid(cuboid: &Cuboid) -> Mesh {
        let corners = cuboid.corners();
        let polygons = FACES
            .iter()
            .map(|(ring, normal)| {
                let vertices: Vec<_> = ring.iter().map(|&i| corners[i]).collect();
                let normal = Vector3::from(normal.map(Into::into));
                let plane = Plane::new(normal, &vertices[0]);
                Polygon::new(vertices, plane)
            })
            .collect();
        Mesh::from_polygons(polygons)
    }
}
