use crate::float_types::Real;
use crate::mesh::welded::WeldedMesh;
use nalgebra::Vector3;
use std::fmt::Write as _;

impl WeldedMesh {
    /// Facets as `(normal, corners)`. The normal follows the winding; slivers fall
    /// back to the first corner's smooth normal.
    fn facets(&self) -> impl Iterator<Item = (Vector3<Real>, [[Real; 3]; 3])> + '_ {
        self.indices().iter().map(|face| {
            let [a, b, c] = face.map(|i| self.positions()[i as usize]);
            let normal = (b - a)
                .cross(&(c - a))
                .try_normalize(Real::EPSILON)
                .unwrap_or(self.normals()[face[0] as usize]);
            (normal, [a, b, c].map(|p| [p.x, p.y, p.z]))
        })
    }

    /// Convert to an **ASCII STL** string with the given solid `name`.
    ///
    /// ```rust
    /// # use dissectrs::dissection::cuboid::Cuboid;
    /// # use dissectrs::mesh::{Mesh, welded::WeldedMesh};
    /// # use nalgebra::Point3;
    /// let cube = Mesh::from_cuboid(&Cuboid::from_corners(Point3::origin(), Point3::new(1.0, 1.0, 1.0)));
    /// let welded = WeldedMesh::from_mesh(&cube, 1e-6);
    /// let text = welded.to_stl_ascii("cube");
    /// assert!(text.starts_with("solid cube"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "solid {name}");
        for (n, corners) in self.facets() {
            let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
            out.push_str("    outer loop\n");
            for [x, y, z] in corners {
                let _ = writeln!(out, "      vertex {x:.6} {y:.6} {z:.6}");
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }
        let _ = writeln!(out, "endsolid {name}");
        out
    }

    /// Export to **binary STL**.
    ///
    /// The 80-byte header written by `stl_io` carries no name, so `_name` is unused.
    #[cfg(feature = "stl-io")]
    #[allow(clippy::unnecessary_cast)]
    pub fn to_stl_binary(&self, _name: &str) -> std::io::Result<Vec<u8>> {
        use stl_io::{Normal, Triangle, Vertex, write_stl};

        let triangles: Vec<Triangle> = self
            .facets()
            .map(|(n, corners)| Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: corners.map(|[x, y, z]| Vertex::new([x as f32, y as f32, z as f32])),
            })
            .collect();

        let mut cursor = std::io::Cursor::new(Vec::new());
        write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }
}
