//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use dissectrs::{
    dissection::{cuboid::Cuboid, decomposition::Decomposition, schedule::Step},
    float_types::Real,
    mesh::welded::WeldedMesh,
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Relative comparison, for values that grow with `k`.
pub fn approx_rel(a: Real, b: Real, rel: Real) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs())
}

pub fn approx_point(a: &Point3<Real>, b: &Point3<Real>, eps: Real) -> bool {
    (a - b).norm() < eps
}

/// Every box of every piece moved by the matching offset, tagged with its piece index.
pub fn placed_boxes(d: &Decomposition, offsets: &[Vector3<Real>]) -> Vec<(usize, Cuboid)> {
    d.pieces
        .iter()
        .zip(offsets)
        .flat_map(|(piece, offset)| piece.boxes.iter().map(move |b| (piece.id.index(), b.translated(offset))))
        .collect()
}

/// Centers of the unit cells of `mins..maxs` sampled every `step` units.
pub fn cell_centers(mins: Point3<Real>, maxs: Point3<Real>, step: Real) -> Vec<Point3<Real>> {
    let counts = (maxs - mins) / step;
    let (nx, ny, nz) = (
        counts.x.round() as usize,
        counts.y.round() as usize,
        counts.z.round() as usize,
    );
    let mut points = Vec::with_capacity(nx * ny * nz);
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                points.push(Point3::new(
                    mins.x + (i as Real + 0.5) * step,
                    mins.y + (j as Real + 0.5) * step,
                    mins.z + (k as Real + 0.5) * step,
                ));
            }
        }
    }
    points
}

/// Number of boxes containing `p`.
pub fn coverage(boxes: &[(usize, Cuboid)], p: &Point3<Real>) -> usize {
    boxes.iter().filter(|(_, b)| b.contains_point(p)).count()
}

/// Whole-assembly extent the walkthrough targets at `step` for scale `k`.
pub fn expected_extent(step: Step, k: Real) -> Vector3<Real> {
    match step {
        Step::Cube => Vector3::repeat(3.0 * k),
        Step::FirstSlide => Vector3::new(4.5 * k, 2.0 * k, 3.0 * k),
        Step::Assembled => Vector3::new(6.75 * k, 2.0 * k, 2.0 * k),
    }
}

pub fn assert_welded_consistent(mesh: &WeldedMesh) {
    assert_eq!(mesh.positions().len(), mesh.normals().len());
    let n = mesh.vertex_count() as u32;
    assert!(mesh.indices().iter().flatten().all(|&i| i < n));
    for normal in mesh.normals() {
        assert!(approx_eq(normal.norm(), 1.0, 1e-9));
    }
}
