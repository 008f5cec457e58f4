//! The oblique-cut variant: the cube split by two tilted planes instead of staircases.
//!
//! Both planes pass through the cube's center and drop by one unit for every three
//! along +X: `y = −x/3 + 2k` and `z = −x/3 + 2k`. Each is realised as the top face of a
//! large box rotated about the center, and the four pieces are the four
//! keep/remove combinations of the cube against the two boxes.

use crate::dissection::cuboid::Cuboid;
use crate::dissection::decomposition::PieceId;
use crate::dissection::scale::ScaleFactor;
use crate::errors::{DissectionError, Result};
use crate::float_types::Real;
use crate::fuse::{BooleanBackend, BspFuser, MeshFuser};
use crate::mesh::welded::WeldedMesh;
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

/// Rise over run of both cutting planes.
pub const CUT_SLOPE: Real = -1.0 / 3.0;

/// The two cutting planes for one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObliqueCut {
    pub scale: ScaleFactor,
}

impl ObliqueCut {
    pub const fn new(scale: ScaleFactor) -> Self {
        ObliqueCut { scale }
    }

    /// Cube center; the cutters rotate about it.
    pub fn pivot(&self) -> Point3<Real> {
        Point3::from(Vector3::repeat(self.scale.cube_side() / 2.0))
    }

    /// Value of both planes at `x = 0`, i.e. `2k`.
    pub fn intercept(&self) -> Real {
        self.scale.prism_base()
    }

    /// Height of the cutting plane above `x` (same formula for the Y and Z cut).
    pub fn plane_height(&self, x: Real) -> Real {
        CUT_SLOPE * x + self.intercept()
    }

    /// Unrotated cutter: a box hanging below the plane through the pivot with
    /// normal `up` (`+Y` or `+Z`).
    fn cutter_box(&self, up: usize) -> Cuboid {
        let side = self.scale.cube_side();
        let pivot = self.pivot();
        let mut mins = pivot - Vector3::repeat(2.0 * side);
        let mut maxs = pivot + Vector3::repeat(2.0 * side);
        mins[up] = pivot[up] - 4.0 * side;
        maxs[up] = pivot[up];
        Cuboid::from_corners(mins, maxs)
    }

    /// Cutters whose inside is `y < −x/3 + 2k` and `z < −x/3 + 2k` respectively.
    pub fn cutters<B: BooleanBackend>(&self, backend: &B) -> (B::Solid, B::Solid) {
        let pivot = self.pivot();
        let angle = CUT_SLOPE.atan();
        let y_cutter = backend.rotate_about(
            &backend.cuboid(&self.cutter_box(1)),
            &pivot,
            &Vector3::z_axis(),
            angle,
        );
        // turning +Z towards +X is a positive rotation about +Y
        let z_cutter = backend.rotate_about(
            &backend.cuboid(&self.cutter_box(2)),
            &pivot,
            &Vector3::y_axis(),
            -angle,
        );
        (y_cutter, z_cutter)
    }

    /// Which piece contains `point`, for points not on a cutting plane.
    pub fn piece_at(&self, point: &Point3<Real>) -> PieceId {
        let h = self.plane_height(point.x);
        match (point.y < h, point.z < h) {
            (true, true) => PieceId::ONE,
            (true, false) => PieceId::TWO,
            (false, true) => PieceId::THREE,
            (false, false) => PieceId::FOUR,
        }
    }

    /// Exact volume of each piece.
    ///
    /// With `h(x)` the plane height and `L` the side, the cross-sections are `h²`,
    /// `h(L − h)`, `(L − h)h` and `(L − h)²`.
    pub fn piece_volumes(&self) -> [Real; 4] {
        let k = self.scale.k();
        let k3 = k * k * k;
        // canonical 448, 416, 416, 448 at k = 4 (k³ = 64)
        [7.0 * k3, 6.5 * k3, 6.5 * k3, 7.0 * k3]
    }
}

impl<B: BooleanBackend> MeshFuser<B> {
    /// Cut the cube of `scale` into the four oblique pieces, ordered by [`PieceId`].
    pub fn oblique_pieces(&self, scale: ScaleFactor) -> Result<[WeldedMesh; 4]> {
        let cut = ObliqueCut::new(scale);
        let side = scale.cube_side();
        let cube = self
            .backend
            .cuboid(&Cuboid::from_corners(Point3::origin(), Point3::from(Vector3::repeat(side))));
        let (y_cutter, z_cutter) = cut.cutters(&self.backend);

        let low_y = self.backend.intersect(&cube, &y_cutter);
        let high_y = self.backend.subtract(&cube, &y_cutter);
        let solids = [
            self.backend.intersect(&low_y, &z_cutter),
            self.backend.subtract(&low_y, &z_cutter),
            self.backend.intersect(&high_y, &z_cutter),
            self.backend.subtract(&high_y, &z_cutter),
        ];

        let expected = cut.piece_volumes();
        let mut meshes = Vec::with_capacity(4);
        for (id, solid) in PieceId::ALL.into_iter().zip(&solids) {
            let welded = self.backend.weld(solid, self.weld_tolerance(side));
            if let Err(err) = self.check_solid(&welded, expected[id.index()]) {
                warn!(%id, %err, "oblique cut rejected");
                return Err(err);
            }
            debug!(%id, triangles = welded.triangle_count(), "cut oblique piece");
            meshes.push(welded);
        }

        meshes.try_into().map_err(|_| DissectionError::FusionFailure {
            details: "oblique cut did not yield four pieces".to_string(),
        })
    }
}

/// [`MeshFuser::oblique_pieces`] on the BSP backend with default tolerances.
pub fn cut_cube(scale: ScaleFactor) -> Result<[WeldedMesh; 4]> {
    BspFuser::default().oblique_pieces(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planes_pass_through_the_pivot() {
        let cut = ObliqueCut::new(ScaleFactor::canonical());
        assert_eq!(cut.pivot(), Point3::new(6.0, 6.0, 6.0));
        assert!((cut.plane_height(6.0) - 6.0).abs() < 1e-12);
        assert!((cut.plane_height(0.0) - 8.0).abs() < 1e-12);
        assert!((cut.plane_height(12.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn analytic_volumes_sum_to_cube() {
        let cut = ObliqueCut::new(ScaleFactor::canonical());
        assert_eq!(cut.piece_volumes(), [448.0, 416.0, 416.0, 448.0]);
        assert_eq!(cut.piece_volumes().iter().sum::<Real>(), 1728.0);
    }

    #[test]
    fn piece_lookup() {
        let cut = ObliqueCut::new(ScaleFactor::canonical());
        assert_eq!(cut.piece_at(&Point3::new(1.0, 1.0, 1.0)), PieceId::ONE);
        assert_eq!(cut.piece_at(&Point3::new(1.0, 1.0, 11.0)), PieceId::TWO);
        assert_eq!(cut.piece_at(&Point3::new(1.0, 11.0, 1.0)), PieceId::THREE);
        assert_eq!(cut.piece_at(&Point3::new(11.0, 11.0, 11.0)), PieceId::FOUR);
    }

    #[test]
    fn cut_pieces_match_analytic_volumes() {
        let pieces = cut_cube(ScaleFactor::canonical()).unwrap();
        let expected = [448.0, 416.0, 416.0, 448.0];
        for (mesh, want) in pieces.iter().zip(expected) {
            assert!((mesh.volume() - want).abs() < 1e-6 * want);
            assert!(mesh.is_closed());
        }
    }

    #[test]
    fn volumes_scale_with_k_cubed() {
        let cut = ObliqueCut::new(ScaleFactor::new(2.5).unwrap());
        let k3 = 2.5 * 2.5 * 2.5;
        assert_eq!(cut.piece_volumes(), [7.0 * k3, 6.5 * k3, 6.5 * k3, 7.0 * k3]);
        assert!((cut.plane_height(0.0) - 5.0).abs() < 1e-12);
    }
}
