//! Fusing a piece's boxes into one welded mesh.
//!
//! ```
//! use dissectrs::dissection::decomposition::{decompose, PieceId};
//! use dissectrs::fuse::BspFuser;
//!
//! let pieces = decompose(4.0)?;
//! let mesh = BspFuser::default().fuse_piece(pieces.piece(PieceId::ONE))?;
//! assert!((mesh.volume() - 528.0).abs() < 1e-6);
//! # Ok::<(), dissectrs::errors::DissectionError>(())
//! ```

pub mod backend;
pub mod oblique;

pub use backend::{BooleanBackend, BspBackend};

use crate::dissection::cuboid::Cuboid;
use crate::dissection::decomposition::Piece;
use crate::errors::{DissectionError, Result};
use crate::float_types::{RELATIVE_TOLERANCE, Real};
use crate::mesh::welded::WeldedMesh;
use tracing::debug;

/// Tolerances used while fusing, both relative to the size of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuserConfig {
    /// Vertices closer than this fraction of the input's longest side are welded
    /// together.
    pub weld_tolerance: Real,
    /// Largest accepted relative difference between the fused volume and the
    /// expected one.
    pub volume_tolerance: Real,
}

impl Default for FuserConfig {
    fn default() -> Self {
        Self {
            weld_tolerance: RELATIVE_TOLERANCE,
            volume_tolerance: 1e-6,
        }
    }
}

impl FuserConfig {
    #[must_use]
    pub const fn with_weld_tolerance(mut self, weld_tolerance: Real) -> Self {
        self.weld_tolerance = weld_tolerance;
        self
    }

    #[must_use]
    pub const fn with_volume_tolerance(mut self, volume_tolerance: Real) -> Self {
        self.volume_tolerance = volume_tolerance;
        self
    }
}

/// Runs box unions on a [`BooleanBackend`] and checks what comes back.
#[derive(Debug, Clone, Default)]
pub struct MeshFuser<B: BooleanBackend> {
    pub backend: B,
    pub config: FuserConfig,
}

/// The fuser on the built-in BSP backend.
pub type BspFuser = MeshFuser<BspBackend>;

impl<B: BooleanBackend> MeshFuser<B> {
    pub const fn new(backend: B, config: FuserConfig) -> Self {
        MeshFuser { backend, config }
    }

    pub fn with_config(mut self, config: FuserConfig) -> Self {
        self.config = config;
        self
    }

    /// Weld distance for a solid whose longest side is `size`.
    pub fn weld_tolerance(&self, size: Real) -> Real {
        self.config.weld_tolerance * size
    }

    /// Union `boxes` in order and weld the result.
    ///
    /// The boxes must not overlap: the fused volume is checked against their sum,
    /// and the result must be watertight.
    pub fn fuse(&self, boxes: &[Cuboid]) -> Result<WeldedMesh> {
        let Some((first, rest)) = boxes.split_first() else {
            return Err(DissectionError::InvalidGeometry {
                details: "no boxes to fuse".to_string(),
            });
        };
        for b in boxes {
            b.validate()?;
        }

        let solid = rest.iter().fold(self.backend.cuboid(first), |acc, b| {
            self.backend.union(&acc, &self.backend.cuboid(b))
        });
        let size = boxes.iter().map(Cuboid::longest_side).fold(0.0, Real::max);
        let welded = self.backend.weld(&solid, self.weld_tolerance(size));

        let expected: Real = boxes.iter().map(Cuboid::volume).sum();
        self.check_solid(&welded, expected)?;

        debug!(
            boxes = boxes.len(),
            triangles = welded.triangle_count(),
            vertices = welded.vertex_count(),
            "fused boxes"
        );
        Ok(welded)
    }

    pub fn fuse_piece(&self, piece: &Piece) -> Result<WeldedMesh> {
        self.fuse(&piece.boxes)
    }

    /// A fused solid must be non-empty, watertight and of the `expected` volume.
    pub(crate) fn check_solid(&self, welded: &WeldedMesh, expected: Real) -> Result<()> {
        if welded.is_empty() {
            return Err(DissectionError::FusionFailure {
                details: "boolean result has no triangles".to_string(),
            });
        }
        if !welded.is_closed() {
            return Err(DissectionError::FusionFailure {
                details: "fused mesh is not watertight".to_string(),
            });
        }
        let volume = welded.volume();
        if (volume - expected).abs() > self.config.volume_tolerance * expected.abs() {
            return Err(DissectionError::FusionFailure {
                details: format!("fused volume {volume} differs from expected {expected}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dissection::decomposition::decompose;
    use crate::mesh::Mesh;
    use nalgebra::{Point3, Unit, Vector3};

    fn unit_box_at(x: Real) -> Cuboid {
        Cuboid::from_corners(Point3::new(x, 0.0, 0.0), Point3::new(x + 1.0, 1.0, 1.0))
    }

    /// Fuses correctly but leaves the seam at `x = 1` behind as a two-sided wall.
    struct WalledBackend;

    impl BooleanBackend for WalledBackend {
        type Solid = Mesh;

        fn cuboid(&self, cuboid: &Cuboid) -> Mesh {
            BspBackend.cuboid(cuboid)
        }

        fn union(&self, a: &Mesh, b: &Mesh) -> Mesh {
            BspBackend.union(a, b)
        }

        fn subtract(&self, a: &Mesh, b: &Mesh) -> Mesh {
            BspBackend.subtract(a, b)
        }

        fn intersect(&self, a: &Mesh, b: &Mesh) -> Mesh {
            BspBackend.intersect(a, b)
        }

        fn rotate_about(&self, solid: &Mesh, pivot: &Point3<Real>, axis: &Unit<Vector3<Real>>, angle: Real) -> Mesh {
            BspBackend.rotate_about(solid, pivot, axis, angle)
        }

        fn weld(&self, solid: &Mesh, tolerance: Real) -> WeldedMesh {
            let [a, b, c, d] = [
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
            ];
            let wall = [[a, b, c], [a, c, d], [a, c, b], [a, d, c]];
            WeldedMesh::from_triangles(solid.triangles().chain(wall), tolerance)
        }
    }

    #[test]
    fn single_box_skips_booleans() {
        let b = Cuboid::from_corners(Point3::origin(), Point3::new(2.0, 3.0, 4.0));
        let mesh = BspFuser::default().fuse(&[b]).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(mesh.is_closed());
    }

    #[test]
    fn empty_and_degenerate_input() {
        let fuser = BspFuser::default();
        assert!(matches!(fuser.fuse(&[]), Err(DissectionError::InvalidGeometry { .. })));
        let flat = Cuboid::from_corners(Point3::origin(), Point3::new(1.0, 0.0, 1.0));
        assert!(matches!(fuser.fuse(&[flat]), Err(DissectionError::InvalidGeometry { .. })));
    }

    #[test]
    fn overlapping_boxes_fail_the_volume_check() {
        let a = Cuboid::from_corners(Point3::origin(), Point3::new(2.0, 1.0, 1.0));
        let b = Cuboid::from_corners(Point3::new(1.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0));
        assert!(matches!(
            BspFuser::default().fuse(&[a, b]),
            Err(DissectionError::FusionFailure { .. })
        ));
    }

    #[test]
    fn leftover_seam_is_not_watertight() {
        let boxes = [unit_box_at(0.0), unit_box_at(1.0)];
        let walled = MeshFuser::new(WalledBackend, FuserConfig::default());
        assert!(matches!(
            walled.fuse(&boxes),
            Err(DissectionError::FusionFailure { ref details }) if details.contains("watertight")
        ));
        let clean = BspFuser::default().fuse(&boxes).unwrap();
        assert!(clean.is_closed());
        assert!((clean.volume() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn weld_distance_follows_size() {
        let fuser = BspFuser::default();
        assert_eq!(fuser.weld_tolerance(0.0), 0.0);
        assert_eq!(fuser.weld_tolerance(1e-3), RELATIVE_TOLERANCE * 1e-3);
    }

    #[test]
    fn every_piece_fuses_closed() {
        let d = decompose(4.0).unwrap();
        let fuser = BspFuser::default();
        for piece in &d.pieces {
            let mesh = fuser.fuse_piece(piece).unwrap();
            assert!((mesh.volume() - piece.volume()).abs() < 1e-6);
            assert!(mesh.is_closed(), "{} is not closed", piece.id);
        }
    }

    #[test]
    fn config_builders() {
        let config = FuserConfig::default()
            .with_weld_tolerance(1e-5)
            .with_volume_tolerance(1e-3);
        assert_eq!(config.weld_tolerance, 1e-5);
        assert_eq!(config.volume_tolerance, 1e-3);
    }
}
