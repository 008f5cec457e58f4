//! Snapshot building: everything the renderer needs for one selector.

use crate::dissection::annotate::{DimensionLine, visible_annotations};
use crate::dissection::bounds::AssemblyBounds;
use crate::dissection::cuboid::Cuboid;
use crate::dissection::decomposition::{Decomposition, PieceId, decompose_scaled};
use crate::dissection::scale::{K_DEFAULT, ScaleFactor};
use crate::dissection::schedule::{Step, View, explode_displacement, offset_for};
use crate::errors::Result;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::fuse::{BooleanBackend, BspFuser, MeshFuser};
use crate::mesh::welded::WeldedMesh;
use nalgebra::Vector3;
use tracing::{debug, warn};

/// How pieces are turned into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeMode {
    /// Raw staircase boxes.
    #[default]
    Boxes,
    /// Each staircase piece fused into one mesh.
    Fused,
    /// The cube cut by the two oblique planes.
    ObliqueCut,
}

/// Caller-owned view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    pub k: Real,
    pub view: View,
    pub explode: bool,
    pub mode: ShapeMode,
}

impl Default for Selector {
    fn default() -> Self {
        Selector {
            k: K_DEFAULT,
            view: View::default(),
            explode: false,
            mode: ShapeMode::default(),
        }
    }
}

impl Selector {
    pub fn new(k: Real, view: View) -> Self {
        Selector {
            k,
            view,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_explode(mut self, explode: bool) -> Self {
        self.explode = explode;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ShapeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn scale(&self) -> Result<ScaleFactor> {
        ScaleFactor::new(self.k)
    }
}

/// Geometry of one piece, in cube coordinates (before its offset).
#[derive(Debug, Clone, PartialEq)]
pub enum PieceShape {
    BoxList(Vec<Cuboid>),
    FusedMesh(WeldedMesh),
}

impl PieceShape {
    pub fn bounding_box(&self) -> Aabb {
        match self {
            PieceShape::BoxList(boxes) => AssemblyBounds::from_boxes(boxes.iter().copied()).aabb,
            PieceShape::FusedMesh(mesh) => mesh.bounding_box(),
        }
    }

    pub fn volume(&self) -> Real {
        match self {
            PieceShape::BoxList(boxes) => boxes.iter().map(Cuboid::volume).sum(),
            PieceShape::FusedMesh(mesh) => mesh.volume(),
        }
    }

    pub const fn is_fused(&self) -> bool {
        matches!(self, PieceShape::FusedMesh(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPiece {
    pub id: PieceId,
    pub color: &'static str,
    /// Slide offset plus explode displacement.
    pub offset: Vector3<Real>,
    pub shape: PieceShape,
}

impl PlacedPiece {
    /// Bounds at the piece's displayed position.
    pub fn placed_bounds(&self) -> Aabb {
        let bb = self.shape.bounding_box();
        Aabb::new(bb.mins + self.offset, bb.maxs + self.offset)
    }
}

/// Complete, self-contained output for one selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub selector: Selector,
    pub scale: ScaleFactor,
    pub step: Step,
    pub pieces: Vec<PlacedPiece>,
    pub bounds: AssemblyBounds,
    pub recenter_offset: Vector3<Real>,
    pub floor_reference: Real,
    /// Absent while exploded.
    pub dimensions: Option<[DimensionLine; 3]>,
    pub caption: String,
}

impl Snapshot {
    pub fn piece(&self, id: PieceId) -> Option<&PlacedPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn total_volume(&self) -> Real {
        self.pieces.iter().map(|p| p.shape.volume()).sum()
    }
}

/// Build the snapshot for `selector` with the default BSP fuser.
pub fn snapshot(selector: &Selector) -> Result<Snapshot> {
    snapshot_with(selector, &BspFuser::default())
}

/// Build the snapshot for `selector`, fusing with `fuser` when the mode asks for it.
///
/// Only an invalid `k` is an error; fusion failures fall back to box lists.
pub fn snapshot_with<B: BooleanBackend>(selector: &Selector, fuser: &MeshFuser<B>) -> Result<Snapshot> {
    let scale = selector.scale()?;
    let decomposition = decompose_scaled(scale);

    let (step, shapes, offsets) = match selector.mode {
        ShapeMode::Boxes => {
            let step = selector.view.step();
            let shapes = decomposition
                .pieces
                .iter()
                .map(|p| PieceShape::BoxList(p.boxes.to_vec()))
                .collect::<Vec<_>>();
            (step, shapes, slide_offsets(step, scale, selector.explode))
        },
        ShapeMode::Fused => {
            let step = selector.view.step();
            let shapes = fused_shapes(&decomposition, fuser);
            (step, shapes, slide_offsets(step, scale, selector.explode))
        },
        ShapeMode::ObliqueCut => {
            // the oblique pieces never slide; only the cube is shown
            let shapes = oblique_shapes(&decomposition, fuser);
            let offsets = PieceId::ALL
                .map(|id| {
                    if selector.explode {
                        explode_displacement(Step::Assembled, id)
                    } else {
                        Vector3::zeros()
                    }
                })
                .to_vec();
            (Step::Cube, shapes, offsets)
        },
    };

    let pieces: Vec<PlacedPiece> = PieceId::ALL
        .into_iter()
        .zip(shapes)
        .zip(offsets)
        .map(|((id, shape), offset)| PlacedPiece {
            id,
            color: id.color(),
            offset,
            shape,
        })
        .collect();

    let bounds = AssemblyBounds::from_aabbs(pieces.iter().map(PlacedPiece::placed_bounds));
    let dimensions = visible_annotations(&bounds, selector.explode);

    debug!(
        k = scale.k(),
        step = step.index(),
        explode = selector.explode,
        mode = ?selector.mode,
        "built snapshot"
    );

    Ok(Snapshot {
        selector: *selector,
        scale,
        step,
        recenter_offset: bounds.recenter_offset(),
        floor_reference: bounds.floor_reference(),
        bounds,
        dimensions,
        caption: step.caption(scale),
        pieces,
    })
}

/// Slide offset of every piece at `step`, plus the explode displacement if on.
pub fn slide_offsets(step: Step, scale: ScaleFactor, explode: bool) -> Vec<Vector3<Real>> {
    PieceId::ALL
        .iter()
        .map(|&id| {
            let offset = offset_for(step, id, scale);
            if explode {
                offset + explode_displacement(step, id)
            } else {
                offset
            }
        })
        .collect()
}

fn fused_shapes<B: BooleanBackend>(decomposition: &Decomposition, fuser: &MeshFuser<B>) -> Vec<PieceShape> {
    decomposition
        .pieces
        .iter()
        .map(|piece| match fuser.fuse_piece(piece) {
            Ok(mesh) => PieceShape::FusedMesh(mesh),
            Err(err) => {
                warn!(id = %piece.id, %err, "fusion failed, drawing raw boxes");
                PieceShape::BoxList(piece.boxes.to_vec())
            },
        })
        .collect()
}

fn oblique_shapes<B: BooleanBackend>(decomposition: &Decomposition, fuser: &MeshFuser<B>) -> Vec<PieceShape> {
    match fuser.oblique_pieces(decomposition.scale) {
        Ok(meshes) => meshes.into_iter().map(PieceShape::FusedMesh).collect(),
        Err(err) => {
            warn!(%err, "oblique cut failed, drawing staircase boxes");
            decomposition
                .pieces
                .iter()
                .map(|p| PieceShape::BoxList(p.boxes.to_vec()))
                .collect()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn invalid_k_is_the_only_error() {
        assert!(snapshot(&Selector::new(0.0, View::default())).is_err());
        assert!(snapshot(&Selector::new(Real::NAN, View::default())).is_err());
    }

    #[test]
    fn cube_snapshot() {
        let snap = snapshot(&Selector::default()).unwrap();
        assert_eq!(snap.step, Step::Cube);
        assert_eq!(snap.bounds.min(), Point3::origin());
        assert_eq!(snap.bounds.max(), Point3::new(12.0, 12.0, 12.0));
        assert_eq!(snap.recenter_offset, Vector3::new(-6.0, -6.0, -6.0));
        assert_eq!(snap.floor_reference, -9.0);
        assert_eq!(snap.caption, "12 x 12 x 12");
        assert!(snap.dimensions.is_some());
        assert_eq!(snap.piece(PieceId::TWO).map(|p| p.color), Some("#22c55e"));
    }

    #[test]
    fn first_slide_bounds() {
        let snap = snapshot(&Selector::new(4.0, View::Stepped(Step::FirstSlide))).unwrap();
        assert_eq!(snap.bounds.min(), Point3::origin());
        assert_eq!(snap.bounds.max(), Point3::new(18.0, 8.0, 12.0));
    }

    #[test]
    fn explode_hides_dimensions() {
        let selector = Selector::new(4.0, View::Generalized { assembled: true }).with_explode(true);
        let snap = snapshot(&selector).unwrap();
        assert!(snap.dimensions.is_none());
        assert_eq!(snap.bounds.min(), Point3::new(-5.0, -5.0, 0.0));
        assert_eq!(snap.bounds.max(), Point3::new(32.0, 13.0, 8.0));
    }

    #[test]
    fn fused_mode_keeps_volume() {
        let selector = Selector::new(4.0, View::Stepped(Step::Assembled)).with_mode(ShapeMode::Fused);
        let snap = snapshot(&selector).unwrap();
        assert!(snap.pieces.iter().all(|p| p.shape.is_fused()));
        assert!((snap.total_volume() - 1728.0).abs() < 1e-6);
        assert!((snap.bounds.max() - Point3::new(27.0, 8.0, 8.0)).norm() < 1e-9);
        assert!(snap.bounds.min().coords.norm() < 1e-9);
    }

    #[test]
    fn oblique_mode_stays_a_cube() {
        let selector = Selector::new(4.0, View::Stepped(Step::Assembled)).with_mode(ShapeMode::ObliqueCut);
        let snap = snapshot(&selector).unwrap();
        assert_eq!(snap.step, Step::Cube);
        assert!(snap.pieces.iter().all(|p| p.offset == Vector3::zeros()));
        assert!((snap.bounds.max() - Point3::new(12.0, 12.0, 12.0)).norm() < 1e-9);
        assert!((snap.total_volume() - 1728.0).abs() < 1e-6);
    }
}
