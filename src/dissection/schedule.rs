//! The slide schedule: which translation each piece carries at each step.
//!
//! Pieces only ever translate. Step 1 slides the `y ≥ 2k` half (pieces 3 and 4)
//! along +X/−Y; step 2 slides the top half (pieces 2 and 4) along +X/−Z.

use crate::dissection::decomposition::PieceId;
use crate::dissection::scale::ScaleFactor;
use crate::errors::{DissectionError, Result};
use crate::float_types::Real;
use nalgebra::Vector3;

/// Unscaled distance pieces are pushed apart in the explode view.
pub const SPREAD_DISTANCE: Real = 5.0;

/// Canonical (`k = 4`) offsets, indexed `[step][piece]`.
pub const CANONICAL_OFFSETS: [[[Real; 3]; 4]; 3] = [
    [[0.0; 3]; 4],
    [
        [0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [6.0, -4.0, 0.0],
        [6.0, -4.0, 0.0],
    ],
    [
        [0.0, 0.0, 0.0],
        [9.0, 0.0, -4.0],
        [6.0, -4.0, 0.0],
        [15.0, -4.0, -4.0],
    ],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Step {
    /// All pieces in place, the cube.
    #[default]
    Cube,
    /// Pieces 3 and 4 slid out; an `18 × 8 × 12` block at `k = 4`.
    FirstSlide,
    /// The `B × A × A` prism.
    Assembled,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Cube, Step::FirstSlide, Step::Assembled];
    pub const LAST: Step = Step::Assembled;

    pub fn from_index(index: u8) -> Result<Self> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| DissectionError::InvalidParameter {
                name: "step",
                details: format!("step index must be 0, 1 or 2, got {index}"),
            })
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Next step, staying on the last one.
    pub const fn next(self) -> Self {
        match self {
            Step::Cube => Step::FirstSlide,
            Step::FirstSlide | Step::Assembled => Step::Assembled,
        }
    }

    /// Previous step, staying on the first one.
    pub const fn prev(self) -> Self {
        match self {
            Step::Cube | Step::FirstSlide => Step::Cube,
            Step::Assembled => Step::FirstSlide,
        }
    }

    pub const fn reset() -> Self {
        Step::Cube
    }

    /// Size of the whole assembly once this step is reached (x, y, z).
    pub fn assembly_extent(self, scale: ScaleFactor) -> Vector3<Real> {
        let k = scale.k();
        match self {
            Step::Cube => Vector3::repeat(3.0 * k),
            Step::FirstSlide => Vector3::new(4.5 * k, 2.0 * k, 3.0 * k),
            Step::Assembled => Vector3::new(6.75 * k, 2.0 * k, 2.0 * k),
        }
    }

    /// Caption such as `"18 x 8 x 12"`.
    pub fn caption(self, scale: ScaleFactor) -> String {
        let e = self.assembly_extent(scale);
        format!("{} x {} x {}", e.x, e.y, e.z)
    }
}

impl TryFrom<u8> for Step {
    type Error = DissectionError;

    fn try_from(index: u8) -> Result<Self> {
        Self::from_index(index)
    }
}

/// How the caller navigates the dissection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Three-step walkthrough.
    Stepped(Step),
    /// Cube or prism only.
    Generalized { assembled: bool },
}

impl View {
    /// The step whose offsets this view shows.
    pub const fn step(self) -> Step {
        match self {
            View::Stepped(step) => step,
            View::Generalized { assembled: false } => Step::Cube,
            View::Generalized { assembled: true } => Step::Assembled,
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::Stepped(Step::Cube)
    }
}

/// Translation of `piece` at `step`, in world units for `scale`.
pub fn offset_for(step: Step, piece: PieceId, scale: ScaleFactor) -> Vector3<Real> {
    Vector3::from(CANONICAL_OFFSETS[step.index() as usize][piece.index()]) * scale.unit()
}

/// Extra explode-view translation, independent of `k`.
pub fn explode_displacement(step: Step, piece: PieceId) -> Vector3<Real> {
    match step {
        Step::Cube => Vector3::zeros(),
        Step::FirstSlide => {
            // split along the seam of the upcoming top/bottom slide
            let dz = match piece.get() {
                2 | 4 => SPREAD_DISTANCE,
                _ => -SPREAD_DISTANCE,
            };
            Vector3::new(0.0, 0.0, dz)
        },
        Step::Assembled => {
            let i = piece.index();
            let dx = if i % 2 == 0 { -SPREAD_DISTANCE } else { SPREAD_DISTANCE };
            let dy = if i < 2 { -SPREAD_DISTANCE } else { SPREAD_DISTANCE };
            Vector3::new(dx, dy, 0.0)
        },
    }
}
