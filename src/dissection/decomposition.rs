//! The four staircase pieces of the cube, scaled from the canonical `k = 4` table.

use crate::dissection::cuboid::Cuboid;
use crate::dissection::scale::ScaleFactor;
use crate::errors::{DissectionError, Result};
use crate::float_types::Real;
use tracing::debug;

/// Corner ranges `(x0, x1, y0, y1, z0, z1)` of each piece's boxes at `k = 4`.
pub const CANONICAL_PIECES: [[[Real; 6]; 3]; 4] = [
    [
        [0.0, 6.0, 0.0, 8.0, 0.0, 8.0],
        [6.0, 9.0, 0.0, 4.0, 0.0, 8.0],
        [9.0, 12.0, 0.0, 4.0, 0.0, 4.0],
    ],
    [
        [0.0, 6.0, 0.0, 8.0, 8.0, 12.0],
        [6.0, 9.0, 0.0, 4.0, 8.0, 12.0],
        [9.0, 12.0, 0.0, 4.0, 4.0, 12.0],
    ],
    [
        [0.0, 3.0, 8.0, 12.0, 0.0, 8.0],
        [3.0, 6.0, 8.0, 12.0, 0.0, 4.0],
        [6.0, 12.0, 4.0, 12.0, 0.0, 4.0],
    ],
    [
        [0.0, 3.0, 8.0, 12.0, 8.0, 12.0],
        [3.0, 6.0, 8.0, 12.0, 4.0, 12.0],
        [6.0, 12.0, 4.0, 12.0, 4.0, 12.0],
    ],
];

/// Display colours for pieces 1 to 4.
pub const PIECE_COLORS: [&str; 4] = ["#ef4444", "#22c55e", "#3b82f6", "#eab308"];

/// One of the four pieces, numbered 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u8);

impl PieceId {
    pub const ONE: PieceId = PieceId(1);
    pub const TWO: PieceId = PieceId(2);
    pub const THREE: PieceId = PieceId(3);
    pub const FOUR: PieceId = PieceId(4);
    pub const ALL: [PieceId; 4] = [Self::ONE, Self::TWO, Self::THREE, Self::FOUR];

    pub fn new(id: u8) -> Result<Self> {
        if (1..=4).contains(&id) {
            Ok(PieceId(id))
        } else {
            Err(DissectionError::InvalidParameter {
                name: "piece",
                details: format!("piece id must be in 1..=4, got {id}"),
            })
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position in [`PieceId::ALL`].
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub const fn color(self) -> &'static str {
        PIECE_COLORS[self.index()]
    }
}

impl TryFrom<u8> for PieceId {
    type Error = DissectionError;

    fn try_from(id: u8) -> Result<Self> {
        Self::new(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "piece {}", self.0)
    }
}

/// A piece at its cube position: three boxes that abut along shared faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub id: PieceId,
    pub boxes: [Cuboid; 3],
}

impl Piece {
    pub fn volume(&self) -> Real {
        self.boxes.iter().map(Cuboid::volume).sum()
    }
}

/// The cube split into its four pieces at a given scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub scale: ScaleFactor,
    pub pieces: [Piece; 4],
}

impl Decomposition {
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    pub fn volume(&self) -> Real {
        self.pieces.iter().map(Piece::volume).sum()
    }
}

/// Scale the canonical table to `k`.
pub fn decompose(k: Real) -> Result<Decomposition> {
    let scale = ScaleFactor::new(k)?;
    Ok(decompose_scaled(scale))
}

/// Like [`decompose`] for an already validated scale; cannot fail.
pub fn decompose_scaled(scale: ScaleFactor) -> Decomposition {
    let s = scale.unit();
    let pieces = std::array::from_fn(|i| Piece {
        id: PieceId::ALL[i],
        boxes: CANONICAL_PIECES[i].map(|ranges| Cuboid::from_ranges(ranges, s)),
    });
    debug!(k = scale.k(), "decomposed cube into four pieces");
    Decomposition { scale, pieces }
}
