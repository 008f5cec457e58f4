//! The cube-to-prism dissection: pieces, slide schedule, bounds and annotations.

pub mod annotate;
pub mod assembly;
pub mod bounds;
pub mod cuboid;
pub mod decomposition;
pub mod scale;
pub mod schedule;

pub use assembly::{PieceShape, PlacedPiece, Selector, ShapeMode, Snapshot, snapshot};
pub use decomposition::{Decomposition, Piece, PieceId, decompose};
pub use scale::ScaleFactor;
pub use schedule::{Step, View};
