//! Mesh export.
//!
//! ASCII STL is always available; binary STL needs the `stl-io` feature.

pub mod stl;
