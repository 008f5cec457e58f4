//! Geometry engine for the **cube-to-prism dissection**: a cube of side `3k` cut into
//! four staircase pieces that, by translation alone, reassemble into a
//! `6.75k × 2k × 2k` prism of the same volume.
//!
//! The crate computes everything a viewer needs and nothing it draws:
//! - [`dissection::decomposition`]: the four pieces as axis-aligned boxes, for any `k`
//! - [`dissection::schedule`]: per-step slide offsets and the explode displacement
//! - [`dissection::bounds`]: assembly bounds, recentering offset and floor height
//! - [`fuse`]: Boolean fusion of each piece into a single welded mesh, on polygon
//!   meshes stored in [BSP](mesh::bsp) trees, plus the oblique-plane cut of the cube
//! - [`dissection::annotate`]: dimension lines with labels
//!
//! [`dissection::snapshot`] ties these together for one [`dissection::Selector`].
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): binary `.stl` export
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod dissection;
pub mod errors;
pub mod float_types;
pub mod fuse;
pub mod io;
pub mod mesh;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use dissection::{Selector, Snapshot, snapshot};
pub use errors::{DissectionError, Result};
pub use mesh::{Mesh, welded::WeldedMesh};
