// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

/// Default weld distance as a fraction of the size of the solid being welded.
#[cfg(feature = "f32")]
pub const RELATIVE_TOLERANCE: Real = 1e-4;
/// Default weld distance as a fraction of the size of the solid being welded.
#[cfg(feature = "f64")]
pub const RELATIVE_TOLERANCE: Real = 1e-6;

/// Plane classification threshold used by the BSP splitter.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Plane classification threshold used by the BSP splitter.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-8;
