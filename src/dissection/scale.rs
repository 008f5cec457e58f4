//! The scale parameter `k` and the cube / prism dimensions it drives.

use crate::errors::{DissectionError, Result};
use crate::float_types::Real;

/// Scale at which the canonical piece table is written.
pub const CANONICAL_K: Real = 4.0;

/// Lower end of the generalized view's `k` slider.
pub const K_MIN: Real = 2.0;
/// Upper end of the `k` slider.
pub const K_MAX: Real = 10.0;
/// Slider increment.
pub const K_STEP: Real = 0.5;
/// Slider position on load; the canonical table's scale.
pub const K_DEFAULT: Real = CANONICAL_K;

/// A validated, strictly positive and finite scale `k`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(Real);

/// Side lengths shown by the generalized panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Cube side `L = 3k`.
    pub cube_side: Real,
    /// Prism base side `A = 2k`.
    pub prism_base: Real,
    /// Prism length `B = 6.75k`.
    pub prism_length: Real,
}

impl Dimensions {
    pub fn cube_volume(&self) -> Real {
        self.cube_side.powi(3)
    }

    pub fn prism_volume(&self) -> Real {
        self.prism_base * self.prism_base * self.prism_length
    }
}

impl ScaleFactor {
    /// Reject `k <= 0`, NaN and infinities; nothing is clamped.
    pub fn new(k: Real) -> Result<Self> {
        if k.is_finite() && k > 0.0 {
            Ok(ScaleFactor(k))
        } else {
            Err(DissectionError::invalid_scale(k))
        }
    }

    pub const fn canonical() -> Self {
        ScaleFactor(CANONICAL_K)
    }

    pub const fn k(self) -> Real {
        self.0
    }

    /// Multiplier from canonical units, `s = k / 4`.
    pub fn unit(self) -> Real {
        self.0 / CANONICAL_K
    }

    pub fn cube_side(self) -> Real {
        3.0 * self.0
    }

    pub fn prism_base(self) -> Real {
        2.0 * self.0
    }

    pub fn prism_length(self) -> Real {
        6.75 * self.0
    }

    pub fn dimensions(self) -> Dimensions {
        Dimensions {
            cube_side: self.cube_side(),
            prism_base: self.prism_base(),
            prism_length: self.prism_length(),
        }
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::canonical()
    }
}

impl TryFrom<Real> for ScaleFactor {
    type Error = DissectionError;

    fn try_from(k: Real) -> Result<Self> {
        Self::new(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        for bad in [0.0, -1.0, Real::NAN, Real::INFINITY, Real::NEG_INFINITY] {
            assert!(matches!(
                ScaleFactor::new(bad),
                Err(DissectionError::InvalidParameter { name: "k", .. })
            ));
        }
    }

    #[test]
    fn canonical_dimensions() {
        let dims = ScaleFactor::canonical().dimensions();
        assert_eq!(dims.cube_side, 12.0);
        assert_eq!(dims.prism_base, 8.0);
        assert_eq!(dims.prism_length, 27.0);
        assert_eq!(dims.cube_volume(), 1728.0);
        assert_eq!(dims.prism_volume(), 1728.0);
    }

    #[test]
    fn slider_range_contains_default() {
        assert!(K_MIN <= K_DEFAULT && K_DEFAULT <= K_MAX);
        assert_eq!(((K_MAX - K_MIN) / K_STEP) as usize, 16);
    }
}
