//! Axis-aligned boxes, the building block of every piece.

use crate::errors::{DissectionError, Result};
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector3};

/// An axis-aligned box.
///
/// The corners are stored as computed from the corner table, so two boxes that share
/// a face carry bit-identical coordinates on it at every scale. Extent and center are
/// derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Cuboid {
    /// Checked constructor from a full extent and a center: every extent strictly
    /// positive, every component finite.
    pub fn new(extent: Vector3<Real>, center: Point3<Real>) -> Result<Self> {
        let half = extent / 2.0;
        let cuboid = Cuboid {
            mins: center - half,
            maxs: center + half,
        };
        cuboid.validate()?;
        Ok(cuboid)
    }

    /// Box spanning the corner ranges `(x0, x1, y0, y1, z0, z1)`, scaled by `s`.
    ///
    /// Corners are `s·min` and `s·max`, hence `extent = s·(max − min)` and
    /// `center = s·min + extent / 2`.
    pub fn from_ranges([x0, x1, y0, y1, z0, z1]: [Real; 6], s: Real) -> Self {
        Cuboid {
            mins: Point3::new(x0, y0, z0) * s,
            maxs: Point3::new(x1, y1, z1) * s,
        }
    }

    /// Box spanning two opposite corners.
    pub const fn from_corners(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Cuboid { mins, maxs }
    }

    pub fn validate(&self) -> Result<()> {
        let finite = self.mins.iter().chain(self.maxs.iter()).all(|c| c.is_finite());
        if !finite {
            return Err(DissectionError::InvalidGeometry {
                details: format!("non-finite box: {:?} .. {:?}", self.mins, self.maxs),
            });
        }
        if self.extent().iter().any(|&e| e <= 0.0) {
            return Err(DissectionError::InvalidGeometry {
                details: format!("degenerate box extent {:?}", self.extent()),
            });
        }
        Ok(())
    }

    pub fn extent(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    /// The eight corners, x varying fastest.
    pub fn corners(&self) -> [Point3<Real>; 8] {
        let (lo, hi) = (self.mins, self.maxs);
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
    }

    pub fn volume(&self) -> Real {
        self.extent().product()
    }

    /// Length of the longest side.
    pub fn longest_side(&self) -> Real {
        self.extent().max()
    }

    pub fn translated(&self, offset: &Vector3<Real>) -> Self {
        Cuboid {
            mins: self.mins + offset,
            maxs: self.maxs + offset,
        }
    }

    pub fn to_aabb(&self) -> Aabb {
        Aabb::new(self.mins, self.maxs)
    }

    /// Closed containment test.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        (0..3).all(|i| self.mins[i] <= point[i] && point[i] <= self.maxs[i])
    }
}
