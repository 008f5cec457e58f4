//! Oriented planes and the polygon splitter behind the BSP tree.

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use nalgebra::{Point3, Vector3};
use robust::{Coord3D, orient3d};
use std::ops::BitOr;

/// Where a point or polygon lies relative to a plane, as a two-bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Side(u8);

impl Side {
    pub const ON: Side = Side(0);
    pub const FRONT: Side = Side(1);
    pub const BACK: Side = Side(2);
    pub const BOTH: Side = Side(3);
}

impl BitOr for Side {
    type Output = Side;

    fn bitor(self, rhs: Side) -> Side {
        Side(self.0 | rhs.0)
    }
}

/// Outcome of cutting one polygon with a plane.
#[derive(Debug, Clone)]
pub enum Split {
    /// The polygon lies in the plane; `aligned` when both face the same way.
    Coplanar { polygon: Polygon, aligned: bool },
    Front(Polygon),
    Back(Polygon),
    /// Cut in two. A side is `None` when its fragment has collapsed.
    Straddling {
        front: Option<Polygon>,
        back: Option<Polygon>,
    },
}

/// The plane `normal · p = offset`, with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub offset: Real,
}

#[allow(clippy::unnecessary_cast)]
fn coord(p: &Point3<Real>) -> Coord3D<f64> {
    Coord3D {
        x: p.x as f64,
        y: p.y as f64,
        z: p.z as f64,
    }
}

impl Plane {
    /// Plane through `point` facing `normal`, which need not be unit length.
    pub fn new(normal: Vector3<Real>, point: &Point3<Real>) -> Self {
        let normal = normal.normalize();
        Plane {
            normal,
            offset: normal.dot(&point.coords),
        }
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    /// Side of `point`, decided by the `orient3d` predicate against three points
    /// spanning the plane.
    pub fn side_of(&self, point: &Point3<Real>) -> Side {
        // any axis not parallel to the normal gives a basis with u × v = normal
        let helper = if self.normal.x.abs() < 0.9 {
            Vector3::x()
        } else {
            Vector3::y()
        };
        let u = helper.cross(&self.normal).normalize();
        let v = self.normal.cross(&u);
        let anchor = Point3::from(self.normal * self.offset);

        // positive when `point` is below the counter-clockwise triangle, i.e. behind
        let det = orient3d(coord(&anchor), coord(&(anchor + u)), coord(&(anchor + v)), coord(point));
        #[allow(clippy::unnecessary_cast)]
        let eps = EPSILON as f64;
        if det > eps {
            Side::BACK
        } else if det < -eps {
            Side::FRONT
        } else {
            Side::ON
        }
    }

    /// Union of the sides of every vertex.
    pub fn classify(&self, polygon: &Polygon) -> Side {
        polygon
            .vertices
            .iter()
            .fold(Side::ON, |acc, p| acc | self.side_of(p))
    }

    /// Sort `polygon` against this plane, cutting it when it straddles.
    pub fn split(&self, polygon: Polygon) -> Split {
        let sides: Vec<Side> = polygon.vertices.iter().map(|p| self.side_of(p)).collect();
        match sides.iter().fold(Side::ON, |acc, &s| acc | s) {
            Side::ON => {
                let aligned = self.normal.dot(&polygon.plane.normal) > 0.0;
                Split::Coplanar { polygon, aligned }
            },
            Side::FRONT => Split::Front(polygon),
            Side::BACK => Split::Back(polygon),
            _ => self.cut(&polygon, &sides),
        }
    }

    fn cut(&self, polygon: &Polygon, sides: &[Side]) -> Split {
        let ring = &polygon.vertices;
        let mut front = Vec::with_capacity(ring.len() + 1);
        let mut back = Vec::with_capacity(ring.len() + 1);

        for i in 0..ring.len() {
            let j = (i + 1) % ring.len();
            let (a, b) = (ring[i], ring[j]);
            if sides[i] != Side::BACK {
                front.push(a);
            }
            if sides[i] != Side::FRONT {
                back.push(a);
            }
            if (sides[i] | sides[j]) == Side::BOTH {
                let along = self.normal.dot(&(b - a));
                if along.abs() > EPSILON {
                    let t = (self.offset - self.normal.dot(&a.coords)) / along;
                    let crossing = a + (b - a) * t;
                    front.push(crossing);
                    back.push(crossing);
                }
            }
        }

        let fragment = |ring: Vec<Point3<Real>>| (ring.len() >= 3).then(|| Polygon::new(ring, polygon.plane));
        Split::Straddling {
            front: fragment(front),
            back: fragment(back),
        }
    }
}
