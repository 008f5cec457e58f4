//! Binary space partitioning of polygon sets.
//!
//! A node splits space with its plane. Polygons in that plane stay on the node, the
//! rest are pushed down into the front or back subtree. A node with no back subtree
//! bounds solid space behind its plane, so a tree built from a closed surface
//! answers "inside or outside" for anything clipped against it.

use crate::mesh::plane::{Plane, Side, Split};
use crate::mesh::polygon::Polygon;

/// Polygons whose planes are tried when picking a node's splitter.
const SPLITTER_CANDIDATES: usize = 20;
/// Cost of cutting one polygon, measured in polygons of front/back imbalance.
const CUT_COST: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct Node {
    plane: Option<Plane>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
    polygons: Vec<Polygon>,
}

impl Node {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Node::default();
        node.build(polygons);
        node
    }

    /// Insert `polygons`, growing subtrees where needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let Some(plane) = self.plane.or_else(|| choose_splitter(&polygons)) else {
            return;
        };
        self.plane = Some(plane);

        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in polygons {
            match plane.split(polygon) {
                Split::Coplanar { polygon, .. } => self.polygons.push(polygon),
                Split::Front(polygon) => front.push(polygon),
                Split::Back(polygon) => back.push(polygon),
                Split::Straddling { front: f, back: b } => {
                    front.extend(f);
                    back.extend(b);
                },
            }
        }

        if !front.is_empty() {
            self.front.get_or_insert_with(Box::default).build(front);
        }
        if !back.is_empty() {
            self.back.get_or_insert_with(Box::default).build(back);
        }
    }

    /// Swap solid and empty space.
    pub fn invert(&mut self) {
        for polygon in &mut self.polygons {
            polygon.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        std::mem::swap(&mut self.front, &mut self.back);
        for child in [&mut self.front, &mut self.back].into_iter().flatten() {
            child.invert();
        }
    }

    /// The parts of `polygons` outside the solid bounded by this tree.
    ///
    /// Coplanar polygons follow their facing: those aligned with a node's plane are
    /// treated as in front of it.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };

        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in polygons {
            match plane.split(polygon) {
                Split::Coplanar {
                    polygon,
                    aligned: true,
                }
                | Split::Front(polygon) => front.push(polygon),
                Split::Coplanar {
                    polygon,
                    aligned: false,
                }
                | Split::Back(polygon) => back.push(polygon),
                Split::Straddling { front: f, back: b } => {
                    front.extend(f);
                    back.extend(b);
                },
            }
        }

        let mut kept = match &self.front {
            Some(node) => node.clip_polygons(front),
            None => front,
        };
        // no back subtree: everything behind is inside and dropped
        if let Some(node) = &self.back {
            kept.extend(node.clip_polygons(back));
        }
        kept
    }

    /// Drop the parts of this tree's polygons that lie inside `other`.
    pub fn clip_to(&mut self, other: &Node) {
        self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
        for child in [&mut self.front, &mut self.back].into_iter().flatten() {
            child.clip_to(other);
        }
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.extend(node.polygons);
            stack.extend(node.front.map(|child| *child));
            stack.extend(node.back.map(|child| *child));
        }
        out
    }
}

/// Boundary of the union of the solids bounded by `a` and `b`.
///
/// Faces the two solids share are kept once, from `a`.
pub fn union(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    let mut a = Node::new(a);
    let mut b = Node::new(b);
    a.clip_to(&b);
    b.clip_to(&a);
    // what survives of b and faces the same way as a coplanar face of a goes
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.into_polygons());
    a.into_polygons()
}

/// Plane of a sampled polygon that cuts few others and splits the rest evenly.
fn choose_splitter(polygons: &[Polygon]) -> Option<Plane> {
    polygons
        .iter()
        .take(SPLITTER_CANDIDATES)
        .map(|candidate| candidate.plane)
        .min_by_key(|plane| {
            let (mut front, mut back, mut cut) = (0usize, 0usize, 0usize);
            for polygon in polygons {
                match plane.classify(polygon) {
                    Side::FRONT => front += 1,
                    Side::BACK => back += 1,
                    Side::BOTH => cut += 1,
                    _ => {},
                }
            }
            CUT_COST * cut + front.abs_diff(back)
        })
}
