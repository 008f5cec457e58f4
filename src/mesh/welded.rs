//! Indexed, welded triangle meshes: the form a fused piece is handed to the renderer in.
//!
//! Boolean operations leave a polygon soup with duplicate vertices along former
//! seams. [`WeldedMesh::from_triangles`] merges coincident vertices through a spatial
//! hash, drops collapsed triangles, splits edges that still carry a vertex of a
//! neighbouring face (T-junctions) and recomputes smooth vertex normals. Running it
//! again on its own output changes nothing.

use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::Mesh;
use hashbrown::{HashMap, HashSet};
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

/// Upper bound on edge splits per input triangle before giving up on T-junctions.
const MAX_SPLITS_PER_TRIANGLE: usize = 64;

type Cell = (i64, i64, i64);

/// An indexed triangle mesh with one normal per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct WeldedMesh {
    positions: Vec<Point3<Real>>,
    normals: Vec<Vector3<Real>>,
    indices: Vec<[u32; 3]>,
}

impl WeldedMesh {
    /// Weld a triangle soup: vertices closer than `tolerance` become one.
    pub fn from_triangles<I>(triangles: I, tolerance: Real) -> Self
    where
        I: IntoIterator<Item = [Point3<Real>; 3]>,
    {
        let mut welder = Welder::new(tolerance);
        let mut indices = Vec::new();
        let mut soup_len = 0usize;

        for tri in triangles {
            soup_len += 1;
            let face = tri.map(|p| welder.insert(p));
            if !is_degenerate(&welder.positions, face) {
                indices.push(face);
            }
        }

        let positions = welder.positions;
        let indices = split_t_junctions(&positions, indices, tolerance);
        let (positions, indices) = compact(positions, indices);
        let normals = vertex_normals(&positions, &indices);

        debug!(
            soup_triangles = soup_len,
            triangles = indices.len(),
            vertices = positions.len(),
            "welded triangle soup"
        );

        WeldedMesh {
            positions,
            normals,
            indices,
        }
    }

    /// Triangulate and weld a polygon mesh.
    pub fn from_mesh(mesh: &Mesh, tolerance: Real) -> Self {
        Self::from_triangles(mesh.triangles(), tolerance)
    }

    /// Run the weld pass again over this mesh's own triangles.
    pub fn weld(&self, tolerance: Real) -> Self {
        Self::from_triangles(self.triangles(), tolerance)
    }

    pub fn positions(&self) -> &[Point3<Real>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<Real>] {
        &self.normals
    }

    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<Real>; 3]> + '_ {
        self.indices
            .iter()
            .map(|face| face.map(|i| self.positions[i as usize]))
    }

    /// Enclosed volume (divergence theorem), positive for outward windings.
    pub fn volume(&self) -> Real {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<Real>()
            / 6.0
    }

    pub fn surface_area(&self) -> Real {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() * 0.5)
            .sum()
    }

    pub fn bounding_box(&self) -> Aabb {
        let Some(first) = self.positions.first() else {
            return Aabb::new(Point3::origin(), Point3::origin());
        };
        let (mins, maxs) = self
            .positions
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        Aabb::new(mins, maxs)
    }

    /// Every directed edge is matched by exactly one edge running the other way.
    ///
    /// This is the watertight + consistently wound check.
    pub fn is_closed(&self) -> bool {
        if self.indices.is_empty() {
            return false;
        }
        let mut directed: HashMap<(u32, u32), u32> = HashMap::new();
        for face in &self.indices {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                *directed.entry((a, b)).or_insert(0) += 1;
            }
        }
        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: &Vector3<Real>) -> Self {
        WeldedMesh {
            positions: self.positions.iter().map(|p| p + offset).collect(),
            normals: self.normals.clone(),
            indices: self.indices.clone(),
        }
    }
}

/// Spatial-hash vertex welder; representatives stay at least `tolerance` apart.
struct Welder {
    tolerance: Real,
    cell_size: Real,
    positions: Vec<Point3<Real>>,
    grid: HashMap<Cell, Vec<u32>>,
}

impl Welder {
    fn new(tolerance: Real) -> Self {
        let tolerance = tolerance.max(Real::EPSILON);
        Welder {
            tolerance,
            cell_size: tolerance * 2.0,
            positions: Vec::new(),
            grid: HashMap::new(),
        }
    }

    fn cell(&self, p: &Point3<Real>) -> Cell {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
            (p.z / self.cell_size).floor() as i64,
        )
    }

    fn insert(&mut self, p: Point3<Real>) -> u32 {
        let cell = self.cell(&p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = self.grid.get(&(cell.0 + dx, cell.1 + dy, cell.2 + dz))
                    else {
                        continue;
                    };
                    if let Some(&idx) = candidates
                        .iter()
                        .find(|&&idx| (self.positions[idx as usize] - p).norm() < self.tolerance)
                    {
                        return idx;
                    }
                }
            }
        }

        let idx = self.positions.len() as u32;
        self.positions.push(p);
        self.grid.entry(cell).or_default().push(idx);
        idx
    }
}

/// Collapsed (repeated index) or exactly flat triangles.
fn is_degenerate(positions: &[Point3<Real>], [a, b, c]: [u32; 3]) -> bool {
    if a == b || b == c || c == a {
        return true;
    }
    let (pa, pb, pc) = (
        positions[a as usize],
        positions[b as usize],
        positions[c as usize],
    );
    let longest = (pb - pa)
        .norm_squared()
        .max((pc - pb).norm_squared())
        .max((pa - pc).norm_squared());
    (pb - pa).cross(&(pc - pa)).norm() <= Real::EPSILON * longest
}

/// First vertex lying strictly inside segment `a`-`b`, closest to `a`.
fn vertex_on_edge(positions: &[Point3<Real>], a: u32, b: u32, tolerance: Real) -> Option<u32> {
    let pa = positions[a as usize];
    let pb = positions[b as usize];
    let dir = pb - pa;
    let len2 = dir.norm_squared();
    if len2 <= tolerance * tolerance {
        return None;
    }
    let lo = pa.inf(&pb);
    let hi = pa.sup(&pb);

    positions
        .iter()
        .enumerate()
        .filter(|&(idx, p)| {
            let idx = idx as u32;
            idx != a
                && idx != b
                && (0..3).all(|i| p[i] >= lo[i] - tolerance && p[i] <= hi[i] + tolerance)
        })
        .filter_map(|(idx, p)| {
            let t = (p - pa).dot(&dir) / len2;
            let foot = pa + dir * t;
            let inside = t > 0.0 && t < 1.0 && (p - foot).norm() < tolerance;
            inside.then_some((idx as u32, t))
        })
        .min_by(|x, y| x.1.total_cmp(&y.1))
        .map(|(idx, _)| idx)
}

/// Split every triangle edge that passes through another vertex, preserving winding.
fn split_t_junctions(positions: &[Point3<Real>], faces: Vec<[u32; 3]>, tolerance: Real) -> Vec<[u32; 3]> {
    let budget = faces.len().saturating_mul(MAX_SPLITS_PER_TRIANGLE);
    let mut splits = 0usize;
    let mut pending = faces;
    let mut done = Vec::with_capacity(pending.len());

    while let Some(face) = pending.pop() {
        if splits >= budget {
            warn!(remaining = pending.len() + 1, "T-junction split budget exhausted");
            done.push(face);
            done.extend(pending.drain(..));
            break;
        }

        let [a, b, c] = face;
        let hit = [(a, b, c), (b, c, a), (c, a, b)]
            .into_iter()
            .find_map(|(from, to, apex)| {
                vertex_on_edge(positions, from, to, tolerance).map(|mid| (from, to, apex, mid))
            });

        match hit {
            Some((from, to, apex, mid)) => {
                splits += 1;
                pending.push([from, mid, apex]);
                pending.push([mid, to, apex]);
            },
            None => done.push(face),
        }
    }

    done
}

/// Drop vertices no triangle references and renumber the faces.
fn compact(positions: Vec<Point3<Real>>, faces: Vec<[u32; 3]>) -> (Vec<Point3<Real>>, Vec<[u32; 3]>) {
    let referenced: HashSet<u32> = faces.iter().flatten().copied().collect();
    if referenced.len() == positions.len() {
        return (positions, faces);
    }

    let mut remap: HashMap<u32, u32> = HashMap::with_capacity(referenced.len());
    let mut kept = Vec::with_capacity(referenced.len());
    for (old, p) in positions.into_iter().enumerate() {
        if referenced.contains(&(old as u32)) {
            remap.insert(old as u32, kept.len() as u32);
            kept.push(p);
        }
    }

    let faces = faces
        .into_iter()
        .map(|face| face.map(|i| remap[&i]))
        .collect();
    (kept, faces)
}

/// Area-weighted average of the incident face normals.
fn vertex_normals(positions: &[Point3<Real>], faces: &[[u32; 3]]) -> Vec<Vector3<Real>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];
    for face in faces {
        let [a, b, c] = face.map(|i| positions[i as usize]);
        let weighted = (b - a).cross(&(c - a));
        for &i in face {
            normals[i as usize] += weighted;
        }
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::z))
        .collect()
}
