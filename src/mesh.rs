//! Renderable mesh extracted from the live cloth every frame.
//!
//! Vertices are interleaved as `[px, py, pz, nx, ny, nz, u, v]`. Only active
//! particles get a vertex, and a quad is emitted only when all four of its
//! corners are active, so torn regions show up as holes.

use crate::float::Float;
use crate::grid::ClothGrid;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Floats per interleaved vertex.
pub const VERTEX_STRIDE: usize = 8;

/// Neighbour ring sampled for normals; consecutive entries form pairs.
const NORMAL_RING: [(isize, isize); 8] = [
    (1, 0), (-1, 0), (0, 1), (0, -1),
    (1, 1), (-1, -1), (1, -1), (-1, 1),
];

/// Vertex and index buffers plus the grid-to-vertex remap of the last rebuild.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers<F: Float> {
    vertices: AllocVec<F>,
    indices: AllocVec<u32>,
    remap: AllocVec<Option<u32>>,
}

impl<F: Float> MeshBuffers<F> {
    pub fn new() -> Self {
        MeshBuffers {
            vertices: AllocVec::new(),
            indices: AllocVec::new(),
            remap: AllocVec::new(),
        }
    }

    pub fn vertices(&self) -> &[F] { &self.vertices }
    pub fn indices(&self) -> &[u32] { &self.indices }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex index of a grid particle, or `None` if it had no vertex.
    pub fn vertex_of(&self, grid_index: usize) -> Option<u32> {
        self.remap.get(grid_index).copied().flatten()
    }

    /// Regenerate both buffers from `grid`, reusing the allocations.
    pub fn rebuild(&mut self, grid: &ClothGrid<F>) {
        let width = grid.width();
        let height = grid.height();
        let last_col = F::from_usize(width - 1);
        let last_row = F::from_usize(height - 1);

        self.vertices.clear();
        self.indices.clear();
        self.remap.clear();
        self.remap.resize(width * height, None);

        let mut next = 0u32;
        for y in 0..height {
            for x in 0..width {
                let idx = grid.index(x, y);
                let p = grid.particle(idx);
                if !p.active {
                    continue;
                }
                self.remap[idx] = Some(next);
                next += 1;

                let n = vertex_normal(grid, x, y);
                self.vertices.extend_from_slice(&[
                    p.pos.x,
                    p.pos.y,
                    p.pos.z,
                    n.x,
                    n.y,
                    n.z,
                    F::from_usize(x) / last_col,
                    F::from_usize(y) / last_row,
                ]);
            }
        }

        for y in 0..height - 1 {
            for x in 0..width - 1 {
                let corners = (
                    self.remap[grid.index(x, y)],
                    self.remap[grid.index(x + 1, y)],
                    self.remap[grid.index(x, y + 1)],
                    self.remap[grid.index(x + 1, y + 1)],
                );
                if let (Some(tl), Some(tr), Some(bl), Some(br)) = corners {
                    self.indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
                }
            }
        }
    }
}

/// Smooth normal at `(x, y)` from cross products over the neighbour ring.
///
/// A pair contributes only if both neighbours lie inside the grid and are
/// active. Falls back to +Z when nothing contributes or the sum cancels out.
pub fn vertex_normal<F: Float>(grid: &ClothGrid<F>, x: usize, y: usize) -> Vec3<F> {
    let center = grid.particle(grid.index(x, y));
    if !center.active {
        return Vec3::forward();
    }

    let neighbour = |(dx, dy): (isize, isize)| -> Option<Vec3<F>> {
        let nx = x.checked_add_signed(dx).filter(|&nx| nx < grid.width())?;
        let ny = y.checked_add_signed(dy).filter(|&ny| ny < grid.height())?;
        let p = grid.particle(grid.index(nx, ny));
        p.active.then_some(p.pos)
    };

    let mut sum = Vec3::zero();
    for pair in NORMAL_RING.windows(2) {
        if let (Some(a), Some(b)) = (neighbour(pair[0]), neighbour(pair[1])) {
            sum += (a - center.pos).cross(b - center.pos);
        }
    }
    sum.try_normalize(F::from_f32(1e-12)).unwrap_or_else(Vec3::forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;

    fn grid(w: usize, h: usize) -> ClothGrid<f32> {
        ClothGrid::new(&GridConfig::new(w, h, 4.0, 4.0)).unwrap()
    }

    #[test]
    fn full_grid_counts() {
        let g = grid(10, 10);
        let mut mesh = MeshBuffers::new();
        mesh.rebuild(&g);
        assert_eq!(mesh.vertex_count(), 100);
        assert_eq!(mesh.vertices().len(), 800);
        assert_eq!(mesh.triangle_count(), 162);
        assert_eq!(mesh.indices().len(), 486);
    }

    #[test]
    fn flat_sheet_normals_face_forward() {
        let g = grid(5, 4);
        for y in 0..4 {
            for x in 0..5 {
                let n = vertex_normal(&g, x, y);
                assert!((n.z.abs() - 1.0).abs() < 1e-5, "normal at ({}, {}) = {:?}", x, y, n);
            }
        }
        let interior = vertex_normal(&g, 2, 2);
        assert!(interior.z > 0.0);
    }

    #[test]
    fn uv_spans_unit_square() {
        let g = grid(3, 3);
        let mut mesh = MeshBuffers::new();
        mesh.rebuild(&g);
        let v = mesh.vertices();
        let last = (mesh.vertex_count() - 1) * VERTEX_STRIDE;
        assert_eq!((v[6], v[7]), (0.0, 0.0));
        assert_eq!((v[last + 6], v[last + 7]), (1.0, 1.0));
    }

    #[test]
    fn torn_particle_leaves_a_hole() {
        let mut g = grid(4, 4);
        let idx = g.index(1, 1);
        let point = g.position_at(1, 1);
        g.tear_at(point, 0.1);

        let mut mesh = MeshBuffers::new();
        mesh.rebuild(&g);
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.vertex_of(idx), None);
        // (1, 1) is a corner of four of the nine quads.
        assert_eq!(mesh.triangle_count(), (9 - 4) * 2);
        assert!(mesh.indices().iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn isolated_particle_gets_fallback_normal() {
        let mut g = grid(3, 3);
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1), (2, 1), (1, 2), (2, 2)] {
            let point = g.position_at(x, y);
            g.tear_at(point, 0.1);
        }
        assert_eq!(vertex_normal(&g, 2, 0), Vec3::forward());
    }
}
