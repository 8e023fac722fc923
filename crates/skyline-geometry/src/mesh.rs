// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle mesh with per-submesh index lists
//!
//! Positions, UVs, normals and tangents are stored flattened as `f32`, ready
//! for upload. Each generated mesh is a fresh value owned by the caller;
//! nothing in this crate keeps or shares mesh buffers between calls.

use crate::{Point2, Point3, Vector3};
use nalgebra::Matrix4;

/// Named index partitions used by extruded meshes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Submesh {
    /// Side walls
    Sides = 0,
    /// Top and bottom caps
    Caps = 1,
}

impl Submesh {
    /// Position of this submesh in [`Mesh::submeshes`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Submesh::Sides => "sides",
            Submesh::Caps => "caps",
        }
    }
}

/// Triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Texture coordinates as flattened [u, v, u, v, ...]
    pub uvs: Vec<f32>,
    /// Vertex normals as flattened [nx, ny, nz, ...]; empty until computed
    pub normals: Vec<f32>,
    /// Vertex tangents as flattened [tx, ty, tz, w, ...]; empty until computed
    pub tangents: Vec<f32>,
    /// Triangle indices, one list per submesh
    pub submeshes: Vec<Vec<u32>>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count across all submeshes
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.len() / 3).sum()
    }

    /// Get number of submeshes
    #[inline]
    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    /// Indices of one submesh (empty if it does not exist)
    pub fn submesh(&self, index: usize) -> &[u32] {
        self.submeshes.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All indices concatenated in submesh order
    pub fn indices(&self) -> Vec<u32> {
        self.submeshes.iter().flatten().copied().collect()
    }

    /// Position of vertex `i`
    #[inline]
    pub fn position(&self, i: usize) -> Point3<f64> {
        Point3::new(
            self.positions[i * 3] as f64,
            self.positions[i * 3 + 1] as f64,
            self.positions[i * 3 + 2] as f64,
        )
    }

    /// Texture coordinate of vertex `i`
    #[inline]
    pub fn uv(&self, i: usize) -> Point2<f64> {
        Point2::new(self.uvs[i * 2] as f64, self.uvs[i * 2 + 1] as f64)
    }

    /// Overwrite the texture coordinate of vertex `i`
    #[inline]
    pub fn set_uv(&mut self, i: usize, uv: Point2<f64>) {
        self.uvs[i * 2] = uv.x as f32;
        self.uvs[i * 2 + 1] = uv.y as f32;
    }

    /// Iterate over all triangles of all submeshes
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.submeshes
            .iter()
            .flat_map(|s| s.chunks_exact(3).map(|t| [t[0], t[1], t[2]]))
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.is_empty() {
            return None;
        }

        let mut min = self.position(0);
        let mut max = min;
        for i in 1..self.vertex_count() {
            let p = self.position(i);
            min = min.inf(&p);
            max = max.sup(&p);
        }
        Some((min, max))
    }

    /// Check buffer invariants
    ///
    /// Every index must reference an existing vertex, every submesh must hold
    /// whole triangles, and optional attribute buffers must be empty or sized
    /// to the vertex count.
    pub fn validate(&self) -> bool {
        let n = self.vertex_count();

        if self.positions.len() % 3 != 0 || self.uvs.len() != n * 2 {
            return false;
        }
        if !self.normals.is_empty() && self.normals.len() != n * 3 {
            return false;
        }
        if !self.tangents.is_empty() && self.tangents.len() != n * 4 {
            return false;
        }

        self.submeshes
            .iter()
            .all(|s| s.len() % 3 == 0 && s.iter().all(|&i| (i as usize) < n))
    }

    /// Compute area-weighted vertex normals
    pub fn compute_normals(&mut self) {
        let mut accum = vec![Vector3::<f64>::zeros(); self.vertex_count()];

        for [i0, i1, i2] in self.triangles() {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            let v0 = self.position(i0);
            let face = (self.position(i1) - v0).cross(&(self.position(i2) - v0));
            accum[i0] += face;
            accum[i1] += face;
            accum[i2] += face;
        }

        self.normals = accum
            .iter()
            .flat_map(|n| {
                let n = n.try_normalize(1e-12).unwrap_or_else(Vector3::zeros);
                [n.x as f32, n.y as f32, n.z as f32]
            })
            .collect();
    }

    /// Compute per-vertex tangents from UV gradients
    ///
    /// Tangents are orthogonalized against the vertex normals (computed first
    /// if missing) and carry the bitangent handedness in `w`.
    pub fn recalculate_tangents(&mut self) {
        if self.normals.len() != self.positions.len() {
            self.compute_normals();
        }

        let n = self.vertex_count();
        let mut tan1 = vec![Vector3::<f64>::zeros(); n];
        let mut tan2 = vec![Vector3::<f64>::zeros(); n];

        for [i0, i1, i2] in self.triangles() {
            let (i0, i1, i2) = (i0 as usize, i1 as usize, i2 as usize);
            let p0 = self.position(i0);
            let e1 = self.position(i1) - p0;
            let e2 = self.position(i2) - p0;

            let w0 = self.uv(i0);
            let d1 = self.uv(i1) - w0;
            let d2 = self.uv(i2) - w0;

            let det = d1.x * d2.y - d2.x * d1.y;
            if det.abs() < 1e-12 {
                continue;
            }
            let r = 1.0 / det;
            let sdir = (e1 * d2.y - e2 * d1.y) * r;
            let tdir = (e2 * d1.x - e1 * d2.x) * r;

            for i in [i0, i1, i2] {
                tan1[i] += sdir;
                tan2[i] += tdir;
            }
        }

        let mut tangents = Vec::with_capacity(n * 4);
        for i in 0..n {
            let normal = Vector3::new(
                self.normals[i * 3] as f64,
                self.normals[i * 3 + 1] as f64,
                self.normals[i * 3 + 2] as f64,
            );
            let t = tan1[i];
            let tangent = (t - normal * normal.dot(&t))
                .try_normalize(1e-12)
                .unwrap_or_else(Vector3::x);
            let w = if normal.cross(&t).dot(&tan2[i]) < 0.0 {
                -1.0
            } else {
                1.0
            };
            tangents.extend_from_slice(&[tangent.x as f32, tangent.y as f32, tangent.z as f32, w]);
        }

        self.tangents = tangents;
    }

    /// Merge another mesh into this one, submesh by submesh
    pub fn merge(&mut self, other: &Mesh) {
        let vertex_offset = self.vertex_count() as u32;
        let had_normals = !self.normals.is_empty() || self.is_empty();
        let had_tangents = !self.tangents.is_empty() || self.is_empty();

        self.positions.extend_from_slice(&other.positions);
        self.uvs.extend_from_slice(&other.uvs);

        if had_normals && !other.normals.is_empty() {
            self.normals.extend_from_slice(&other.normals);
        } else {
            self.normals.clear();
        }
        if had_tangents && !other.tangents.is_empty() {
            self.tangents.extend_from_slice(&other.tangents);
        } else {
            self.tangents.clear();
        }

        if self.submeshes.len() < other.submeshes.len() {
            self.submeshes.resize(other.submeshes.len(), Vec::new());
        }
        for (target, source) in self.submeshes.iter_mut().zip(&other.submeshes) {
            target.extend(source.iter().map(|i| i + vertex_offset));
        }
    }

    /// Apply a transformation matrix to positions, normals and tangents
    pub fn apply_transform(&mut self, transform: &Matrix4<f64>) {
        for i in 0..self.vertex_count() {
            let p = transform.transform_point(&self.position(i));
            self.positions[i * 3] = p.x as f32;
            self.positions[i * 3 + 1] = p.y as f32;
            self.positions[i * 3 + 2] = p.z as f32;
        }

        if !self.normals.is_empty() {
            let normal_matrix = transform
                .try_inverse()
                .map(|inv| inv.transpose())
                .unwrap_or(*transform);
            for n in self.normals.chunks_exact_mut(3) {
                let v = Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64);
                let v = normal_matrix
                    .transform_vector(&v)
                    .try_normalize(1e-12)
                    .unwrap_or(v);
                n[0] = v.x as f32;
                n[1] = v.y as f32;
                n[2] = v.z as f32;
            }
        }

        for t in self.tangents.chunks_exact_mut(4) {
            let v = Vector3::new(t[0] as f64, t[1] as f64, t[2] as f64);
            let v = transform.transform_vector(&v).try_normalize(1e-12).unwrap_or(v);
            t[0] = v.x as f32;
            t[1] = v.y as f32;
            t[2] = v.z as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_quad() -> Mesh {
        Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            normals: Vec::new(),
            tangents: Vec::new(),
            submeshes: vec![vec![0, 2, 1, 1, 2, 3]],
        }
    }

    #[test]
    fn test_counts() {
        let mesh = unit_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.submesh_count(), 1);
        assert!(mesh.submesh(3).is_empty());
        assert!(mesh.validate());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = unit_quad();
        mesh.submeshes[0][5] = 4;
        assert!(!mesh.validate());
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = unit_quad();
        mesh.submeshes.push(vec![0, 1]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_compute_normals_points_up() {
        let mut mesh = unit_quad();
        mesh.compute_normals();
        assert_eq!(mesh.normals.len(), 12);
        for n in mesh.normals.chunks_exact(3) {
            assert_relative_eq!(n[1], 1.0);
        }
    }

    #[test]
    fn test_recalculate_tangents_follow_u() {
        let mut mesh = unit_quad();
        mesh.recalculate_tangents();
        assert_eq!(mesh.tangents.len(), 16);
        for t in mesh.tangents.chunks_exact(4) {
            assert_relative_eq!(t[0], 1.0, epsilon = 1e-6);
            assert_relative_eq!(t[3].abs(), 1.0);
        }
        assert!(mesh.validate());
    }

    #[test]
    fn test_merge_offsets_indices() {
        let mut mesh = unit_quad();
        let other = unit_quad();
        mesh.merge(&other);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.submesh(0)[6..], [4, 6, 5, 5, 6, 7]);
        assert!(mesh.validate());
    }

    #[test]
    fn test_apply_transform_translates() {
        let mut mesh = unit_quad();
        mesh.apply_transform(&Matrix4::new_translation(&Vector3::new(0.0, 2.0, 0.0)));
        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.y, 2.0);
        assert_relative_eq!(max.y, 2.0);
    }

    #[test]
    fn test_submesh_names() {
        assert_eq!(Submesh::Sides.index(), 0);
        assert_eq!(Submesh::Caps.index(), 1);
        assert_eq!(Submesh::Caps.name(), "caps");
    }
}
