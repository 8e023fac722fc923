// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Append-only mesh assembly
//!
//! Geometry code pushes vertices and triangles here without tracking
//! offsets itself. There is no removal; regenerating a mesh means starting a
//! new builder.

use crate::mesh::{Mesh, Submesh};
use crate::{Point2, Point3};

/// Incremental mesh builder with submesh grouping
#[derive(Debug, Default)]
pub struct MeshBuilder {
    positions: Vec<f32>,
    uvs: Vec<f32>,
    submeshes: Vec<Vec<u32>>,
}

impl MeshBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with pre-allocated capacity
    pub fn with_capacity(vertex_count: usize, submesh_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            uvs: Vec::with_capacity(vertex_count * 2),
            submeshes: vec![Vec::new(); submesh_count],
        }
    }

    /// Number of vertices added so far
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>, uv: Point2<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.uvs.extend_from_slice(&[uv.x as f32, uv.y as f32]);
        index
    }

    /// Append a triangle to a submesh, creating the submesh if needed
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32, submesh: usize) {
        debug_assert!(
            [i0, i1, i2].iter().all(|&i| (i as usize) < self.vertex_count()),
            "triangle references a vertex that was not added"
        );

        if self.submeshes.len() <= submesh {
            self.submeshes.resize(submesh + 1, Vec::new());
        }
        self.submeshes[submesh].extend_from_slice(&[i0, i1, i2]);
    }

    /// Append a triangle to a named submesh
    #[inline]
    pub fn add_submesh_triangle(&mut self, i0: u32, i1: u32, i2: u32, submesh: Submesh) {
        self.add_triangle(i0, i1, i2, submesh.index());
    }

    /// Finish the mesh
    pub fn build(self) -> Mesh {
        Mesh {
            positions: self.positions,
            uvs: self.uvs,
            normals: Vec::new(),
            tangents: Vec::new(),
            submeshes: self.submeshes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_increase_from_zero() {
        let mut builder = MeshBuilder::new();
        let a = builder.add_vertex(Point3::origin(), Point2::origin());
        let b = builder.add_vertex(Point3::new(1.0, 0.0, 0.0), Point2::new(1.0, 0.0));
        let c = builder.add_vertex(Point3::new(0.0, 0.0, 1.0), Point2::new(0.0, 1.0));
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(builder.vertex_count(), 3);
    }

    #[test]
    fn test_submeshes_grow_on_demand() {
        let mut builder = MeshBuilder::new();
        for i in 0..3 {
            builder.add_vertex(Point3::new(i as f64, 0.0, 0.0), Point2::origin());
        }
        builder.add_triangle(0, 1, 2, 1);

        let mesh = builder.build();
        assert_eq!(mesh.submesh_count(), 2);
        assert!(mesh.submesh(0).is_empty());
        assert_eq!(mesh.submesh(1), &[0, 1, 2]);
        assert!(mesh.validate());
    }

    #[test]
    fn test_no_dedup() {
        let mut builder = MeshBuilder::with_capacity(3, 1);
        for _ in 0..3 {
            builder.add_vertex(Point3::origin(), Point2::origin());
        }
        builder.add_submesh_triangle(0, 1, 2, Submesh::Sides);
        builder.add_submesh_triangle(0, 1, 2, Submesh::Sides);

        let mesh = builder.build();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
