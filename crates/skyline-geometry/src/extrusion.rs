// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations
//!
//! Turns a floor footprint into a closed prism: bottom cap, top cap and one
//! quad per outline edge. Caps land in [`Submesh::Caps`], walls in
//! [`Submesh::Sides`].

use crate::footprint::Footprint;
use crate::mesh::{Mesh, Submesh};
use crate::mesh_builder::MeshBuilder;
use crate::polygon::{clean_points, orient, project_xz};
use crate::triangulation::triangulate_polygon;
use crate::{Error, Point2, Point3, Result, Vector3};

/// Extrude a footprint straight up along +Y
///
/// The footprint is flattened onto `y = 0`. Cap UVs are the world-aligned
/// planar projection `(x, z) / tile_size`; every wall quad gets its own UV
/// range starting at zero, so textures do not wrap continuously around
/// corners.
///
/// Both caps share the same triangulation and index winding. The top cap is
/// the bottom cap offset by the outline vertex count, not a flipped copy.
///
/// # Errors
/// - [`Error::InvalidParameter`] for non-finite `height` or `tile_size`
/// - [`Error::InsufficientVertices`] if cleaning leaves fewer than 3 points
/// - [`Error::TriangulationFailed`] for self-intersecting outlines
pub fn extrude_footprint(footprint: &Footprint, height: f64, tile_size: f64) -> Result<Mesh> {
    if !height.is_finite() {
        return Err(Error::invalid_parameter(format!(
            "extrusion height must be finite, got {height}"
        )));
    }
    if !tile_size.is_finite() {
        return Err(Error::invalid_parameter(format!(
            "tile size must be finite, got {tile_size}"
        )));
    }

    let mut points = clean_points(&footprint.points)?;
    let (polygon, reversed) = orient(project_xz(&points));
    if reversed {
        points.reverse();
    }

    let triangles = triangulate_polygon(&polygon)?;

    let n = points.len();
    let mut builder = MeshBuilder::with_capacity(6 * n, 2);

    // Bottom cap
    for p in &points {
        let pos = Point3::new(p.x, 0.0, p.z);
        builder.add_vertex(pos, Point2::new(pos.x / tile_size, pos.z / tile_size));
    }
    for &[a, b, c] in &triangles {
        builder.add_submesh_triangle(a as u32, b as u32, c as u32, Submesh::Caps);
    }

    // Top cap
    let offset = n as u32;
    for p in &points {
        let pos = Point3::new(p.x, height, p.z);
        builder.add_vertex(pos, Point2::new(pos.x / tile_size, pos.z / tile_size));
    }
    for &[a, b, c] in &triangles {
        builder.add_submesh_triangle(
            offset + a as u32,
            offset + b as u32,
            offset + c as u32,
            Submesh::Caps,
        );
    }

    // Walls
    let up = Vector3::y() * height;
    let v_max = height / tile_size;
    for i in 0..n {
        let j = (i + 1) % n;
        let p1 = Point3::new(points[i].x, 0.0, points[i].z);
        let p2 = Point3::new(points[j].x, 0.0, points[j].z);
        let u_max = nalgebra::distance(&p1, &p2) / tile_size;

        let v1 = builder.add_vertex(p1, Point2::new(0.0, 0.0));
        let v2 = builder.add_vertex(p2, Point2::new(u_max, 0.0));
        let v3 = builder.add_vertex(p1 + up, Point2::new(0.0, v_max));
        let v4 = builder.add_vertex(p2 + up, Point2::new(u_max, v_max));

        builder.add_submesh_triangle(v1, v2, v3, Submesh::Sides);
        builder.add_submesh_triangle(v2, v4, v3, Submesh::Sides);
    }

    let mesh = builder.build();
    log::debug!(
        "Extruded {} point footprint: {} vertices, {} triangles",
        n,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Extrude a raw outline, see [`extrude_footprint`]
#[inline]
pub fn extrude_points(points: &[Point3<f64>], height: f64, tile_size: f64) -> Result<Mesh> {
    extrude_footprint(&Footprint::new(points.to_vec()), height, tile_size)
}
