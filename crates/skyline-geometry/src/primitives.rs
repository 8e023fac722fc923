// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Primitive meshes for roof accessories
//!
//! Unit-sized shapes centred on the origin with outward (counter-clockwise)
//! winding, normals, and simple 0..1 UVs. Everything goes into submesh 0.
//! Roof generation rescales them and re-projects their UVs.

use crate::mesh::Mesh;
use crate::mesh_builder::MeshBuilder;
use crate::{Point2, Point3, Vector3};
use std::f64::consts::PI;

/// Unit cube: 6 faces, 24 vertices, 12 triangles
pub fn cube() -> Mesh {
    // (normal, u axis, v axis) with u x v == normal
    let faces = [
        (Vector3::x(), -Vector3::z(), Vector3::y()),
        (-Vector3::x(), Vector3::z(), Vector3::y()),
        (Vector3::y(), Vector3::x(), -Vector3::z()),
        (-Vector3::y(), Vector3::x(), Vector3::z()),
        (Vector3::z(), Vector3::x(), Vector3::y()),
        (-Vector3::z(), -Vector3::x(), Vector3::y()),
    ];
    let corners = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

    let mut builder = MeshBuilder::with_capacity(24, 1);
    for (normal, u, v) in faces {
        let centre = Point3::from(normal * 0.5);
        let base = builder.vertex_count() as u32;
        for (cu, cv) in corners {
            builder.add_vertex(centre + u * cu + v * cv, Point2::new(cu + 0.5, cv + 0.5));
        }
        builder.add_triangle(base, base + 1, base + 2, 0);
        builder.add_triangle(base, base + 2, base + 3, 0);
    }

    finish(builder)
}

/// Cylinder of radius 0.5 and height 2 along Y, with caps
///
/// The side has a seam column so UVs wrap cleanly. `segments` is clamped to
/// at least 3.
pub fn cylinder(segments: usize) -> Mesh {
    let segments = segments.max(3);
    let radius = 0.5;
    let ring = |i: usize, y: f64| {
        let angle = 2.0 * PI * (i as f64) / (segments as f64);
        Point3::new(radius * angle.cos(), y, radius * angle.sin())
    };

    let mut builder = MeshBuilder::with_capacity(4 * (segments + 1), 1);

    // Side, bottom row then top row per column
    for i in 0..=segments {
        let u = i as f64 / segments as f64;
        builder.add_vertex(ring(i, -1.0), Point2::new(u, 0.0));
        builder.add_vertex(ring(i, 1.0), Point2::new(u, 1.0));
    }
    for i in 0..segments as u32 {
        let (b0, t0) = (2 * i, 2 * i + 1);
        let (b1, t1) = (2 * i + 2, 2 * i + 3);
        builder.add_triangle(b0, t0, b1, 0);
        builder.add_triangle(b1, t0, t1, 0);
    }

    // Caps
    for (y, upward) in [(1.0, true), (-1.0, false)] {
        let centre = builder.add_vertex(Point3::new(0.0, y, 0.0), Point2::new(0.5, 0.5));
        let first = builder.vertex_count() as u32;
        for i in 0..segments {
            let p = ring(i, y);
            builder.add_vertex(p, Point2::new(p.x + 0.5, p.z + 0.5));
        }
        for i in 0..segments as u32 {
            let a = first + i;
            let b = first + (i + 1) % segments as u32;
            if upward {
                builder.add_triangle(centre, b, a, 0);
            } else {
                builder.add_triangle(centre, a, b, 0);
            }
        }
    }

    finish(builder)
}

/// Latitude/longitude sphere of radius 0.5
///
/// Pole rows are kept as separate vertices per column, but the zero-area
/// triangles touching them are skipped.
pub fn uv_sphere(segments: usize, rings: usize) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let radius = 0.5;
    let columns = segments as u32 + 1;

    let mut builder = MeshBuilder::with_capacity((rings + 1) * (segments + 1), 1);
    for r in 0..=rings {
        let phi = PI * (r as f64) / (rings as f64);
        for s in 0..=segments {
            let theta = 2.0 * PI * (s as f64) / (segments as f64);
            builder.add_vertex(
                Point3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.cos(),
                    radius * phi.sin() * theta.sin(),
                ),
                Point2::new(
                    s as f64 / segments as f64,
                    1.0 - r as f64 / rings as f64,
                ),
            );
        }
    }

    for r in 0..rings as u32 {
        for s in 0..segments as u32 {
            let a = r * columns + s;
            let b = a + columns;
            if r + 1 < rings as u32 {
                builder.add_triangle(b, a, b + 1, 0);
            }
            if r > 0 {
                builder.add_triangle(b + 1, a, a + 1, 0);
            }
        }
    }

    finish(builder)
}

fn finish(builder: MeshBuilder) -> Mesh {
    let mut mesh = builder.build();
    mesh.compute_normals();
    mesh
}
