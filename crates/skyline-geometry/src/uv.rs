// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar UV projection
//!
//! Assigns texture coordinates to an arbitrary triangle mesh by projecting
//! each vertex onto a tangent plane derived from its triangle's normal. Used
//! for roof and antenna primitives whose built-in UVs do not tile with the
//! building textures.
//!
//! The tangent basis is cached per call under the *first* index of the
//! triangle that computed it. A later triangle starting at the same index
//! reuses that basis even if its own normal differs. Output depends on this,
//! so it is kept as is.

use crate::mesh::Mesh;
use crate::{Point2, Point3, Vector2, Vector3};
use nalgebra::Matrix4;
use rustc_hash::FxHashMap;

/// Normal magnitude at or below which a triangle is treated as degenerate
pub const DEGENERATE_NORMAL_EPSILON: f64 = 1e-6;

/// Orthonormal (tangent, bitangent) pair spanning a projection plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentBasis {
    pub tangent: Vector3<f64>,
    pub bitangent: Vector3<f64>,
}

impl TangentBasis {
    /// Zero basis, projects everything onto the origin
    pub fn zero() -> Self {
        Self {
            tangent: Vector3::zeros(),
            bitangent: Vector3::zeros(),
        }
    }

    /// Derive the basis of triangle (v1, v2, v3)
    ///
    /// Returns `None` for triangles whose normal is too short to normalize.
    pub fn from_triangle(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Option<Self> {
        let normal = (v2 - v1).cross(&(v3 - v1));
        if normal.norm() <= DEGENERATE_NORMAL_EPSILON {
            return None;
        }
        let normal = normal.normalize();

        // Normal parallel to world up leaves the cross product at zero
        let tangent = Vector3::y()
            .cross(&normal)
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::x);
        let bitangent = normal
            .cross(&tangent)
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros);

        Some(Self { tangent, bitangent })
    }

    /// Scalar projection of `p` onto the basis, divided by `scale`
    #[inline]
    pub fn project(&self, p: &Point3<f64>, scale: &Vector2<f64>) -> Point2<f64> {
        Point2::new(
            p.coords.dot(&self.tangent) / scale.x,
            p.coords.dot(&self.bitangent) / scale.y,
        )
    }
}

/// Planar projection settings
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarUvOptions {
    /// Texture scale, UVs are divided by it component-wise
    pub scale: Vector2<f64>,
    /// Project world-space positions instead of local ones
    pub world_space: bool,
    /// Local-to-world transform, only used with `world_space`
    pub transform: Matrix4<f64>,
    /// Rebuild tangents from the new UVs
    pub recalculate_tangents: bool,
}

impl Default for PlanarUvOptions {
    fn default() -> Self {
        Self {
            scale: Vector2::new(1.0, 1.0),
            world_space: false,
            transform: Matrix4::identity(),
            recalculate_tangents: true,
        }
    }
}

impl PlanarUvOptions {
    /// Local-space projection with a uniform scale
    pub fn local(scale: f64) -> Self {
        Self {
            scale: Vector2::new(scale, scale),
            ..Default::default()
        }
    }

    /// World-space projection through `transform` with a uniform scale
    pub fn world(transform: Matrix4<f64>, scale: f64) -> Self {
        Self {
            scale: Vector2::new(scale, scale),
            world_space: true,
            transform,
            ..Default::default()
        }
    }
}

/// Statistics of one projection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UvProjectionReport {
    pub triangles: usize,
    pub degenerate_triangles: usize,
    pub cached_bases: usize,
}

/// Project planar UVs onto a copy of `mesh`
///
/// The input mesh is never modified. Vertices not referenced by any triangle
/// keep their input UV (zero when the input had none).
pub fn project_planar_uvs(mesh: &Mesh, options: &PlanarUvOptions) -> (Mesh, UvProjectionReport) {
    let mut out = mesh.clone();
    if out.uvs.len() != out.vertex_count() * 2 {
        out.uvs.resize(out.vertex_count() * 2, 0.0);
    }

    let mut cache: FxHashMap<u32, TangentBasis> = FxHashMap::default();
    let mut report = UvProjectionReport::default();

    let position = |i: u32| {
        let p = mesh.position(i as usize);
        if options.world_space {
            options.transform.transform_point(&p)
        } else {
            p
        }
    };

    for [i1, i2, i3] in mesh.triangles() {
        report.triangles += 1;
        let (v1, v2, v3) = (position(i1), position(i2), position(i3));

        let basis = *cache.entry(i1).or_insert_with(|| {
            TangentBasis::from_triangle(&v1, &v2, &v3).unwrap_or_else(|| {
                report.degenerate_triangles += 1;
                TangentBasis::zero()
            })
        });

        for (i, v) in [(i1, &v1), (i2, &v2), (i3, &v3)] {
            out.set_uv(i as usize, basis.project(v, &options.scale));
        }
    }
    report.cached_bases = cache.len();

    if options.recalculate_tangents {
        out.recalculate_tangents();
    }

    if report.degenerate_triangles > 0 {
        log::debug!(
            "Planar UV projection: {} of {} triangles degenerate",
            report.degenerate_triangles,
            report.triangles
        );
    }

    (out, report)
}
