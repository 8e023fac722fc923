// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Skyline Geometry
//!
//! Polygon-to-solid extrusion for procedural buildings.
//!
//! ## Overview
//!
//! This crate turns floor outlines into render-ready triangle meshes:
//!
//! - **Polygon Cleanup**: Drop near-duplicate and closing points, enforce clockwise winding
//! - **Triangulation**: Deterministic ear clipping for simple concave polygons
//! - **Extrusion**: Prism meshes with cap and wall submeshes and tiled UVs
//! - **UV Projection**: Per-triangle planar UVs for arbitrary meshes
//! - **Primitives**: Cube, cylinder and sphere meshes for roof accessories
//!
//! Every operation is synchronous and returns a freshly owned [`Mesh`]. Inputs
//! are never modified.
//!
//! ## Quick Start
//!
//! ```rust
//! use skyline_geometry::{extrude_footprint, Footprint, Submesh};
//!
//! let footprint = Footprint::rectangle(10.0, 5.0);
//! let mesh = extrude_footprint(&footprint, 2.0, 1.0)?;
//!
//! assert_eq!(mesh.submesh(Submesh::Caps.index()).len() / 3, 4);
//! println!("Generated {} triangles", mesh.triangle_count());
//! # Ok::<(), skyline_geometry::Error>(())
//! ```

pub mod error;
pub mod extrusion;
pub mod footprint;
pub mod mesh;
pub mod mesh_builder;
pub mod polygon;
pub mod primitives;
pub mod triangulation;
pub mod uv;

// Re-export nalgebra types for convenience
pub use nalgebra::{
    Isometry3, Matrix4, Point2, Point3, Translation3, UnitQuaternion, Vector2, Vector3,
};

// Re-export main types
pub use error::{Error, Result};
pub use extrusion::{extrude_footprint, extrude_points};
pub use footprint::{calculate_circle_segments, Footprint};
pub use mesh::{Mesh, Submesh};
pub use mesh_builder::MeshBuilder;
pub use polygon::{clean_points, is_clockwise, orient, polygon_area, project_xz, POINT_EPSILON};
pub use primitives::{cube, cylinder, uv_sphere};
pub use triangulation::{is_clockwise_triangle, point_in_triangle, triangulate_polygon};
pub use uv::{project_planar_uvs, PlanarUvOptions, TangentBasis, UvProjectionReport};
