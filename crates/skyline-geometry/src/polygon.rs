// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon cleanup and winding utilities
//!
//! Footprints arrive as raw point lists from authoring tools: they may repeat
//! points, carry an explicit closing point, and use either winding. The
//! helpers here turn them into the clean, clockwise input the ear clipper
//! expects. The 2D convention is X right and Z "up"; Y is height.

use crate::{Error, Point2, Point3, Result};

/// Distance under which two consecutive points are considered the same
pub const POINT_EPSILON: f64 = 1e-4;

/// Remove near-duplicate consecutive points and an explicit closing point
///
/// A point is dropped when it lies within [`POINT_EPSILON`] of the previously
/// kept point. If the first and last kept points coincide, the last one is
/// dropped since the polygon is implicitly closed.
///
/// # Errors
/// [`Error::InsufficientVertices`] if fewer than three points survive.
pub fn clean_points(input: &[Point3<f64>]) -> Result<Vec<Point3<f64>>> {
    let mut result: Vec<Point3<f64>> = Vec::with_capacity(input.len());

    for p in input {
        match result.last() {
            Some(last) if nalgebra::distance(p, last) <= POINT_EPSILON => {}
            _ => result.push(*p),
        }
    }

    if result.len() >= 2 {
        let first = result[0];
        let last = result[result.len() - 1];
        if nalgebra::distance(&first, &last) < POINT_EPSILON {
            result.pop();
        }
    }

    if result.len() < 3 {
        return Err(Error::insufficient_vertices(result.len()));
    }

    Ok(result)
}

/// Project footprint points onto the ground plane as (x, z)
#[inline]
pub fn project_xz(points: &[Point3<f64>]) -> Vec<Point2<f64>> {
    points.iter().map(|p| Point2::new(p.x, p.z)).collect()
}

/// Shoelace sum `Σ (x2 - x1)(y2 + y1)` over all edges
///
/// Positive for clockwise polygons, negative for counter-clockwise ones.
/// The magnitude is twice the enclosed area.
#[inline]
pub fn winding_sum(polygon: &[Point2<f64>]) -> f64 {
    let n = polygon.len();
    let mut sum = 0.0;
    for i in 0..n {
        let v1 = &polygon[i];
        let v2 = &polygon[(i + 1) % n];
        sum += (v2.x - v1.x) * (v2.y + v1.y);
    }
    sum
}

/// Check if a polygon is clockwise
#[inline]
pub fn is_clockwise(polygon: &[Point2<f64>]) -> bool {
    winding_sum(polygon) > 0.0
}

/// Unsigned polygon area
#[inline]
pub fn polygon_area(polygon: &[Point2<f64>]) -> f64 {
    winding_sum(polygon).abs() * 0.5
}

/// Enforce clockwise winding
///
/// Returns the (possibly reversed) polygon and whether it was reversed. When
/// `true`, any parallel list (such as the 3D footprint the polygon was
/// projected from) must be reversed as well to keep indices in lockstep.
pub fn orient(mut polygon: Vec<Point2<f64>>) -> (Vec<Point2<f64>>, bool) {
    if is_clockwise(&polygon) {
        (polygon, false)
    } else {
        polygon.reverse();
        (polygon, true)
    }
}
