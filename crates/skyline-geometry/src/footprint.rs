// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor footprints
//!
//! A footprint is an implicitly closed outline in the horizontal plane
//! (shared Y). It is copied into every extrusion call, so callers can keep
//! editing their own copy without affecting meshes already generated.

use crate::{Point2, Point3, Vector3};

/// Planar floor outline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Footprint {
    /// Outline points, any winding
    pub points: Vec<Point3<f64>>,
}

impl Footprint {
    /// Create a footprint from outline points
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Rectangle centered at the origin
    ///
    /// Corners are listed as (-x,-z), (+x,-z), (+x,+z), (-x,+z).
    pub fn rectangle(width: f64, depth: f64) -> Self {
        let half_w = width / 2.0;
        let half_d = depth / 2.0;

        Self::new(vec![
            Point3::new(-half_w, 0.0, -half_d),
            Point3::new(half_w, 0.0, -half_d),
            Point3::new(half_w, 0.0, half_d),
            Point3::new(-half_w, 0.0, half_d),
        ])
    }

    /// Regular polygon approximating a circle centered at the origin
    pub fn circle(radius: f64, segments: Option<usize>) -> Self {
        let segments = segments.unwrap_or_else(|| calculate_circle_segments(radius));
        let points = (0..segments)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
                Point3::new(radius * angle.cos(), 0.0, radius * angle.sin())
            })
            .collect();

        Self::new(points)
    }

    /// Lift a 2D outline (x, y) onto the ground plane as (x, 0, y)
    pub fn from_xz(outline: &[Point2<f64>]) -> Self {
        Self::new(outline.iter().map(|p| Point3::new(p.x, 0.0, p.y)).collect())
    }

    /// Copy of this footprint moved by `offset`
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self::new(self.points.iter().map(|p| p + offset).collect())
    }

    /// Number of outline points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the outline has no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Point3<f64>>> for Footprint {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

/// Calculate adaptive number of segments for a circle
#[inline]
pub fn calculate_circle_segments(radius: f64) -> usize {
    let segments = (radius.sqrt() * 8.0).ceil() as usize;
    segments.clamp(8, 32)
}
