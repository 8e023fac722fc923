// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Ear clipping for simple (possibly concave) polygons with clockwise winding.
//! The first valid ear in scan order is always taken, so the output is fully
//! determined by the input order. Cost is O(n^3) in the worst case, which is
//! fine for building footprints of a few dozen points.

use crate::{Error, Point2, Result};

/// Check if three points form a clockwise turn
#[inline]
pub fn is_clockwise_triangle(p1: &Point2<f64>, p2: &Point2<f64>, p3: &Point2<f64>) -> bool {
    let d1 = p2 - p1;
    let d2 = p3 - p2;
    (-d1.y * d2.x + d1.x * d2.y) < 0.0
}

#[inline]
fn half_plane_sign(p1: &Point2<f64>, p2: &Point2<f64>, p3: &Point2<f64>) -> f64 {
    (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
}

/// Check if `p` lies strictly inside triangle (a, b, c)
///
/// Points on an edge or coinciding with a corner are not inside.
#[inline]
pub fn point_in_triangle(
    a: &Point2<f64>,
    b: &Point2<f64>,
    c: &Point2<f64>,
    p: &Point2<f64>,
) -> bool {
    let b1 = half_plane_sign(p, a, b) < 0.0;
    let b2 = half_plane_sign(p, b, c) < 0.0;
    let b3 = half_plane_sign(p, c, a) < 0.0;
    b1 == b2 && b2 == b3
}

/// Triangulate a simple clockwise polygon (no holes)
///
/// Returns one index triple per triangle. Indices refer to the input
/// ordering, not to the shrinking working list. A simple polygon with `n`
/// vertices yields exactly `n - 2` triangles.
///
/// # Errors
/// - [`Error::InsufficientVertices`] for fewer than three points
/// - [`Error::TriangulationFailed`] when a full scan finds no ear, which
///   happens for self-intersecting or counter-clockwise input
pub fn triangulate_polygon(points: &[Point2<f64>]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 3 {
        return Err(Error::insufficient_vertices(points.len()));
    }

    let mut polygon: Vec<Point2<f64>> = points.to_vec();
    let mut indices: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);

    while polygon.len() >= 3 {
        let ear = find_ear(&polygon).ok_or_else(|| Error::triangulation_failed(polygon.len()))?;

        let n = polygon.len();
        let prev = (ear + n - 1) % n;
        let next = (ear + 1) % n;
        triangles.push([indices[prev], indices[ear], indices[next]]);

        polygon.remove(ear);
        indices.remove(ear);
    }

    Ok(triangles)
}

/// Position of the first ear in scan order
fn find_ear(polygon: &[Point2<f64>]) -> Option<usize> {
    let n = polygon.len();

    (0..n).find(|&i| {
        let i0 = (i + n - 1) % n;
        let i2 = (i + 1) % n;

        let a = &polygon[i0];
        let b = &polygon[i];
        let c = &polygon[i2];

        if !is_clockwise_triangle(a, b, c) {
            return false;
        }

        !polygon
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i0 && j != i && j != i2)
            .any(|(_, p)| point_in_triangle(a, b, c, p))
    })
}

/// Area of a single triangle
#[inline]
pub fn triangle_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    ((b - a).perp(&(c - a)) * 0.5).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::{orient, polygon_area};
    use approx::assert_relative_eq;

    fn clockwise(points: Vec<Point2<f64>>) -> Vec<Point2<f64>> {
        orient(points).0
    }

    fn total_area(points: &[Point2<f64>], triangles: &[[usize; 3]]) -> f64 {
        triangles
            .iter()
            .map(|t| triangle_area(&points[t[0]], &points[t[1]], &points[t[2]]))
            .sum()
    }

    fn comb(teeth: usize) -> Vec<Point2<f64>> {
        // Concave comb: teeth pointing up along +y
        let mut points = vec![Point2::new(0.0, 0.0), Point2::new(teeth as f64 * 2.0, 0.0)];
        for t in (0..teeth).rev() {
            let x = t as f64 * 2.0;
            points.push(Point2::new(x + 2.0, 3.0));
            points.push(Point2::new(x + 1.0, 3.0));
            points.push(Point2::new(x + 1.0, 1.0));
            points.push(Point2::new(x, 1.0));
        }
        // The last pushed point (0, 1) closes onto (0, 0)
        points
    }

    #[test]
    fn test_triangulate_square() {
        let points = clockwise(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]);

        let triangles = triangulate_polygon(&points).unwrap();
        assert_eq!(triangles.len(), 2);
        // First ear in scan order is vertex 0 with neighbours 3 and 1
        assert_eq!(triangles[0], [3, 0, 1]);
        assert_eq!(triangles[1], [3, 1, 2]);
    }

    #[test]
    fn test_triangulate_triangle() {
        let points = clockwise(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
        ]);

        let triangles = triangulate_polygon(&points).unwrap();
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_triangulate_concave_count_and_area() {
        let points = clockwise(comb(4));
        let n = points.len();

        let triangles = triangulate_polygon(&points).unwrap();
        assert_eq!(triangles.len(), n - 2);
        assert_relative_eq!(
            total_area(&points, &triangles),
            polygon_area(&points),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_indices_are_valid_and_distinct() {
        let points = clockwise(comb(3));
        let triangles = triangulate_polygon(&points).unwrap();

        for t in &triangles {
            assert!(t.iter().all(|&i| i < points.len()));
            assert_ne!(t[0], t[1]);
            assert_ne!(t[1], t[2]);
            assert_ne!(t[0], t[2]);
        }
    }

    #[test]
    fn test_area_matches_earcutr() {
        let points = clockwise(comb(5));
        let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
        let reference = earcutr::earcut(&flat, &[], 2).unwrap();
        let reference_area: f64 = reference
            .chunks(3)
            .map(|t| triangle_area(&points[t[0]], &points[t[1]], &points[t[2]]))
            .sum();

        let triangles = triangulate_polygon(&points).unwrap();
        assert_relative_eq!(total_area(&points, &triangles), reference_area, epsilon = 1e-9);
    }

    #[test]
    fn test_bowtie_fails() {
        let bowtie = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];

        assert!(matches!(
            triangulate_polygon(&bowtie),
            Err(Error::TriangulationFailed { .. })
        ));
        assert!(matches!(
            triangulate_polygon(&clockwise(bowtie)),
            Err(Error::TriangulationFailed { .. })
        ));
    }

    #[test]
    fn test_counter_clockwise_input_fails() {
        let ccw = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        assert_eq!(
            triangulate_polygon(&ccw),
            Err(Error::TriangulationFailed { remaining: 3 })
        );
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert_eq!(
            triangulate_polygon(&points),
            Err(Error::InsufficientVertices { count: 2 })
        );
    }

    #[test]
    fn test_deterministic() {
        let points = clockwise(comb(4));
        assert_eq!(
            triangulate_polygon(&points).unwrap(),
            triangulate_polygon(&points).unwrap()
        );
    }

    #[test]
    fn test_point_in_triangle_is_strict() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.0, 1.0);
        let c = Point2::new(1.0, 0.0);
        assert!(point_in_triangle(&a, &b, &c, &Point2::new(0.2, 0.2)));
        assert!(!point_in_triangle(&a, &b, &c, &Point2::new(0.5, 0.5)));
        assert!(!point_in_triangle(&a, &b, &c, &a));
        assert!(!point_in_triangle(&a, &b, &c, &Point2::new(2.0, 2.0)));
    }
}
