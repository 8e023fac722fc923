// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooftop features for tall buildings

use crate::random;
use nalgebra::{Matrix4, Vector3};
use rand::RngCore;
use skyline_geometry::{cube, cylinder, project_planar_uvs, uv_sphere, Mesh, PlanarUvOptions};
use skyline_model::{AntennaSettings, MaterialId, PointyRoofSettings, RoofStyle};

/// Pointy roof stops once a segment side drops below this
const MIN_SEGMENT_SIZE: f64 = 0.1;
/// Share of the smaller base side used as pointy segment height
const SEGMENT_HEIGHT_RATIO: f64 = 0.2;

const ANTENNA_SEGMENTS: usize = 20;
const LIGHT_SEGMENTS: usize = 24;
const LIGHT_RINGS: usize = 16;

/// Roof feature variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoofKind {
    Pointy,
    AntennaCluster,
}

/// One primitive of a roof
#[derive(Debug, Clone, PartialEq)]
pub struct RoofPart {
    /// Unit-sized primitive with projected UVs
    pub mesh: Mesh,
    /// Roof-local placement and scale
    pub transform: Matrix4<f64>,
    pub material: Option<MaterialId>,
}

impl RoofPart {
    /// Mesh with the placement applied
    pub fn baked_mesh(&self) -> Mesh {
        let mut mesh = self.mesh.clone();
        mesh.apply_transform(&self.transform);
        mesh
    }
}

/// Generated roof, parts relative to `elevation` above the building base
#[derive(Debug, Clone, PartialEq)]
pub struct Roof {
    pub kind: RoofKind,
    pub elevation: f64,
    pub parts: Vec<RoofPart>,
}

/// Generate a roof of the given style
///
/// `roof_to_world` places the roof origin in the world and is only used for
/// world-space UV projection.
pub fn generate_roof(
    style: &RoofStyle,
    base_width: f64,
    base_depth: f64,
    elevation: f64,
    roof_to_world: &Matrix4<f64>,
    rng: &mut dyn RngCore,
) -> Roof {
    let (kind, parts) = match style {
        RoofStyle::Pointy(settings) => (
            RoofKind::Pointy,
            pointy_roof(settings, base_width, base_depth, rng),
        ),
        RoofStyle::AntennaCluster(settings) => (
            RoofKind::AntennaCluster,
            antenna_cluster(settings, base_width, base_depth, roof_to_world, rng),
        ),
    };

    log::debug!("Generated {:?} roof with {} parts", kind, parts.len());
    Roof {
        kind,
        elevation,
        parts,
    }
}

/// Stack of boxes shrinking towards the top
///
/// UVs are projected in the unit cube's own space, so every segment shows the
/// same texture area regardless of its size.
pub fn pointy_roof(
    settings: &PointyRoofSettings,
    base_width: f64,
    base_depth: f64,
    rng: &mut dyn RngCore,
) -> Vec<RoofPart> {
    let segments = random::range_u32(rng, settings.min_segments, settings.max_segments + 1);
    let shrink = random::range_f64(rng, settings.min_shrink_factor, settings.max_shrink_factor);
    let segment_height =
        base_width.min(base_depth) * SEGMENT_HEIGHT_RATIO * settings.height_multiplier;

    let (mesh, _) = project_planar_uvs(&cube(), &PlanarUvOptions::local(settings.tile_size));

    let mut parts = Vec::with_capacity(segments as usize);
    let mut width = base_width;
    let mut depth = base_depth;
    let mut y = 0.0;

    for _ in 0..segments {
        let transform = Matrix4::new_translation(&Vector3::new(0.0, y + segment_height / 2.0, 0.0))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(width, segment_height, depth));
        parts.push(RoofPart {
            mesh: mesh.clone(),
            transform,
            material: settings.material,
        });

        y += segment_height;
        width *= shrink;
        depth *= shrink;
        if width < MIN_SEGMENT_SIZE || depth < MIN_SEGMENT_SIZE {
            break;
        }
    }

    parts
}

/// Antennas with a warning light sphere on each tip
///
/// Antenna UVs are projected in world space so neighbouring antennas tile
/// continuously.
pub fn antenna_cluster(
    settings: &AntennaSettings,
    base_width: f64,
    base_depth: f64,
    roof_to_world: &Matrix4<f64>,
    rng: &mut dyn RngCore,
) -> Vec<RoofPart> {
    let count = random::range_u32(rng, 1, settings.max_antennas + 1);
    let radius = settings.antenna_radius;
    let height = settings.antenna_height;

    let antenna = cylinder(ANTENNA_SEGMENTS);
    let light = uv_sphere(LIGHT_SEGMENTS, LIGHT_RINGS);

    let mut parts = Vec::with_capacity(2 * count as usize);
    for _ in 0..count {
        let x = random::range_f64(rng, -base_width / 2.0 + radius, base_width / 2.0 - radius);
        let z = random::range_f64(rng, -base_depth / 2.0 + radius, base_depth / 2.0 - radius);

        let transform = Matrix4::new_translation(&Vector3::new(x, height / 2.0, z))
            * Matrix4::new_nonuniform_scaling(&Vector3::new(radius, height / 2.0, radius));
        let options = PlanarUvOptions::world(roof_to_world * transform, settings.tile_size);
        let (mesh, _) = project_planar_uvs(&antenna, &options);
        parts.push(RoofPart {
            mesh,
            transform,
            material: settings.antenna_material,
        });

        parts.push(RoofPart {
            mesh: light.clone(),
            transform: Matrix4::new_translation(&Vector3::new(x, height, z))
                * Matrix4::new_scaling(settings.anti_collision_sphere_radius),
            material: settings.anti_collision_material,
        });
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn origin_of(part: &RoofPart) -> Point3<f64> {
        part.transform.transform_point(&Point3::origin())
    }

    #[test]
    fn test_pointy_roof_segments_shrink() {
        let settings = PointyRoofSettings::default();
        let parts = pointy_roof(&settings, 10.0, 6.0, &mut random::seeded(4));

        assert!((1..=10).contains(&parts.len()));
        let heights: Vec<f64> = parts.iter().map(|p| origin_of(p).y).collect();
        assert_relative_eq!(heights[0], 0.6, epsilon = 1e-12);
        assert!(heights.windows(2).all(|w| w[1] > w[0]));

        let widths: Vec<f64> = parts.iter().map(|p| p.transform[(0, 0)]).collect();
        assert_relative_eq!(widths[0], 10.0);
        assert!(widths.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_pointy_roof_stops_when_tiny() {
        let settings = PointyRoofSettings {
            min_segments: 10,
            max_segments: 10,
            min_shrink_factor: 0.1,
            max_shrink_factor: 0.1,
            ..Default::default()
        };
        // 2.0 -> 0.2 -> 0.02, the third segment is never built
        let parts = pointy_roof(&settings, 2.0, 2.0, &mut random::seeded(0));
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_pointy_uvs_are_local() {
        let settings = PointyRoofSettings::default();
        let parts = pointy_roof(&settings, 8.0, 8.0, &mut random::seeded(1));
        assert!(parts.windows(2).all(|w| w[0].mesh.uvs == w[1].mesh.uvs));
    }

    #[test]
    fn test_antenna_cluster() {
        let settings = AntennaSettings {
            antenna_material: Some(MaterialId(1)),
            anti_collision_material: Some(MaterialId(2)),
            ..Default::default()
        };
        let parts = antenna_cluster(
            &settings,
            12.0,
            8.0,
            &Matrix4::identity(),
            &mut random::seeded(9),
        );

        assert_eq!(parts.len() % 2, 0);
        assert!((1..=5).contains(&(parts.len() / 2)));

        for pair in parts.chunks(2) {
            let (antenna, light) = (&pair[0], &pair[1]);
            assert_eq!(antenna.material, Some(MaterialId(1)));
            assert_eq!(light.material, Some(MaterialId(2)));

            let base = origin_of(antenna);
            assert!(base.x.abs() <= 6.0 - 0.2 + 1e-12);
            assert!(base.z.abs() <= 4.0 - 0.2 + 1e-12);
            assert_relative_eq!(base.y, 5.0);

            let tip = origin_of(light);
            assert_relative_eq!(tip.y, 10.0);
            assert_relative_eq!(tip.x, base.x);
        }
    }

    #[test]
    fn test_antenna_uvs_depend_on_world_placement() {
        let settings = AntennaSettings {
            max_antennas: 1,
            ..Default::default()
        };
        let identity = Matrix4::identity();
        let here = antenna_cluster(&settings, 4.0, 4.0, &identity, &mut random::seeded(3));
        let raised = Matrix4::new_translation(&Vector3::new(0.0, 40.0, 0.0));
        let there = antenna_cluster(&settings, 4.0, 4.0, &raised, &mut random::seeded(3));

        assert_eq!(here[0].transform, there[0].transform);
        assert_ne!(here[0].mesh.uvs, there[0].mesh.uvs);
    }

    #[test]
    fn test_baked_mesh_applies_transform() {
        let parts = pointy_roof(&PointyRoofSettings::default(), 4.0, 4.0, &mut random::seeded(2));
        let (min, max) = parts[0].baked_mesh().bounds().unwrap();
        assert_relative_eq!(max.x - min.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_generate_roof_dispatch() {
        let roof = generate_roof(
            &RoofStyle::AntennaCluster(AntennaSettings::default()),
            10.0,
            10.0,
            30.0,
            &Matrix4::identity(),
            &mut random::seeded(0),
        );
        assert_eq!(roof.kind, RoofKind::AntennaCluster);
        assert_eq!(roof.elevation, 30.0);
        assert!(!roof.parts.is_empty());
    }
}
