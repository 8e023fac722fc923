// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! City orchestration
//!
//! Plans the layout, lays out the ground planes, then walks the plots in
//! planning order generating one building and its sidewalk props per plot.
//! A single seeded generator drives every random choice, so a seed and a
//! configuration fully determine the city.

use crate::building::{
    Building, BuildingController, BuildingGenerator, BuildingSpec, PrefabPlacement,
};
use crate::decoration::{DecorationManager, DecorationRegistry};
use crate::planner::{ground_planes, CityLayoutPlanner, GroundPlane, Layout};
use crate::random;
use crate::Result;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use rand::RngCore;
use skyline_model::{profile_for_plot, CityConfig, NeighborhoodProfile, Rect};

/// Generated city
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub layout: Layout,
    pub ground: Vec<GroundPlane>,
    /// One building per plot, in plot order
    pub buildings: Vec<Building>,
    /// World-space sidewalk props
    pub props: Vec<PrefabPlacement>,
}

impl City {
    /// Number of floors that failed to extrude across all buildings
    pub fn failed_floor_count(&self) -> usize {
        self.buildings.iter().map(|b| b.failures.len()).sum()
    }
}

/// Seeded city generator
#[derive(Debug, Clone)]
pub struct CityGenerator {
    config: CityConfig,
    planner: CityLayoutPlanner,
    decorations: DecorationManager,
}

impl CityGenerator {
    /// Create a generator with the built-in decorations
    pub fn new(config: CityConfig) -> Result<Self> {
        let registry = DecorationRegistry::with_kana_settings(config.kana.clone());
        Self::with_registry(config, registry)
    }

    /// Create a generator resolving façade decorations through `registry`
    pub fn with_registry(config: CityConfig, registry: DecorationRegistry) -> Result<Self> {
        config.validate()?;
        let decorations = DecorationManager::new(config.decorations.clone(), registry)?;
        Ok(Self {
            planner: CityLayoutPlanner::new(config.subdivision.clone()),
            config,
            decorations,
        })
    }

    /// Parse, validate and build a generator from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(CityConfig::from_json_str(json)?)
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Generate the city for `seed`
    pub fn generate(&self, seed: u64) -> City {
        let mut rng = random::seeded(seed);
        let config = &self.config;

        let area = Rect::from_center(0.0, 0.0, config.width, config.depth);
        let layout = self.planner.plan(area, &mut rng);
        let ground = ground_planes(&area, &layout, &config.materials);

        let mut buildings = Vec::with_capacity(layout.plots.len());
        let mut props = Vec::new();
        for plot in &layout.plots {
            let profile = profile_for_plot(&config.zones, &config.default_profile, plot);
            let controller = self.build_on_plot(plot, profile, &mut rng);
            self.spawn_plot_props(plot, controller.spec(), &mut rng, &mut props);
            buildings.extend(controller.into_building());
        }

        let city = City {
            layout,
            ground,
            buildings,
            props,
        };
        log::info!(
            "Generated city (seed {}): {} plots, {} roads, {} props, {} failed floors",
            seed,
            city.layout.plots.len(),
            city.layout.roads.len(),
            city.props.len(),
            city.failed_floor_count()
        );
        city
    }

    fn build_on_plot(
        &self,
        plot: &Rect,
        profile: &NeighborhoodProfile,
        rng: &mut dyn RngCore,
    ) -> BuildingController {
        let grid = self.config.building_grid_size;
        let snap = |extent: f64| (extent * profile.plot_fill_factor / grid).round().max(1.0) * grid;

        let width = snap(plot.width);
        let depth = snap(plot.height);
        let floors = random::range_u32(rng, profile.min_floors, profile.max_floors + 1);

        let generator = BuildingGenerator::new(&self.config.building, profile)
            .with_decorations(&self.decorations);
        let mut controller = BuildingController::new(BuildingSpec::rectangular(
            width,
            depth,
            floors,
            self.config.floor_height,
        ));
        controller.regenerate(&generator, plot_origin(plot), rng);
        controller
    }

    /// Props along the sidewalk midline around a building, facing the road
    fn spawn_plot_props(
        &self,
        plot: &Rect,
        spec: &BuildingSpec,
        rng: &mut dyn RngCore,
        props: &mut Vec<PrefabPlacement>,
    ) {
        let center = plot_origin(plot);
        let spacing = self.config.decoration_edge_spacing;
        let (hw, hd) = (spec.width / 2.0, spec.depth / 2.0);
        let margin_x = (plot.width - spec.width) / 2.0;
        let margin_z = (plot.height - spec.depth) / 2.0;

        let side_x = hw + margin_x / 2.0;
        let side_z = hd + margin_z / 2.0;

        for z in edge_steps(hd, spacing) {
            self.try_spawn_prop(center + Vector3::new(-side_x, 0.0, z), 90.0, rng, props);
            self.try_spawn_prop(center + Vector3::new(side_x, 0.0, z), -90.0, rng, props);
        }
        for x in edge_steps(hw, spacing) {
            self.try_spawn_prop(center + Vector3::new(x, 0.0, -side_z), 0.0, rng, props);
            self.try_spawn_prop(center + Vector3::new(x, 0.0, side_z), 180.0, rng, props);
        }
    }

    fn try_spawn_prop(
        &self,
        position: Point3<f64>,
        yaw: f64,
        rng: &mut dyn RngCore,
        props: &mut Vec<PrefabPlacement>,
    ) {
        if random::value(rng) >= self.config.decoration_spawn_chance {
            return;
        }
        let Some(prop) = random::choose(rng, &self.config.plot_decorations) else {
            return;
        };

        let [x, y, z] = prop.rotation_offset;
        props.push(PrefabPlacement {
            prefab: prop.prefab,
            position,
            rotation: euler_degrees(x, yaw + y, z),
        });
    }
}

/// Building origin at the plot centre
fn plot_origin(plot: &Rect) -> Point3<f64> {
    let (cx, cz) = plot.center();
    Point3::new(cx, 0.0, cz)
}

/// Offsets from `-half` to `half` inclusive, `spacing` apart
fn edge_steps(half: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let steps = (2.0 * half / spacing + 1e-9).floor() as usize;
    (0..=steps).map(move |i| -half + i as f64 * spacing)
}

/// Rotation from Euler angles in degrees, applied Z first, then X, then Y
pub fn euler_degrees(x: f64, y: f64, z: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), y.to_radians())
        * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), x.to_radians())
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), z.to_radians())
}
