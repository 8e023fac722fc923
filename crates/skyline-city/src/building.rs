// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building generation
//!
//! A building is a stack of extruded floors sharing one footprint, optionally
//! topped with a roof feature and a floating billboard, with decorations and
//! billboards attached to its façades. All placements except decorations are
//! relative to the building origin; decorations are placed in world space.

use crate::decoration::{DecorationInstance, DecorationManager};
use crate::random;
use crate::roof::{generate_roof, Roof};
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};
use rand::RngCore;
use skyline_geometry::{extrude_footprint, Footprint, Mesh};
use skyline_model::{BuildingConfig, LightId, MaterialId, NeighborhoodProfile, PrefabId};
use std::fmt;

/// Outward push of façade decorations off the wall
const DECORATION_WALL_OFFSET: f64 = 0.01;
/// Lowest floor that receives façade decorations
const FIRST_DECORATED_FLOOR: i64 = 2;
/// Floors at the top left without façade decorations
const UNDECORATED_TOP_FLOORS: i64 = 3;

/// Building façade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// +Z
    Front,
    /// -Z
    Back,
    /// -X
    Left,
    /// +X
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Front, Side::Back, Side::Left, Side::Right];

    /// Side for a random index in `[0, 4)`
    pub fn from_index(index: i64) -> Self {
        match index.rem_euclid(4) {
            0 => Side::Front,
            1 => Side::Back,
            2 => Side::Left,
            _ => Side::Right,
        }
    }

    /// Yaw in degrees that makes an object face away from this side
    pub fn yaw_degrees(self) -> f64 {
        match self {
            Side::Front => 0.0,
            Side::Back => 180.0,
            Side::Left => -90.0,
            Side::Right => 90.0,
        }
    }

    pub fn rotation(self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw_degrees().to_radians())
    }

    /// Length of the façade along its horizontal axis
    pub fn extent(self, width: f64, depth: f64) -> f64 {
        match self {
            Side::Front | Side::Back => width,
            Side::Left | Side::Right => depth,
        }
    }

    /// Building-local point on this façade
    ///
    /// `along` runs along the façade, `push` moves away from the wall.
    pub fn facade_point(
        self,
        width: f64,
        depth: f64,
        along: f64,
        y: f64,
        push: f64,
    ) -> Point3<f64> {
        let (hw, hd) = (width / 2.0, depth / 2.0);
        match self {
            Side::Front => Point3::new(along, y, hd + push),
            Side::Back => Point3::new(along, y, -hd - push),
            Side::Left => Point3::new(-hw - push, y, along),
            Side::Right => Point3::new(hw + push, y, along),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Building dimensions and footprint
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingSpec {
    /// Bounding width used by roofs and façade placement
    pub width: f64,
    /// Bounding depth used by roofs and façade placement
    pub depth: f64,
    pub floors: u32,
    pub floor_height: f64,
    /// Outline extruded for every floor
    pub footprint: Footprint,
}

impl BuildingSpec {
    /// Rectangular building centred on its origin
    pub fn rectangular(width: f64, depth: f64, floors: u32, floor_height: f64) -> Self {
        Self {
            width,
            depth,
            floors,
            floor_height,
            footprint: Footprint::rectangle(width, depth),
        }
    }

    /// Building with a custom outline
    pub fn with_footprint(
        width: f64,
        depth: f64,
        floors: u32,
        floor_height: f64,
        footprint: Footprint,
    ) -> Self {
        Self {
            width,
            depth,
            floors,
            floor_height,
            footprint,
        }
    }

    /// Total height of all floors
    pub fn height(&self) -> f64 {
        self.floors as f64 * self.floor_height
    }
}

/// One extruded floor
#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub index: u32,
    /// Height of the floor base above the building origin
    pub elevation: f64,
    pub mesh: Mesh,
    /// Wall and cap materials, in submesh order
    pub materials: [Option<MaterialId>; 2],
}

impl Floor {
    /// Building-local transform of the floor mesh
    pub fn transform(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(0.0, self.elevation, 0.0))
    }
}

/// Floor that could not be extruded
#[derive(Debug, Clone, PartialEq)]
pub struct FloorFailure {
    pub floor: u32,
    pub error: skyline_geometry::Error,
}

impl fmt::Display for FloorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "floor {}: {}", self.floor, self.error)
    }
}

/// Placed prefab instance
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabPlacement {
    pub prefab: PrefabId,
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

/// Billboard attached to a façade, lit by its paired light
#[derive(Debug, Clone, PartialEq)]
pub struct SideBillboard {
    pub prefab: PrefabId,
    pub floor: u32,
    pub side: Side,
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub material: MaterialId,
    pub light: LightId,
}

impl SideBillboard {
    pub fn name(&self) -> String {
        format!("SideBillboard_Floor_{}_Side_{}", self.floor, self.side.index())
    }
}

/// Generated building
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    /// World position of the footprint origin
    pub origin: Point3<f64>,
    pub height: f64,
    pub floors: Vec<Floor>,
    pub failures: Vec<FloorFailure>,
    pub roof: Option<Roof>,
    pub floating_billboard: Option<PrefabPlacement>,
    /// World-space façade decorations
    pub decorations: Vec<DecorationInstance>,
    pub side_billboards: Vec<SideBillboard>,
}

impl Building {
    /// Check if every floor was extruded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Building-local to world transform
    pub fn local_to_world(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.origin.coords)
    }
}

/// Generates buildings for one neighborhood profile
#[derive(Debug, Clone, Copy)]
pub struct BuildingGenerator<'a> {
    config: &'a BuildingConfig,
    profile: &'a NeighborhoodProfile,
    decorations: Option<&'a DecorationManager>,
}

impl<'a> BuildingGenerator<'a> {
    pub fn new(config: &'a BuildingConfig, profile: &'a NeighborhoodProfile) -> Self {
        Self {
            config,
            profile,
            decorations: None,
        }
    }

    /// Attach the façade decoration manager
    pub fn with_decorations(mut self, manager: &'a DecorationManager) -> Self {
        self.decorations = Some(manager);
        self
    }

    pub fn config(&self) -> &BuildingConfig {
        self.config
    }

    pub fn profile(&self) -> &NeighborhoodProfile {
        self.profile
    }

    /// Generate a building at `origin`
    ///
    /// Floors that fail to extrude are recorded in [`Building::failures`]
    /// and the rest of the building is still generated.
    pub fn generate(
        &self,
        spec: &BuildingSpec,
        origin: Point3<f64>,
        rng: &mut dyn RngCore,
    ) -> Building {
        if self.decorations.is_none() {
            log::warn!("Building at {origin} generated without a decoration manager");
        }

        let mut building = Building {
            origin,
            height: spec.height(),
            floors: Vec::with_capacity(spec.floors as usize),
            failures: Vec::new(),
            roof: None,
            floating_billboard: None,
            decorations: Vec::new(),
            side_billboards: Vec::new(),
        };

        self.generate_floors(spec, rng, &mut building);
        building.roof = self.generate_roof(spec, origin, rng);
        building.floating_billboard = self.generate_floating_billboard(spec, rng);
        building.decorations = self.generate_decorations(spec, origin, rng);
        building.side_billboards = self.generate_side_billboards(spec, rng);

        log::debug!(
            "Generated building at {}: {} floors, {} failed, {} decorations, {} side billboards",
            origin,
            building.floors.len(),
            building.failures.len(),
            building.decorations.len(),
            building.side_billboards.len()
        );

        building
    }

    fn generate_floors(&self, spec: &BuildingSpec, rng: &mut dyn RngCore, building: &mut Building) {
        for index in 0..spec.floors {
            let wall = random::choose(rng, &self.profile.wall_materials).copied();
            let elevation = index as f64 * spec.floor_height;

            match extrude_footprint(&spec.footprint, spec.floor_height, self.config.tile_size) {
                Ok(mesh) => building.floors.push(Floor {
                    index,
                    elevation,
                    mesh,
                    materials: [wall, self.profile.roof_material],
                }),
                Err(error) => {
                    log::error!("Failed to extrude floor {index} at {}: {error}", building.origin);
                    building.failures.push(FloorFailure { floor: index, error });
                }
            }
        }
    }

    fn generate_roof(
        &self,
        spec: &BuildingSpec,
        origin: Point3<f64>,
        rng: &mut dyn RngCore,
    ) -> Option<Roof> {
        if self.profile.roof_styles.is_empty() || spec.floors < self.config.level_to_spawn_roofs {
            return None;
        }

        let style = random::choose(rng, &self.profile.roof_styles)?;
        let elevation = spec.height();
        let roof_to_world =
            Matrix4::new_translation(&(origin.coords + Vector3::new(0.0, elevation, 0.0)));
        Some(generate_roof(
            style,
            spec.width,
            spec.depth,
            elevation,
            &roof_to_world,
            rng,
        ))
    }

    fn generate_floating_billboard(
        &self,
        spec: &BuildingSpec,
        rng: &mut dyn RngCore,
    ) -> Option<PrefabPlacement> {
        let config = self.config;
        if spec.floors < config.level_to_spawn_roofs
            || config.floating_billboards.is_empty()
            || random::value(rng) >= config.billboard_spawn_chance
        {
            return None;
        }

        let prefab = *random::choose(rng, &config.floating_billboards)?;
        let offset = random::range_f64(
            rng,
            config.billboard_vertical_offset_min,
            config.billboard_vertical_offset_max,
        );
        Some(PrefabPlacement {
            prefab,
            position: Point3::new(0.0, spec.height() + offset, 0.0),
            rotation: UnitQuaternion::identity(),
        })
    }

    fn generate_decorations(
        &self,
        spec: &BuildingSpec,
        origin: Point3<f64>,
        rng: &mut dyn RngCore,
    ) -> Vec<DecorationInstance> {
        let Some(manager) = self.decorations else {
            return Vec::new();
        };

        let mut placed = Vec::new();
        let last = spec.floors as i64 - UNDECORATED_TOP_FLOORS;
        for floor in FIRST_DECORATED_FLOOR..=last {
            let side = Side::from_index(random::range_i64(rng, 0, 4));
            let y = floor as f64 * spec.floor_height + spec.floor_height / 2.0;
            let local = side.facade_point(spec.width, spec.depth, 0.0, y, DECORATION_WALL_OFFSET);
            let position = origin + local.coords;

            match manager.try_place(position, side.rotation(), floor as u32, rng) {
                Ok(Some(instance)) => placed.push(instance),
                Ok(None) => {}
                Err(e) => log::warn!("Decoration on floor {floor} at {position} failed: {e}"),
            }
        }
        placed
    }

    fn generate_side_billboards(
        &self,
        spec: &BuildingSpec,
        rng: &mut dyn RngCore,
    ) -> Vec<SideBillboard> {
        let config = self.config;
        let assets = &config.side_billboards;
        if !assets.is_complete() {
            let unconfigured = assets.prefabs.is_empty()
                && assets.materials.is_empty()
                && assets.lights.is_empty();
            if !unconfigured {
                log::warn!("Side billboards need prefabs, materials and lights; skipping");
            }
            return Vec::new();
        }

        let count = random::range_u32(
            rng,
            config.side_billboard_count_min,
            config.side_billboard_count_max + 1,
        );
        let pairs = assets.materials.len().min(assets.lights.len());
        let mut billboards = Vec::new();

        for _ in 0..count {
            let floor = random::range_i64(
                rng,
                config.side_billboard_min_floor as i64,
                spec.floors as i64 - config.side_billboard_max_floor_offset_from_top as i64,
            );
            let side = Side::from_index(random::range_i64(rng, 0, 4));
            let Some(prefab) = random::choose(rng, &assets.prefabs) else {
                break;
            };

            let remaining = (spec.floors as i64 - floor) as f64 * spec.floor_height;
            if remaining < prefab.height {
                continue;
            }
            let extent = side.extent(spec.width, spec.depth);
            if extent < prefab.width {
                continue;
            }

            let max_offset = (extent - prefab.width) / 2.0;
            let offset = random::range_f64(rng, -max_offset, max_offset);
            let y = floor as f64 * spec.floor_height + spec.floor_height / 2.0;
            let position = side.facade_point(
                spec.width,
                spec.depth,
                offset,
                y,
                config.side_billboard_depth_offset,
            );
            let pair = random::range_i64(rng, 0, pairs as i64) as usize;

            billboards.push(SideBillboard {
                prefab: prefab.prefab,
                floor: floor as u32,
                side,
                position,
                rotation: side.rotation(),
                material: assets.materials[pair],
                light: assets.lights[pair],
            });
        }
        billboards
    }
}

/// Owns a building description and its current generated building
#[derive(Debug, Clone)]
pub struct BuildingController {
    spec: BuildingSpec,
    building: Option<Building>,
}

impl BuildingController {
    pub fn new(spec: BuildingSpec) -> Self {
        Self {
            spec,
            building: None,
        }
    }

    pub fn spec(&self) -> &BuildingSpec {
        &self.spec
    }

    /// Replace the description, dropping the current building
    pub fn set_spec(&mut self, spec: BuildingSpec) {
        self.spec = spec;
        self.building = None;
    }

    pub fn building(&self) -> Option<&Building> {
        self.building.as_ref()
    }

    /// Drop the current building
    pub fn clear(&mut self) {
        self.building = None;
    }

    /// Drop the current building and generate a new one
    pub fn regenerate(
        &mut self,
        generator: &BuildingGenerator<'_>,
        origin: Point3<f64>,
        rng: &mut dyn RngCore,
    ) -> &Building {
        self.clear();
        let building = generator.generate(&self.spec, origin, rng);
        self.building.insert(building)
    }

    /// Take ownership of the current building
    pub fn into_building(self) -> Option<Building> {
        self.building
    }
}
