// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! City, building and decoration configuration
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON document only
//! needs to name the values it changes. Call `validate()` (or load through
//! [`CityConfig::from_json_str`]) before handing a configuration to the
//! generators.

use crate::error::{ensure_ordered, ensure_positive, ensure_within, ConfigError, Result};
use crate::{CityZone, LightId, MaterialId, NeighborhoodProfile, PrefabId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Layout
// ============================================================================

/// Recursive splitting rule used by the layout planner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubdivisionStrategy {
    /// Split on size and aspect ratio, larger overshoot first
    #[default]
    Neighborhood,
    /// Split on size only
    Simple,
}

/// Plot size limits for the layout planner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubdivisionSettings {
    pub min_plot_width: f64,
    pub min_plot_depth: f64,
    pub max_plot_width: f64,
    pub max_plot_depth: f64,
    pub max_aspect_ratio: f64,
    pub road_width: f64,
    pub strategy: SubdivisionStrategy,
}

impl Default for SubdivisionSettings {
    fn default() -> Self {
        Self {
            min_plot_width: 10.0,
            min_plot_depth: 10.0,
            max_plot_width: 30.0,
            max_plot_depth: 30.0,
            max_aspect_ratio: 2.0,
            road_width: 4.0,
            strategy: SubdivisionStrategy::Neighborhood,
        }
    }
}

impl SubdivisionSettings {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("subdivision.min_plot_width", self.min_plot_width)?;
        ensure_positive("subdivision.min_plot_depth", self.min_plot_depth)?;
        ensure_ordered("subdivision.plot_width", self.min_plot_width, self.max_plot_width)?;
        ensure_ordered("subdivision.plot_depth", self.min_plot_depth, self.max_plot_depth)?;
        ensure_within("subdivision.max_aspect_ratio", self.max_aspect_ratio, 1.0, f64::MAX)?;
        ensure_within("subdivision.road_width", self.road_width, 0.0, f64::MAX)
    }
}

/// Prop placed on the sidewalk around a building
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlotDecorationConfig {
    pub prefab: PrefabId,
    /// Euler angles in degrees added to the outward-facing rotation
    pub rotation_offset: [f64; 3],
}

/// Materials for the flat ground layers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GroundMaterials {
    pub plot: Option<MaterialId>,
    pub road: Option<MaterialId>,
    pub road_line: Option<MaterialId>,
    pub fog: Option<MaterialId>,
}

// ============================================================================
// Roofs
// ============================================================================

/// Rooftop feature of tall buildings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoofStyle {
    /// Stack of shrinking boxes
    Pointy(PointyRoofSettings),
    /// Random antennas with warning lights
    AntennaCluster(AntennaSettings),
}

impl RoofStyle {
    pub fn validate(&self) -> Result<()> {
        match self {
            RoofStyle::Pointy(settings) => settings.validate(),
            RoofStyle::AntennaCluster(settings) => settings.validate(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointyRoofSettings {
    pub min_segments: u32,
    pub max_segments: u32,
    pub min_shrink_factor: f64,
    pub max_shrink_factor: f64,
    pub height_multiplier: f64,
    pub tile_size: f64,
    pub material: Option<MaterialId>,
}

impl Default for PointyRoofSettings {
    fn default() -> Self {
        Self {
            min_segments: 5,
            max_segments: 10,
            min_shrink_factor: 0.5,
            max_shrink_factor: 0.8,
            height_multiplier: 1.0,
            tile_size: 2.0,
            material: None,
        }
    }
}

impl PointyRoofSettings {
    pub fn validate(&self) -> Result<()> {
        ensure_ordered("pointy_roof.segments", self.min_segments, self.max_segments)?;
        ensure_ordered(
            "pointy_roof.shrink_factor",
            self.min_shrink_factor,
            self.max_shrink_factor,
        )?;
        ensure_positive("pointy_roof.height_multiplier", self.height_multiplier)?;
        ensure_positive("pointy_roof.tile_size", self.tile_size)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntennaSettings {
    pub max_antennas: u32,
    pub antenna_height: f64,
    pub antenna_radius: f64,
    pub tile_size: f64,
    pub antenna_material: Option<MaterialId>,
    pub anti_collision_material: Option<MaterialId>,
    pub anti_collision_sphere_radius: f64,
}

impl Default for AntennaSettings {
    fn default() -> Self {
        Self {
            max_antennas: 5,
            antenna_height: 10.0,
            antenna_radius: 0.2,
            tile_size: 2.0,
            antenna_material: None,
            anti_collision_material: None,
            anti_collision_sphere_radius: 3.0,
        }
    }
}

impl AntennaSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_antennas == 0 {
            return Err(ConfigError::invalid(
                "antenna.max_antennas",
                "must allow at least one antenna",
            ));
        }
        ensure_positive("antenna.antenna_height", self.antenna_height)?;
        ensure_positive("antenna.antenna_radius", self.antenna_radius)?;
        ensure_positive("antenna.tile_size", self.tile_size)
    }
}

// ============================================================================
// Buildings
// ============================================================================

/// Billboard prefab and the façade area it needs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillboardPrefab {
    pub prefab: PrefabId,
    pub width: f64,
    pub height: f64,
}

impl Default for BillboardPrefab {
    fn default() -> Self {
        Self {
            prefab: PrefabId::default(),
            width: 4.0,
            height: 8.0,
        }
    }
}

/// Side billboard assets
///
/// Materials and lights are paired by index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SideBillboardConfig {
    pub prefabs: Vec<BillboardPrefab>,
    pub materials: Vec<MaterialId>,
    pub lights: Vec<LightId>,
}

impl SideBillboardConfig {
    /// Check if every asset list is populated
    pub fn is_complete(&self) -> bool {
        !self.prefabs.is_empty() && !self.materials.is_empty() && !self.lights.is_empty()
    }
}

/// Per-building generation settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    /// World units per texture repeat on walls and caps
    pub tile_size: f64,
    /// Minimum floor count for roof features and floating billboards
    pub level_to_spawn_roofs: u32,

    pub floating_billboards: Vec<PrefabId>,
    /// Probability in [0, 1]
    pub billboard_spawn_chance: f64,
    pub billboard_vertical_offset_min: f64,
    pub billboard_vertical_offset_max: f64,

    pub side_billboards: SideBillboardConfig,
    pub side_billboard_count_min: u32,
    pub side_billboard_count_max: u32,
    pub side_billboard_min_floor: u32,
    pub side_billboard_max_floor_offset_from_top: u32,
    pub side_billboard_depth_offset: f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            tile_size: 2.0,
            level_to_spawn_roofs: 50,
            floating_billboards: Vec::new(),
            billboard_spawn_chance: 0.5,
            billboard_vertical_offset_min: 2.0,
            billboard_vertical_offset_max: 8.0,
            side_billboards: SideBillboardConfig::default(),
            side_billboard_count_min: 2,
            side_billboard_count_max: 3,
            side_billboard_min_floor: 3,
            side_billboard_max_floor_offset_from_top: 2,
            side_billboard_depth_offset: 0.1,
        }
    }
}

impl BuildingConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("building.tile_size", self.tile_size)?;
        ensure_within("building.billboard_spawn_chance", self.billboard_spawn_chance, 0.0, 1.0)?;
        ensure_ordered(
            "building.billboard_vertical_offset",
            self.billboard_vertical_offset_min,
            self.billboard_vertical_offset_max,
        )?;
        ensure_ordered(
            "building.side_billboard_count",
            self.side_billboard_count_min,
            self.side_billboard_count_max,
        )
    }
}

// ============================================================================
// Decorations
// ============================================================================

/// Façade decoration entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Registry key of the generator
    pub kind: String,
    pub prefab: Option<PrefabId>,
    /// Percent chance in [0, 100]
    pub spawn_chance: u32,
    pub possible_materials: Vec<MaterialId>,
    pub min_allowed_floor: u32,
    pub max_allowed_floor: u32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            kind: "kana_sign".to_string(),
            prefab: None,
            spawn_chance: 50,
            possible_materials: Vec::new(),
            min_allowed_floor: 2,
            max_allowed_floor: 100,
        }
    }
}

impl DecorationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.spawn_chance > 100 {
            return Err(ConfigError::invalid(
                "decoration.spawn_chance",
                format!("must be within [0, 100], got {}", self.spawn_chance),
            ));
        }
        ensure_ordered(
            "decoration.allowed_floor",
            self.min_allowed_floor,
            self.max_allowed_floor,
        )
    }

    /// Check if the decoration may be placed on `floor`
    #[inline]
    pub fn allows_floor(&self, floor: u32) -> bool {
        floor >= self.min_allowed_floor && floor <= self.max_allowed_floor
    }
}

/// Kana glyph drawn by the sign decoration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KanaGlyph {
    /// One of the concrete glyphs, picked per sign
    #[default]
    Random,
    Nu,
    Fu,
    A,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanaSettings {
    pub glyph: KanaGlyph,
    /// Extrusion depth of each stroke
    pub sign_height: f64,
    pub tile_size: f64,
}

impl Default for KanaSettings {
    fn default() -> Self {
        Self {
            glyph: KanaGlyph::Random,
            sign_height: 0.1,
            tile_size: 0.05,
        }
    }
}

impl KanaSettings {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("kana.sign_height", self.sign_height)?;
        ensure_positive("kana.tile_size", self.tile_size)
    }
}

// ============================================================================
// City
// ============================================================================

/// Complete description of a generated city
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub width: f64,
    pub depth: f64,
    pub subdivision: SubdivisionSettings,

    /// Building sizes are rounded to multiples of this
    pub building_grid_size: f64,
    pub floor_height: f64,

    pub plot_decorations: Vec<PlotDecorationConfig>,
    /// Probability in [0, 1] per sidewalk slot
    pub decoration_spawn_chance: f64,
    pub decoration_edge_spacing: f64,

    pub zones: Vec<CityZone>,
    pub default_profile: NeighborhoodProfile,
    pub materials: GroundMaterials,

    pub building: BuildingConfig,
    pub decorations: Vec<DecorationConfig>,
    pub kana: KanaSettings,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            subdivision: SubdivisionSettings::default(),
            building_grid_size: 1.0,
            floor_height: 2.0,
            plot_decorations: Vec::new(),
            decoration_spawn_chance: 0.3,
            decoration_edge_spacing: 4.0,
            zones: Vec::new(),
            default_profile: NeighborhoodProfile::default(),
            materials: GroundMaterials::default(),
            building: BuildingConfig::default(),
            decorations: Vec::new(),
            kana: KanaSettings::default(),
        }
    }
}

impl CityConfig {
    /// Parse and validate a JSON city description
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CityConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("city.width", self.width)?;
        ensure_positive("city.depth", self.depth)?;
        ensure_positive("city.building_grid_size", self.building_grid_size)?;
        ensure_positive("city.floor_height", self.floor_height)?;
        ensure_within("city.decoration_spawn_chance", self.decoration_spawn_chance, 0.0, 1.0)?;
        ensure_positive("city.decoration_edge_spacing", self.decoration_edge_spacing)?;

        self.subdivision.validate()?;
        self.default_profile.validate()?;
        for zone in &self.zones {
            zone.profile.validate()?;
        }
        self.building.validate()?;
        for decoration in &self.decorations {
            decoration.validate()?;
        }
        self.kana.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CityConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = CityConfig::from_json_str(
            r#"{
                "width": 200.0,
                "subdivision": { "strategy": "simple", "road_width": 6.0 },
                "building": { "level_to_spawn_roofs": 12 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.width, 200.0);
        assert_eq!(config.depth, 100.0);
        assert_eq!(config.subdivision.strategy, SubdivisionStrategy::Simple);
        assert_eq!(config.subdivision.road_width, 6.0);
        assert_eq!(config.subdivision.max_plot_width, 30.0);
        assert_eq!(config.building.level_to_spawn_roofs, 12);
        assert_eq!(config.building.tile_size, 2.0);
    }

    #[test]
    fn test_roof_style_tagging() {
        let styles: Vec<RoofStyle> = serde_json::from_str(
            r#"[
                { "type": "pointy", "max_segments": 6 },
                { "type": "antenna_cluster", "antenna_material": 4 }
            ]"#,
        )
        .unwrap();

        match &styles[0] {
            RoofStyle::Pointy(settings) => {
                assert_eq!(settings.max_segments, 6);
                assert_eq!(settings.min_segments, 5);
            }
            other => panic!("unexpected style {other:?}"),
        }
        match &styles[1] {
            RoofStyle::AntennaCluster(settings) => {
                assert_eq!(settings.antenna_material, Some(MaterialId(4)));
            }
            other => panic!("unexpected style {other:?}"),
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = CityConfig::from_json_str(r#"{ "floor_height": 0.0 }"#).unwrap_err();
        assert_eq!(err.field(), Some("city.floor_height"));

        let err = CityConfig::from_json_str(
            r#"{ "decorations": [ { "spawn_chance": 150 } ] }"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("decoration.spawn_chance"));
    }

    #[test]
    fn test_malformed_json() {
        let err = CityConfig::from_json_str("{ width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = CityConfig::default();
        config.default_profile.roof_styles = vec![RoofStyle::Pointy(PointyRoofSettings::default())];
        let json = config.to_json_string().unwrap();
        assert_eq!(CityConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_decoration_floor_range() {
        let decoration = DecorationConfig::default();
        assert!(!decoration.allows_floor(1));
        assert!(decoration.allows_floor(2));
        assert!(decoration.allows_floor(100));
        assert!(!decoration.allows_floor(101));
    }

    #[test]
    fn test_side_billboards_completeness() {
        let mut side = SideBillboardConfig {
            prefabs: vec![BillboardPrefab::default()],
            materials: vec![MaterialId(1)],
            lights: Vec::new(),
        };
        assert!(!side.is_complete());
        side.lights.push(LightId(1));
        assert!(side.is_complete());
    }
}
