// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Neighborhood profiles and city zones

use crate::config::RoofStyle;
use crate::error::{ensure_ordered, ensure_positive, ensure_within, Result};
use crate::{Color, MaterialId, Rect};
use serde::{Deserialize, Serialize};

/// Building and plot parameters for one kind of neighborhood
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodProfile {
    pub name: String,

    pub min_floors: u32,
    pub max_floors: u32,
    /// Share of the plot the building may occupy, in (0, 1]
    pub plot_fill_factor: f64,

    pub min_plot_width: f64,
    pub max_plot_width: f64,
    pub min_plot_depth: f64,
    pub max_plot_depth: f64,
    pub max_aspect_ratio: f64,

    pub wall_materials: Vec<MaterialId>,
    pub roof_material: Option<MaterialId>,
    /// Rooftop features, one is picked per eligible building
    pub roof_styles: Vec<RoofStyle>,

    /// Colour used by editors to draw the zone
    pub zone_color: Color,
}

impl Default for NeighborhoodProfile {
    fn default() -> Self {
        Self {
            name: "Default Neighborhood".to_string(),
            min_floors: 5,
            max_floors: 15,
            plot_fill_factor: 0.8,
            min_plot_width: 10.0,
            max_plot_width: 30.0,
            min_plot_depth: 10.0,
            max_plot_depth: 30.0,
            max_aspect_ratio: 2.0,
            wall_materials: Vec::new(),
            roof_material: None,
            roof_styles: Vec::new(),
            zone_color: Color::WHITE,
        }
    }
}

impl NeighborhoodProfile {
    pub fn validate(&self) -> Result<()> {
        ensure_ordered("profile.floors", self.min_floors, self.max_floors)?;
        ensure_within("profile.plot_fill_factor", self.plot_fill_factor, f64::MIN_POSITIVE, 1.0)?;
        ensure_positive("profile.min_plot_width", self.min_plot_width)?;
        ensure_positive("profile.min_plot_depth", self.min_plot_depth)?;
        ensure_ordered("profile.plot_width", self.min_plot_width, self.max_plot_width)?;
        ensure_ordered("profile.plot_depth", self.min_plot_depth, self.max_plot_depth)?;
        ensure_within("profile.max_aspect_ratio", self.max_aspect_ratio, 1.0, f64::MAX)?;
        for style in &self.roof_styles {
            style.validate()?;
        }
        Ok(())
    }
}

/// Rectangular area of the city that uses a specific profile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityZone {
    /// Centre on the ground plane (x, z)
    pub center: [f64; 2],
    /// Extent along x and z
    pub size: [f64; 2],
    pub profile: NeighborhoodProfile,
}

impl Default for CityZone {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            size: [50.0, 50.0],
            profile: NeighborhoodProfile::default(),
        }
    }
}

impl CityZone {
    /// World-space bounds of the zone
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center[0], self.center[1], self.size[0], self.size[1])
    }
}

/// Profile of the first zone containing the plot centre, else `default`
pub fn profile_for_plot<'a>(
    zones: &'a [CityZone],
    default: &'a NeighborhoodProfile,
    plot: &Rect,
) -> &'a NeighborhoodProfile {
    let (cx, cy) = plot.center();
    zones
        .iter()
        .find(|zone| zone.rect().contains(cx, cy))
        .map(|zone| &zone.profile)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str, center: [f64; 2]) -> CityZone {
        CityZone {
            center,
            profile: NeighborhoodProfile {
                name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_zone_rect() {
        let zone = zone("downtown", [10.0, -5.0]);
        assert_eq!(zone.rect(), Rect::new(-15.0, -30.0, 50.0, 50.0));
    }

    #[test]
    fn test_first_matching_zone_wins() {
        let zones = vec![zone("a", [0.0, 0.0]), zone("b", [10.0, 0.0])];
        let default = NeighborhoodProfile::default();

        let plot = Rect::from_center(12.0, 0.0, 4.0, 4.0);
        assert_eq!(profile_for_plot(&zones, &default, &plot).name, "a");

        let plot = Rect::from_center(30.0, 0.0, 4.0, 4.0);
        assert_eq!(profile_for_plot(&zones, &default, &plot).name, "b");

        let plot = Rect::from_center(100.0, 100.0, 4.0, 4.0);
        assert_eq!(
            profile_for_plot(&zones, &default, &plot).name,
            "Default Neighborhood"
        );
    }

    #[test]
    fn test_profile_validation() {
        assert!(NeighborhoodProfile::default().validate().is_ok());

        let inverted = NeighborhoodProfile {
            min_floors: 10,
            max_floors: 2,
            ..Default::default()
        };
        let err = inverted.validate().unwrap_err();
        assert_eq!(err.field(), Some("profile.floors"));

        let overfilled = NeighborhoodProfile {
            plot_fill_factor: 1.5,
            ..Default::default()
        };
        assert!(overfilled.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let profile: NeighborhoodProfile =
            serde_json::from_str(r#"{"name":"suburb","max_floors":4,"min_floors":2}"#).unwrap();
        assert_eq!(profile.name, "suburb");
        assert_eq!(profile.plot_fill_factor, 0.8);
        assert_eq!(profile.zone_color, Color::WHITE);
    }
}
