// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! City layout planning
//!
//! Recursively splits the city rectangle into building plots separated by
//! road corridors. Each split picks a random offset that leaves at least the
//! minimum plot size plus half a road on both sides.

use crate::random;
use rand::RngCore;
use skyline_model::{GroundMaterials, MaterialId, Rect, SubdivisionSettings, SubdivisionStrategy};

/// Elevation of the fog plane above the plots
pub const FOG_ELEVATION: f64 = 0.01;
/// Elevation of road surfaces
pub const ROAD_ELEVATION: f64 = -0.01;
/// Elevation of road centre lines
pub const ROAD_LINE_ELEVATION: f64 = -0.005;
/// Width of a road centre line
pub const ROAD_LINE_WIDTH: f64 = 0.1;

/// Plots and roads produced by one planning pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub plots: Vec<Rect>,
    pub roads: Vec<Rect>,
}

/// Split axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Split {
    /// Cut across depth, producing a lower and an upper part
    Horizontal,
    /// Cut across width, producing a left and a right part
    Vertical,
}

/// Recursive plot subdivision
#[derive(Debug, Clone)]
pub struct CityLayoutPlanner {
    settings: SubdivisionSettings,
}

impl CityLayoutPlanner {
    pub fn new(settings: SubdivisionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SubdivisionSettings {
        &self.settings
    }

    /// Subdivide `area` into plots and roads
    pub fn plan(&self, area: Rect, rng: &mut dyn RngCore) -> Layout {
        let mut layout = Layout::default();
        self.subdivide(area, rng, &mut layout);

        log::debug!(
            "Planned {} plots and {} roads over {}x{}",
            layout.plots.len(),
            layout.roads.len(),
            area.width,
            area.height
        );
        layout
    }

    fn subdivide(&self, area: Rect, rng: &mut dyn RngCore, layout: &mut Layout) {
        let split = match self.settings.strategy {
            SubdivisionStrategy::Neighborhood => self.neighborhood_split(&area),
            SubdivisionStrategy::Simple => self.simple_split(&area),
        };

        let Some(split) = split else {
            layout.plots.push(area);
            return;
        };

        let s = &self.settings;
        let half_road = s.road_width / 2.0;

        match split {
            Split::Horizontal => {
                let min_split = s.min_plot_depth + half_road;
                let max_split = area.height - s.min_plot_depth - half_road;
                if max_split <= min_split {
                    layout.plots.push(area);
                    return;
                }

                let split_y = random::range_f64(rng, min_split, max_split);
                let bottom = Rect::new(area.x, area.y, area.width, split_y - half_road);
                let top = Rect::new(
                    area.x,
                    area.y + split_y + half_road,
                    area.width,
                    area.height - split_y - half_road,
                );
                layout.roads.push(Rect::new(
                    area.x,
                    area.y + split_y - half_road,
                    area.width,
                    s.road_width,
                ));

                self.subdivide(bottom, rng, layout);
                self.subdivide(top, rng, layout);
            }
            Split::Vertical => {
                let min_split = s.min_plot_width + half_road;
                let max_split = area.width - s.min_plot_width - half_road;
                if max_split <= min_split {
                    layout.plots.push(area);
                    return;
                }

                let split_x = random::range_f64(rng, min_split, max_split);
                let left = Rect::new(area.x, area.y, split_x - half_road, area.height);
                let right = Rect::new(
                    area.x + split_x + half_road,
                    area.y,
                    area.width - split_x - half_road,
                    area.height,
                );
                layout.roads.push(Rect::new(
                    area.x + split_x - half_road,
                    area.y,
                    s.road_width,
                    area.height,
                ));

                self.subdivide(left, rng, layout);
                self.subdivide(right, rng, layout);
            }
        }
    }

    /// Split on size and aspect ratio, `None` when the area is a valid plot
    fn neighborhood_split(&self, area: &Rect) -> Option<Split> {
        let s = &self.settings;
        let width_ok = area.width <= s.max_plot_width;
        let depth_ok = area.height <= s.max_plot_depth;
        let ratio_ok = area.aspect_ratio() <= s.max_aspect_ratio;

        if width_ok && depth_ok && ratio_ok {
            return None;
        }

        let width_overshoot = area.width - s.max_plot_width;
        let depth_overshoot = area.height - s.max_plot_depth;

        let horizontal = match (width_ok, depth_ok) {
            (false, false) => depth_overshoot >= width_overshoot,
            (false, true) => false,
            (true, false) => true,
            (true, true) => area.height > area.width,
        };
        Some(if horizontal { Split::Horizontal } else { Split::Vertical })
    }

    /// Split on size only, `None` when the area is a valid plot
    fn simple_split(&self, area: &Rect) -> Option<Split> {
        let s = &self.settings;
        let too_wide = area.width > s.max_plot_width;
        let too_deep = area.height > s.max_plot_depth;

        if !too_wide && !too_deep {
            return None;
        }

        let horizontal = if too_wide && too_deep {
            area.width < area.height
        } else {
            area.height > area.width
        };
        Some(if horizontal { Split::Horizontal } else { Split::Vertical })
    }
}

/// Centre line marking of a road, running along its long axis
pub fn road_marking(road: &Rect) -> Rect {
    let (cx, cy) = road.center();
    if road.width < road.height {
        Rect::from_center(cx, cy, ROAD_LINE_WIDTH, road.height)
    } else {
        Rect::from_center(cx, cy, road.width, ROAD_LINE_WIDTH)
    }
}

/// Kind of flat ground layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroundKind {
    Plot,
    Road,
    RoadLine,
    Fog,
}

/// Flat horizontal quad at a fixed elevation
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPlane {
    pub kind: GroundKind,
    pub rect: Rect,
    pub elevation: f64,
    pub material: Option<MaterialId>,
}

/// Ground layers for a planned city: fog, plots, then each road with its line
pub fn ground_planes(
    city: &Rect,
    layout: &Layout,
    materials: &GroundMaterials,
) -> Vec<GroundPlane> {
    let mut planes = Vec::with_capacity(1 + layout.plots.len() + 2 * layout.roads.len());

    planes.push(GroundPlane {
        kind: GroundKind::Fog,
        rect: *city,
        elevation: FOG_ELEVATION,
        material: materials.fog,
    });

    planes.extend(layout.plots.iter().map(|plot| GroundPlane {
        kind: GroundKind::Plot,
        rect: *plot,
        elevation: 0.0,
        material: materials.plot,
    }));

    for road in &layout.roads {
        planes.push(GroundPlane {
            kind: GroundKind::Road,
            rect: *road,
            elevation: ROAD_ELEVATION,
            material: materials.road,
        });
        planes.push(GroundPlane {
            kind: GroundKind::RoadLine,
            rect: road_marking(road),
            elevation: ROAD_LINE_ELEVATION,
            material: materials.road_line,
        });
    }

    planes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn city() -> Rect {
        Rect::from_center(0.0, 0.0, 100.0, 100.0)
    }

    fn plan(strategy: SubdivisionStrategy, seed: u64) -> Layout {
        let planner = CityLayoutPlanner::new(SubdivisionSettings {
            strategy,
            ..Default::default()
        });
        planner.plan(city(), &mut random::seeded(seed))
    }

    fn covered_area(layout: &Layout) -> f64 {
        layout.plots.iter().chain(&layout.roads).map(Rect::area).sum()
    }

    #[test]
    fn test_neighborhood_plots_within_limits() {
        let settings = SubdivisionSettings::default();
        for seed in 0..8 {
            let layout = plan(SubdivisionStrategy::Neighborhood, seed);
            assert!(!layout.plots.is_empty());
            for plot in &layout.plots {
                assert!(plot.width >= settings.min_plot_width - 1e-9);
                assert!(plot.height >= settings.min_plot_depth - 1e-9);
            }
        }
    }

    #[test]
    fn test_plots_and_roads_tile_the_city() {
        for strategy in [SubdivisionStrategy::Neighborhood, SubdivisionStrategy::Simple] {
            let layout = plan(strategy, 11);
            assert_relative_eq!(covered_area(&layout), city().area(), epsilon = 1e-6);
            assert_eq!(layout.roads.len(), layout.plots.len() - 1);
        }
    }

    #[test]
    fn test_plots_do_not_overlap() {
        let layout = plan(SubdivisionStrategy::Neighborhood, 5);
        let all: Vec<&Rect> = layout.plots.iter().chain(&layout.roads).collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                let dx = a.max_x().min(b.max_x()) - a.x.max(b.x);
                let dy = a.max_y().min(b.max_y()) - a.y.max(b.y);
                let shared = dx.max(0.0) * dy.max(0.0);
                assert!(shared < 1e-9, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        assert_eq!(
            plan(SubdivisionStrategy::Neighborhood, 99),
            plan(SubdivisionStrategy::Neighborhood, 99)
        );
    }

    #[test]
    fn test_small_area_is_single_plot() {
        let planner = CityLayoutPlanner::new(SubdivisionSettings::default());
        let area = Rect::new(0.0, 0.0, 20.0, 15.0);
        let layout = planner.plan(area, &mut random::seeded(0));
        assert_eq!(layout.plots, vec![area]);
        assert!(layout.roads.is_empty());
    }

    #[test]
    fn test_unsplittable_area_becomes_plot() {
        // Too wide, but a split would leave less than the minimum width
        let planner = CityLayoutPlanner::new(SubdivisionSettings {
            max_plot_width: 15.0,
            ..Default::default()
        });
        let area = Rect::new(0.0, 0.0, 22.0, 12.0);
        let layout = planner.plan(area, &mut random::seeded(0));
        assert_eq!(layout.plots, vec![area]);
    }

    #[test]
    fn test_neighborhood_splits_narrow_strips() {
        // Within size limits but 3:1, so it is cut across its long side
        let planner = CityLayoutPlanner::new(SubdivisionSettings {
            max_plot_width: 100.0,
            max_plot_depth: 100.0,
            ..Default::default()
        });
        let layout = planner.plan(Rect::new(0.0, 0.0, 30.0, 90.0), &mut random::seeded(2));
        assert!(layout.plots.len() >= 2);
        assert_eq!(layout.roads[0].width, 30.0);
        assert_eq!(layout.roads[0].height, 4.0);

        // The simple strategy ignores aspect ratio
        let simple = CityLayoutPlanner::new(SubdivisionSettings {
            max_plot_width: 100.0,
            max_plot_depth: 100.0,
            strategy: SubdivisionStrategy::Simple,
            ..Default::default()
        });
        let layout = simple.plan(Rect::new(0.0, 0.0, 30.0, 90.0), &mut random::seeded(2));
        assert_eq!(layout.plots.len(), 1);
    }

    #[test]
    fn test_road_marking_follows_long_axis() {
        let vertical = Rect::new(10.0, 0.0, 4.0, 50.0);
        let line = road_marking(&vertical);
        assert_relative_eq!(line.width, ROAD_LINE_WIDTH, epsilon = 1e-9);
        assert_relative_eq!(line.height, 50.0);
        assert_relative_eq!(line.center().0, 12.0, epsilon = 1e-9);

        let horizontal = Rect::new(0.0, 10.0, 50.0, 4.0);
        assert_relative_eq!(road_marking(&horizontal).height, ROAD_LINE_WIDTH, epsilon = 1e-9);
    }

    #[test]
    fn test_ground_planes() {
        let layout = plan(SubdivisionStrategy::Neighborhood, 3);
        let materials = GroundMaterials {
            road: Some(MaterialId(2)),
            ..Default::default()
        };
        let planes = ground_planes(&city(), &layout, &materials);

        assert_eq!(planes.len(), 1 + layout.plots.len() + 2 * layout.roads.len());
        assert_eq!(planes[0].kind, GroundKind::Fog);
        assert_eq!(planes[0].elevation, FOG_ELEVATION);
        assert!(planes
            .iter()
            .filter(|p| p.kind == GroundKind::Road)
            .all(|p| p.material == Some(MaterialId(2)) && p.elevation == ROAD_ELEVATION));
    }
}
