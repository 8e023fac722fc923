// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end city generation

use approx::assert_relative_eq;
use skyline_city::{
    BuildingController, BuildingGenerator, BuildingSpec, CityGenerator, DecorationManager,
    DecorationRegistry, GroundKind, RoofKind,
};
use skyline_geometry::{
    extrude_footprint, project_planar_uvs, Footprint, PlanarUvOptions, Point2, Point3, Submesh,
};
use skyline_model::{
    AntennaSettings, BuildingConfig, CityConfig, CityZone, DecorationConfig, MaterialId,
    NeighborhoodProfile, PointyRoofSettings, RoofStyle, SubdivisionStrategy,
};

fn downtown() -> CityConfig {
    let towers = NeighborhoodProfile {
        name: "Towers".to_string(),
        min_floors: 50,
        max_floors: 60,
        wall_materials: vec![MaterialId(1), MaterialId(2)],
        roof_material: Some(MaterialId(3)),
        roof_styles: vec![
            RoofStyle::Pointy(PointyRoofSettings::default()),
            RoofStyle::AntennaCluster(AntennaSettings::default()),
        ],
        ..Default::default()
    };

    CityConfig {
        width: 120.0,
        depth: 120.0,
        zones: vec![CityZone {
            center: [0.0, 0.0],
            size: [60.0, 60.0],
            profile: towers,
        }],
        decorations: vec![DecorationConfig {
            spawn_chance: 80,
            possible_materials: vec![MaterialId(10)],
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn same_seed_same_city() {
    let generator = CityGenerator::new(downtown()).unwrap();
    assert_eq!(generator.generate(2024), generator.generate(2024));
}

#[test]
fn different_seeds_differ() {
    let generator = CityGenerator::new(downtown()).unwrap();
    assert_ne!(generator.generate(1).layout, generator.generate(2).layout);
}

#[test]
fn zones_drive_building_height() {
    let generator = CityGenerator::new(downtown()).unwrap();
    let city = generator.generate(7);
    let zone = generator.config().zones[0].rect();

    let mut towers = 0;
    for (plot, building) in city.layout.plots.iter().zip(&city.buildings) {
        let (cx, cy) = plot.center();
        let floors = building.floors.len();
        if zone.contains(cx, cy) {
            towers += 1;
            assert!((50..=60).contains(&floors));
            // Every tower clears the roof threshold
            let roof = building.roof.as_ref().unwrap();
            assert!(!roof.parts.is_empty());
            assert_relative_eq!(roof.elevation, building.height);
            if roof.kind == RoofKind::AntennaCluster {
                assert_eq!(roof.parts.len() % 2, 0);
            }
        } else {
            assert!((5..=15).contains(&floors));
            assert!(building.roof.is_none());
        }
    }
    assert!(towers > 0);
}

#[test]
fn ground_covers_plots_and_roads() {
    let generator = CityGenerator::new(downtown()).unwrap();
    let city = generator.generate(3);

    let count = |kind: GroundKind| city.ground.iter().filter(|p| p.kind == kind).count();
    assert_eq!(count(GroundKind::Fog), 1);
    assert_eq!(count(GroundKind::Plot), city.layout.plots.len());
    assert_eq!(count(GroundKind::Road), city.layout.roads.len());
    assert_eq!(count(GroundKind::RoadLine), city.layout.roads.len());

    let plot_area: f64 = city.layout.plots.iter().map(|p| p.area()).sum();
    assert!(plot_area < 120.0 * 120.0);
}

#[test]
fn simple_strategy_generates_city() {
    let config = CityConfig {
        subdivision: skyline_model::SubdivisionSettings {
            strategy: SubdivisionStrategy::Simple,
            ..Default::default()
        },
        ..Default::default()
    };
    let city = CityGenerator::new(config).unwrap().generate(9);

    assert!(!city.buildings.is_empty());
    assert_eq!(city.failed_floor_count(), 0);
}

#[test]
fn config_round_trips_through_json() {
    let json = downtown().to_json_string().unwrap();
    let generator = CityGenerator::from_json_str(&json).unwrap();
    assert_eq!(generator.config(), &downtown());
}

#[test]
fn broken_footprint_keeps_building_alive() {
    let config = BuildingConfig::default();
    let profile = NeighborhoodProfile::default();
    let manager = DecorationManager::new(
        vec![DecorationConfig {
            spawn_chance: 100,
            ..Default::default()
        }],
        DecorationRegistry::with_default_decorations(),
    )
    .unwrap();
    let generator = BuildingGenerator::new(&config, &profile).with_decorations(&manager);

    let bowtie = Footprint::from_xz(&[
        Point2::new(-3.0, -3.0),
        Point2::new(3.0, 3.0),
        Point2::new(3.0, -3.0),
        Point2::new(-3.0, 3.0),
    ]);
    let mut controller =
        BuildingController::new(BuildingSpec::with_footprint(6.0, 6.0, 8, 2.0, bowtie));

    let mut rng = skyline_city::random::seeded(0);
    let building = controller.regenerate(&generator, Point3::origin(), &mut rng);

    assert_eq!(building.failures.len(), 8);
    assert!(building.floors.is_empty());
    // Façade decorations do not depend on the floor meshes
    assert_eq!(building.decorations.len(), 4);
}

#[test]
fn extruded_floor_takes_planar_uvs() {
    let mesh = extrude_footprint(&Footprint::rectangle(4.0, 2.0), 3.0, 1.0).unwrap();
    let (projected, report) = project_planar_uvs(&mesh, &PlanarUvOptions::local(2.0));

    assert_eq!(report.triangles, 12);
    assert_eq!(report.degenerate_triangles, 0);
    assert_eq!(projected.submesh(Submesh::Caps.index()), mesh.submesh(Submesh::Caps.index()));
    assert_eq!(projected.tangents.len(), projected.vertex_count() * 4);

    let (min, max) = projected.bounds().unwrap();
    assert_relative_eq!(max.y - min.y, 3.0, epsilon = 1e-6);
}
