// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Skyline City
//!
//! Seeded procedural city generation on top of `skyline-geometry`.
//!
//! ## Overview
//!
//! - **Layout**: Recursive plot subdivision with road corridors and ground planes
//! - **Buildings**: Stacked extruded floors with per-floor failure isolation
//! - **Roofs**: Pointy stacks and antenna clusters for tall buildings
//! - **Decorations**: Pluggable façade decorations resolved by kind, kana signs built in
//! - **Props**: Sidewalk prefabs around every building
//!
//! One [`rand_chacha::ChaCha8Rng`] per call to [`CityGenerator::generate`]
//! drives every random choice. The same seed and configuration always yield
//! an equal [`City`].
//!
//! ## Quick Start
//!
//! ```rust
//! use skyline_city::CityGenerator;
//! use skyline_model::CityConfig;
//!
//! let generator = CityGenerator::new(CityConfig::default())?;
//! let city = generator.generate(42);
//!
//! assert_eq!(city.buildings.len(), city.layout.plots.len());
//! assert_eq!(city, generator.generate(42));
//! # Ok::<(), skyline_city::Error>(())
//! ```

pub mod building;
pub mod city;
pub mod decoration;
pub mod error;
pub mod kana;
pub mod planner;
pub mod random;
pub mod roof;

pub use building::{
    Building, BuildingController, BuildingGenerator, BuildingSpec, Floor, FloorFailure,
    PrefabPlacement, Side, SideBillboard,
};
pub use city::{euler_degrees, City, CityGenerator};
pub use decoration::{
    Decoration, DecorationInstance, DecorationManager, DecorationMesh, DecorationRegistry,
};
pub use error::{Error, Result};
pub use kana::{glyph_strokes, KanaSignDecoration, KANA_SIGN};
pub use planner::{ground_planes, road_marking, CityLayoutPlanner, GroundKind, GroundPlane, Layout};
pub use roof::{antenna_cluster, generate_roof, pointy_roof, Roof, RoofKind, RoofPart};
