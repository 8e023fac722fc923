// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Façade decorations
//!
//! Decoration generators implement [`Decoration`] and are looked up by kind
//! through a [`DecorationRegistry`]. The [`DecorationManager`] pairs the
//! registry with the configured decoration list and decides, per floor,
//! whether anything is placed.

use crate::kana::KanaSignDecoration;
use crate::random;
use crate::{Error, Result};
use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion};
use rand::RngCore;
use rustc_hash::FxHashMap;
use skyline_geometry::Mesh;
use skyline_model::{DecorationConfig, KanaSettings, MaterialId, PrefabId};
use std::fmt;
use std::sync::Arc;

/// One named mesh of a decoration, with materials in submesh order
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationMesh {
    pub name: String,
    pub mesh: Mesh,
    pub materials: Vec<Option<MaterialId>>,
}

/// Generated decoration ready to be attached to a building
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationInstance {
    pub kind: String,
    pub prefab: Option<PrefabId>,
    /// Rigid placement in world space
    pub transform: Isometry3<f64>,
    /// Uniform scale applied before `transform`
    pub scale: f64,
    pub meshes: Vec<DecorationMesh>,
}

impl DecorationInstance {
    /// Local-to-world matrix including scale
    pub fn local_to_world(&self) -> Matrix4<f64> {
        self.transform.to_homogeneous() * Matrix4::new_scaling(self.scale)
    }
}

/// Decoration generator
///
/// `position` is the world-space anchor on the façade and `frame` the
/// outward-facing placement at that anchor. Implementations choose their
/// materials from `materials` and draw any randomness from `rng`.
pub trait Decoration: Send + Sync {
    /// Registry key
    fn kind(&self) -> &str;

    /// Build a decoration instance
    fn generate(
        &self,
        position: Point3<f64>,
        frame: &Isometry3<f64>,
        materials: &[MaterialId],
        rng: &mut dyn RngCore,
    ) -> Result<DecorationInstance>;
}

/// Decoration generators by kind
#[derive(Clone, Default)]
pub struct DecorationRegistry {
    decorations: FxHashMap<String, Arc<dyn Decoration>>,
}

impl DecorationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in decorations
    ///
    /// Registers:
    /// - `KanaSignDecoration` (`kana_sign`) with default settings
    pub fn with_default_decorations() -> Self {
        Self::with_kana_settings(KanaSettings::default())
    }

    /// Built-in decorations with custom kana settings
    pub fn with_kana_settings(settings: KanaSettings) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(KanaSignDecoration::new(settings)));
        registry
    }

    /// Register a generator, replacing any previous one of the same kind
    pub fn register(&mut self, decoration: Arc<dyn Decoration>) {
        self.decorations
            .insert(decoration.kind().to_string(), decoration);
    }

    pub fn get(&self, kind: &str) -> Option<&Arc<dyn Decoration>> {
        self.decorations.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.decorations.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.decorations.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl fmt::Debug for DecorationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecorationRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Places configured decorations on building façades
#[derive(Debug, Clone)]
pub struct DecorationManager {
    decorations: Vec<DecorationConfig>,
    registry: DecorationRegistry,
}

impl DecorationManager {
    /// Create a manager, checking every configured kind is registered
    pub fn new(decorations: Vec<DecorationConfig>, registry: DecorationRegistry) -> Result<Self> {
        if let Some(missing) = decorations.iter().find(|d| !registry.contains(&d.kind)) {
            return Err(Error::unknown_decoration(&missing.kind));
        }
        Ok(Self {
            decorations,
            registry,
        })
    }

    pub fn decorations(&self) -> &[DecorationConfig] {
        &self.decorations
    }

    pub fn registry(&self) -> &DecorationRegistry {
        &self.registry
    }

    /// Try to place one decoration at a façade point
    ///
    /// Entries are tried in order. Entries whose floor range excludes `floor`
    /// are skipped; otherwise a roll in `[0, 100)` at or below the entry's
    /// spawn chance places it. At most one decoration is placed per call.
    pub fn try_place(
        &self,
        position: Point3<f64>,
        rotation: UnitQuaternion<f64>,
        floor: u32,
        rng: &mut dyn RngCore,
    ) -> Result<Option<DecorationInstance>> {
        for entry in &self.decorations {
            if !entry.allows_floor(floor) {
                continue;
            }

            let roll = random::range_i64(rng, 0, 100);
            if roll > entry.spawn_chance as i64 {
                continue;
            }

            let generator = self
                .registry
                .get(&entry.kind)
                .ok_or_else(|| Error::unknown_decoration(&entry.kind))?;

            let frame = Isometry3::from_parts(Translation3::from(position.coords), rotation);
            let mut instance =
                generator.generate(position, &frame, &entry.possible_materials, rng)?;
            if entry.prefab.is_some() {
                instance.prefab = entry.prefab;
            }
            return Ok(Some(instance));
        }

        Ok(None)
    }
}
