// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Kana sign decoration
//!
//! Draws one of three kana (ぬ, ふ, あ) as three extruded quadrilateral
//! strokes. Stroke outlines are authored in a 1 x 1.4 glyph box and lifted
//! onto the ground plane before extrusion, so the sign is built lying flat
//! and then stood up by the placement fix.

use crate::decoration::{Decoration, DecorationInstance, DecorationMesh};
use crate::random;
use crate::Result;
use nalgebra::{Isometry3, Point2, Point3, Translation3, UnitQuaternion, Vector3};
use rand::RngCore;
use skyline_geometry::{extrude_footprint, Footprint};
use skyline_model::{KanaGlyph, KanaSettings, MaterialId};
use std::f64::consts::FRAC_PI_2;

/// Registry key of the kana sign
pub const KANA_SIGN: &str = "kana_sign";

/// Offset along the sign's local up axis after standing it up
const STAND_UP_OFFSET: f64 = -1.6;
/// Uniform scale of a placed sign
const SIGN_SCALE: f64 = 2.0;

type Stroke = [(f64, f64); 4];

const NU: [Stroke; 3] = [
    [(0.1, 1.3), (1.0, 1.3), (1.0, 1.4), (0.1, 1.4)],
    [(0.6, 1.1), (0.75, 1.0), (0.8, 1.05), (0.65, 1.15)],
    [(0.0, 0.4), (0.8, 1.0), (0.85, 0.9), (0.1, 0.3)],
];

const FU: [Stroke; 3] = [
    [(0.4, 0.0), (0.5, 0.0), (0.5, 1.4), (0.4, 1.4)],
    [(0.1, 1.3), (1.0, 0.5), (1.05, 0.6), (0.15, 1.4)],
    [(0.3, 0.5), (0.7, 0.0), (0.75, 0.1), (0.35, 0.6)],
];

const A: [Stroke; 3] = [
    [(0.4, 1.4), (0.5, 1.4), (0.0, 0.0), (-0.1, 0.0)],
    [(0.9, 1.4), (1.0, 1.4), (0.5, 0.0), (0.4, 0.0)],
    [(0.2, 0.7), (0.8, 0.7), (0.8, 0.8), (0.2, 0.8)],
];

/// Stroke outlines of a concrete glyph, `None` for [`KanaGlyph::Random`]
pub fn glyph_strokes(glyph: KanaGlyph) -> Option<Vec<Footprint>> {
    let strokes = match glyph {
        KanaGlyph::Nu => &NU,
        KanaGlyph::Fu => &FU,
        KanaGlyph::A => &A,
        KanaGlyph::Random => return None,
    };

    Some(
        strokes
            .iter()
            .map(|stroke| {
                let outline: Vec<Point2<f64>> =
                    stroke.iter().map(|&(x, y)| Point2::new(x, y)).collect();
                Footprint::from_xz(&outline)
            })
            .collect(),
    )
}

/// Replace [`KanaGlyph::Random`] by one of the concrete glyphs
pub fn resolve_glyph(glyph: KanaGlyph, rng: &mut dyn RngCore) -> KanaGlyph {
    match glyph {
        KanaGlyph::Random => match random::range_i64(rng, 1, 4) {
            1 => KanaGlyph::Nu,
            2 => KanaGlyph::Fu,
            _ => KanaGlyph::A,
        },
        concrete => concrete,
    }
}

/// Extruded kana sign
#[derive(Debug, Clone, Default)]
pub struct KanaSignDecoration {
    settings: KanaSettings,
}

impl KanaSignDecoration {
    pub fn new(settings: KanaSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &KanaSettings {
        &self.settings
    }

    /// Stand a flat sign up at `frame`
    ///
    /// Rotates 90 degrees about the local X axis, then moves along the
    /// rotated up axis.
    fn stand_up(frame: &Isometry3<f64>) -> Isometry3<f64> {
        let rotation =
            frame.rotation * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
        let up = rotation * Vector3::y();
        let translation = frame.translation.vector + up * STAND_UP_OFFSET;
        Isometry3::from_parts(Translation3::from(translation), rotation)
    }
}

impl Decoration for KanaSignDecoration {
    fn kind(&self) -> &str {
        KANA_SIGN
    }

    fn generate(
        &self,
        _position: Point3<f64>,
        frame: &Isometry3<f64>,
        materials: &[MaterialId],
        rng: &mut dyn RngCore,
    ) -> Result<DecorationInstance> {
        let material = random::choose(rng, materials).copied();
        let glyph = resolve_glyph(self.settings.glyph, rng);
        let strokes = glyph_strokes(glyph).unwrap_or_default();

        let meshes = strokes
            .iter()
            .enumerate()
            .map(|(i, stroke)| {
                let mesh =
                    extrude_footprint(stroke, self.settings.sign_height, self.settings.tile_size)?;
                Ok(DecorationMesh {
                    name: format!("Stroke{}", i + 1),
                    mesh,
                    // Walls and faces share the material
                    materials: vec![material, material],
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Generated {:?} kana sign with {} strokes", glyph, meshes.len());

        Ok(DecorationInstance {
            kind: KANA_SIGN.to_string(),
            prefab: None,
            transform: Self::stand_up(frame),
            scale: SIGN_SCALE,
            meshes,
        })
    }
}
