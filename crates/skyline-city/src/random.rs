// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seeded random helpers
//!
//! All generators draw from one generator threaded through the call chain as
//! `&mut dyn RngCore`. Integer ranges exclude their maximum, float ranges
//! include it. An empty, inverted or non-finite range yields its minimum
//! instead of panicking, so a sparse configuration degrades to fixed values.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for a city seed
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Integer in `[min, max)`
pub fn range_i64(rng: &mut dyn RngCore, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Unsigned integer in `[min, max)`
#[inline]
pub fn range_u32(rng: &mut dyn RngCore, min: u32, max: u32) -> u32 {
    range_i64(rng, min as i64, max as i64) as u32
}

/// Float in `[min, max]`
pub fn range_f64(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Float in `[0, 1)`
#[inline]
pub fn value(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Index in `[0, len)`, `None` for an empty collection
pub fn index(rng: &mut dyn RngCore, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}

/// Uniformly chosen element
#[inline]
pub fn choose<'a, T>(rng: &mut dyn RngCore, items: &'a [T]) -> Option<&'a T> {
    index(rng, items.len()).map(|i| &items[i])
}
