//! Synthetic labeled digit-like samples for demos and benchmarks.
//!
//! Each of the ten classes gets a fixed stroke template; samples are the
//! template with jittered stroke intensity and sparse background noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SearchError};
use crate::sample::{Sample, MAX_SIDE};

/// Number of distinct labels, `'0'..='9'`.
pub const CLASSES: usize = 10;

const STROKES_PER_CLASS: usize = 3;
const NOISE_PROBABILITY: f64 = 0.05;

/// Stroke template of every class on a `side x side` grid.
pub fn templates(side: usize, seed: u64) -> Vec<Vec<bool>> {
    (0..CLASSES)
        .map(|class| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(class as u64 + 1));
            let mut on = vec![false; side * side];
            for _ in 0..STROKES_PER_CLASS {
                let fixed = rng.gen_range(0..side);
                let start = rng.gen_range(0..side);
                let len = rng.gen_range(1..=side - start);
                let horizontal = rng.gen_bool(0.5);
                for step in start..start + len {
                    let (x, y) = if horizontal { (step, fixed) } else { (fixed, step) };
                    on[y * side + x] = true;
                }
            }
            on
        })
        .collect()
}

/// Generate `n` labeled samples cycling through the classes.
pub fn generate(n: usize, side: usize, seed: u64) -> Result<Vec<Sample>> {
    if side == 0 || side > MAX_SIDE {
        return Err(SearchError::InvalidArgument(format!(
            "side must be in 1..={}, got {}",
            MAX_SIDE, side
        )));
    }

    let templates = templates(side, seed);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let class = i % CLASSES;
            let pixels = templates[class]
                .iter()
                .map(|&on| {
                    if on {
                        255 - rng.gen_range(0..64u8)
                    } else if rng.gen_bool(NOISE_PROBABILITY) {
                        rng.gen_range(0..128u8)
                    } else {
                        0
                    }
                })
                .collect();
            let label = char::from(b'0' + class as u8);
            Ok(Sample::new(pixels, side, side)?.with_label(label))
        })
        .collect()
}
