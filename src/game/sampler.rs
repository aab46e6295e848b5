//! Image pair sampling
//!
//! Draws one unused real and one unused fake asset per round:
//! - Uniform index draw per pool, rejecting already-shown keys
//! - Retries are bounded because pool size >= round count (checked once
//!   at session start, not per draw)
//! - 50/50 left/right ordering so the real photo's position is
//!   unpredictable
//!
//! Sampling is pure: the caller records the drawn keys into the used set.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::game::assets::{AssetKey, PoolTag};

/// Samples non-repeating real/fake pairs from two fixed-size pools.
#[derive(Clone, Copy, Debug)]
pub struct PairSampler {
    real_count: u32,
    fake_count: u32,
}

impl PairSampler {
    pub fn new(real_count: u32, fake_count: u32) -> Self {
        PairSampler {
            real_count,
            fake_count,
        }
    }

    /// Draw one unused key from each pool and order them randomly.
    ///
    /// Result is `[left, right]`; exactly one key is from the REAL pool.
    pub fn sample(&self, used: &FxHashSet<AssetKey>, rng: &mut impl Rng) -> [AssetKey; 2] {
        let real = Self::draw_unused(PoolTag::Real, self.real_count, used, rng);
        let fake = Self::draw_unused(PoolTag::Fake, self.fake_count, used, rng);

        if rng.gen_bool(0.5) {
            [real, fake]
        } else {
            [fake, real]
        }
    }

    /// Rejection loop: redraw until the key is not in the used set.
    fn draw_unused(
        tag: PoolTag,
        pool_size: u32,
        used: &FxHashSet<AssetKey>,
        rng: &mut impl Rng,
    ) -> AssetKey {
        loop {
            let key = AssetKey::new(tag, rng.gen_range(1..=pool_size));
            if !used.contains(&key) {
                return key;
            }
        }
    }
}
