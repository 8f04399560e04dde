use std::collections::HashSet;

use rand::Rng;
use crate::drill_engine::models::FactorPair;

/// Deduplicated set of unordered factor pairs reachable from a selection.
pub struct PairPool {
    pairs: Vec<FactorPair>,
}

impl PairPool {
    /// Every `table × m` for `m` in `1..=max_multiplier`, keyed without order.
    ///
    /// `3×4` and `4×3` land in the same slot even when both tables are
    /// selected. First-seen order is kept until [`shuffle`](Self::shuffle).
    pub fn build(tables: impl IntoIterator<Item = u8>, max_multiplier: u8) -> Self {
        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for table in tables {
            for m in 1..=max_multiplier {
                let pair = FactorPair::new(table, m);
                if seen.insert(pair) {
                    pairs.push(pair);
                }
            }
        }
        log::debug!("built pair pool with {} entries", pairs.len());
        PairPool { pairs }
    }

    /// Build and shuffle in one step.
    pub fn new_shuffled<R: Rng>(
        tables: impl IntoIterator<Item = u8>,
        max_multiplier: u8,
        rng: &mut R,
    ) -> Self {
        let mut pool = Self::build(tables, max_multiplier);
        pool.shuffle(rng);
        pool
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        // Fisher-Yates shuffle
        for i in (1..self.pairs.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.pairs.swap(i, j);
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[FactorPair] {
        &self.pairs
    }

    /// Walk the pool from the start, wrapping around forever.
    pub fn cycle(&self) -> impl Iterator<Item = FactorPair> + '_ {
        self.pairs.iter().copied().cycle()
    }
}
