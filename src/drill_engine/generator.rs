use std::collections::HashMap;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::drill_engine::{
    error::DrillError,
    models::{DrillRequest, FactorPair, Problem},
    pool::PairPool,
};

/// Largest multiplier paired with each selected table.
pub const MAX_MULTIPLIER: u8 = 10;

/// Produce `count` problems from the selected tables.
///
/// The pool is shuffled once and walked cyclically, so a small selection
/// repeats pairs. Each unordered pair gets its operand order from a single
/// coin flip the first time it is emitted; repeats reuse it.
pub fn generate_problems<R: Rng>(
    tables: &[u8],
    count: usize,
    max_multiplier: u8,
    rng: &mut R,
) -> Result<Vec<Problem>, DrillError> {
    if tables.is_empty() {
        return Err(DrillError::EmptySelection);
    }
    if count == 0 {
        return Err(DrillError::ZeroCount);
    }

    let pool = PairPool::new_shuffled(tables.iter().copied(), max_multiplier, rng);
    if pool.is_empty() {
        // Only reachable with max_multiplier == 0.
        return Err(DrillError::EmptySelection);
    }

    let mut orientation: HashMap<FactorPair, bool> = HashMap::with_capacity(pool.len());
    let problems = pool
        .cycle()
        .take(count)
        .map(|pair| {
            let flipped = *orientation.entry(pair).or_insert_with(|| rng.gen_bool(0.5));
            let (a, b) = pair.oriented(flipped);
            Problem::new(a, b)
        })
        .collect();
    Ok(problems)
}

/// Entry point for one-off generation outside a [`Game`](crate::drill_engine::session::Game).
pub fn generate_drill(request: &DrillRequest) -> Result<Vec<Problem>, DrillError> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_problems(&request.tables, request.count, MAX_MULTIPLIER, &mut rng)
}
