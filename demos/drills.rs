//! Problem generation walkthrough.
//!
//! Run with: `cargo run --example drills`
//!
//! Shows how `generate_drill` builds a run of problems:
//!
//! 1. **Single table**: `{3}` has only ten distinct pairs, so a 20-problem
//!    run walks the shuffled pool twice. Repeats keep their operand order.
//! 2. **Overlapping tables**: `{3, 4}` reaches `3×4` from both sides; it is
//!    one pool entry.
//! 3. **Everything**: all tables `2..=9`, no repeats in 20 problems.
//!
//! Fixed seeds keep the output reproducible.

use std::collections::HashMap;

use multiplication_drill::{generate_drill, DrillRequest, FactorPair};

fn print_drill(label: &str, tables: &[u8], seed: u64) {
    let request = DrillRequest { tables: tables.to_vec(), count: 20, rng_seed: Some(seed) };
    let problems = match generate_drill(&request) {
        Ok(problems) => problems,
        Err(e) => {
            println!("  {label}: {e}");
            return;
        }
    };

    let mut seen: HashMap<FactorPair, usize> = HashMap::new();
    for p in &problems {
        *seen.entry(p.pair()).or_default() += 1;
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{label}]  tables: {tables:?}  seed: {seed}  distinct pairs: {}", seen.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (i, p) in problems.iter().enumerate() {
        let repeat = if seen[&p.pair()] > 1 { "  (repeats)" } else { "" };
        println!("  {:>2}. {:>7} = {:<3}{repeat}", i + 1, p.to_string(), p.answer);
    }
    println!();
}

fn main() {
    println!();
    print_drill("Single table", &[3], 3003);
    print_drill("Overlapping tables", &[3, 4], 3004);
    print_drill("All tables", &[2, 3, 4, 5, 6, 7, 8, 9], 2009);

    // ── Rejected requests ──────────────────────────────────────────────────
    // An empty selection is a caller error, reported instead of panicking.
    println!("══ Rejected request ══");
    print_drill("No tables", &[], 1);
}
