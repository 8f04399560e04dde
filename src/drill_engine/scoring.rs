use std::time::Duration;

use crate::drill_engine::models::{Problem, ProblemLogEntry, ScoreBand};

/// Number of problems whose recorded answer equals the product.
pub fn score(problems: &[Problem]) -> usize {
    problems.iter().filter(|p| p.is_correct()).count()
}

/// Classify a score. Boundaries are exclusive: `< 50%`, `< 70%`, `< 90%`,
/// `< 100%`, then perfect.
pub fn score_band(score: usize, total: usize) -> ScoreBand {
    // Integer form of `score < total * pct`.
    if score * 2 < total {
        ScoreBand::Low
    } else if score * 10 < total * 7 {
        ScoreBand::Medium
    } else if score * 10 < total * 9 {
        ScoreBand::Good
    } else if score < total {
        ScoreBand::Great
    } else {
        ScoreBand::Perfect
    }
}

/// A run earns a card only when every answer is right and it ended in time.
pub fn is_success(
    score: usize,
    total: usize,
    elapsed: Duration,
    time_limit: Duration,
    time_up: bool,
) -> bool {
    score == total && elapsed <= time_limit && !time_up
}

/// Per-problem log in session order, 1-based.
pub fn problem_log(problems: &[Problem]) -> Vec<ProblemLogEntry> {
    problems
        .iter()
        .enumerate()
        .map(|(i, p)| ProblemLogEntry {
            index: i + 1,
            a: p.a,
            b: p.b,
            answer: p.answer,
            user_answer: p.user_answer,
            correct: p.is_correct(),
        })
        .collect()
}
