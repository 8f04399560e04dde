use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Problem primitives
// ---------------------------------------------------------------------------

/// Two factors without regard to order. `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactorPair {
    pub low: u8,
    pub high: u8,
}

impl FactorPair {
    pub fn new(x: u8, y: u8) -> Self {
        FactorPair { low: x.min(y), high: x.max(y) }
    }

    pub fn product(self) -> u32 {
        self.low as u32 * self.high as u32
    }

    /// Operands in display order. `flipped` puts the larger factor first.
    pub fn oriented(self, flipped: bool) -> (u8, u8) {
        if flipped {
            (self.high, self.low)
        } else {
            (self.low, self.high)
        }
    }
}

impl fmt::Display for FactorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.low, self.high)
    }
}

/// One multiplication problem as shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub a: u8,
    pub b: u8,
    pub answer: u32,
    /// `None` until submitted, then whatever the learner typed.
    pub user_answer: Option<u32>,
}

impl Problem {
    pub fn new(a: u8, b: u8) -> Self {
        Problem { a, b, answer: a as u32 * b as u32, user_answer: None }
    }

    pub fn pair(&self) -> FactorPair {
        FactorPair::new(self.a, self.b)
    }

    pub fn is_correct(&self) -> bool {
        self.user_answer == Some(self.answer)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.a, self.b)
    }
}

// ---------------------------------------------------------------------------
// Table selection
// ---------------------------------------------------------------------------

/// The set of tables the learner picked on the setup screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelection {
    tables: BTreeSet<u8>,
}

impl TableSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `table`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, table: u8) -> bool {
        if self.tables.remove(&table) {
            false
        } else {
            self.tables.insert(table);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.tables.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl FromIterator<u8> for TableSelection {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        TableSelection { tables: iter.into_iter().collect() }
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillRequest {
    pub tables: Vec<u8>,
    pub count: usize,
    pub rng_seed: Option<u64>,
}

impl DrillRequest {
    /// Twenty problems from fresh entropy.
    pub fn new(tables: impl IntoIterator<Item = u8>) -> Self {
        DrillRequest {
            tables: tables.into_iter().collect(),
            count: 20,
            rng_seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Feedback and results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sound {
    Click,
    Correct,
    Fail,
    Fanfare,
}

/// Score-banded label shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreBand {
    Low,
    Medium,
    Good,
    Great,
    Perfect,
}

impl ScoreBand {
    /// Translation key for the band label.
    pub fn key(self) -> &'static str {
        match self {
            ScoreBand::Low     => "scores.low",
            ScoreBand::Medium  => "scores.medium",
            ScoreBand::Good    => "scores.good",
            ScoreBand::Great   => "scores.great",
            ScoreBand::Perfect => "scores.perfect",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreBand::Low     => "needs practice",
            ScoreBand::Medium  => "not bad",
            ScoreBand::Good    => "well done",
            ScoreBand::Great   => "bravo",
            ScoreBand::Perfect => "perfect",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    /// Run did not qualify.
    None,
    NewCard(String),
    /// Run qualified but every card was already unlocked.
    CollectionComplete,
}

impl Reward {
    pub fn card_id(&self) -> Option<&str> {
        match self {
            Reward::NewCard(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemLogEntry {
    /// 1-based position in the session.
    pub index: usize,
    pub a: u8,
    pub b: u8,
    pub answer: u32,
    pub user_answer: Option<u32>,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub score: usize,
    pub total: usize,
    pub band: ScoreBand,
    pub success: bool,
    pub time_up: bool,
    pub elapsed: Duration,
    pub time_limit: Duration,
    pub log: Vec<ProblemLogEntry>,
    pub reward: Reward,
}

impl SessionResult {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// The run ended late, either by the countdown or by a slow final submit.
    pub fn was_late(&self) -> bool {
        self.time_up || self.elapsed > self.time_limit
    }

    pub fn mistakes(&self) -> impl Iterator<Item = &ProblemLogEntry> {
        self.log.iter().filter(|entry| !entry.correct)
    }
}
