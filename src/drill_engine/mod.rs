//! Core drill engine: problem generation, the game controller and the
//! collaborators it talks to.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: problems, factor pairs, selection, results |
//! | `pool`      | Deduplicated factor-pair pool with Fisher-Yates shuffle |
//! | `generator` | `generate_problems()` / `generate_drill()` |
//! | `scoring`   | Score, score band, success predicate, per-problem log |
//! | `session`   | `Game` controller, `Event` enum, single `dispatch` |
//! | `timer`     | Clock abstraction and the polled countdown |
//! | `input`     | Keypad answer buffer |
//! | `cards`     | Card catalog, collection, persisted unlocked set |
//! | `storage`   | Key/value storage capability (memory and JSON file) |
//! | `locale`    | Locale detection and dotted-key translation |
//! | `presenter` | Rendering / audio notifications the controller emits |
//! | `config`    | `DrillConfig` tunables |
//! | `error`     | Error enums |

pub mod cards;
pub mod config;
pub mod error;
pub mod generator;
pub mod input;
pub mod locale;
pub mod models;
pub mod pool;
pub mod presenter;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod timer;

// Re-export the public API surface so callers can use
// `drill_engine::Game` without reaching into sub-modules.
pub use config::DrillConfig;
pub use error::{ConfigError, DrillError, StorageError};
pub use generator::{generate_drill, generate_problems};
pub use models::{
    DrillRequest, FactorPair, Problem, ProblemLogEntry, Reward, ScoreBand, SessionResult,
    Sound, TableSelection,
};
pub use session::{Event, Game, Handled, Phase, Round};
