//! # multiplication_drill
//!
//! Core of a timed multiplication-table game for children.
//!
//! The learner picks which tables to practise, answers a run of generated
//! problems on a keypad before the clock runs out, and earns a collectible
//! card for a perfect, on-time run.
//!
//! ## How it works
//!
//! 1. Build a [`Game`] with a [`DrillConfig`] and a [`Storage`] backend. The
//!    unlocked cards and language preference are restored from storage;
//!    anything unreadable is treated as empty.
//! 2. Feed it [`Event`]s through [`Game::dispatch`]: table toggles, keypad
//!    digits, submits, and a `Tick` every poll interval while playing.
//! 3. The controller calls back into your [`Presenter`] to draw problems,
//!    progress, the countdown and the final [`SessionResult`].
//!
//! ## Key features
//!
//! - **Deduplicated problems**: `3×4` and `4×3` are the same problem. Each
//!   pair's operand order is picked once per run and kept for repeats.
//! - **Deterministic**: set `rng_seed` in the config (or on a
//!   [`DrillRequest`]) to reproduce problems and card draws.
//! - **Silent degrade**: storage errors are logged and dropped; the game never
//!   stops because persistence failed.
//!
//! ## Quick start
//!
//! ```rust
//! use multiplication_drill::{
//!     DrillConfig, Event, Game, MemoryStorage, Phase, RecordingPresenter,
//! };
//!
//! let config = DrillConfig { rng_seed: Some(42), ..DrillConfig::default() };
//! let mut game = Game::new(config, Box::new(MemoryStorage::new()), Some("en-GB"))?;
//! let mut ui = RecordingPresenter::default();
//!
//! game.dispatch(Event::ToggleTable(3), &mut ui);
//! game.dispatch(Event::Start, &mut ui);
//!
//! // Answer every problem correctly.
//! while let Some(problem) = game.round().and_then(|r| r.current_problem()).cloned() {
//!     for digit in problem.answer.to_string().chars() {
//!         game.dispatch(Event::Digit(digit), &mut ui);
//!     }
//!     game.dispatch(Event::Submit, &mut ui);
//! }
//!
//! assert!(matches!(game.phase(), Phase::Finished(_)));
//! let result = game.result().unwrap();
//! assert_eq!(result.score, 20);
//! # Ok::<(), multiplication_drill::ConfigError>(())
//! ```

pub mod client_adapter;
pub mod drill_engine;

// Convenience re-exports so callers can use `multiplication_drill::Game`
// directly without reaching into `drill_engine::`.
pub use client_adapter::{result_title, to_client_collection, to_client_result};
pub use drill_engine::{
    cards::{Card, Collection, CATALOG},
    generate_drill, generate_problems,
    locale::{detect_preferred_locale, Locale, Translator},
    presenter::{Presenter, RecordingPresenter},
    storage::{FileStorage, MemoryStorage, Storage},
    timer::{Clock, ManualClock, SystemClock},
    ConfigError, DrillConfig, DrillError, DrillRequest, Event, FactorPair, Game, Handled, Phase,
    Problem, ProblemLogEntry, Reward, ScoreBand, SessionResult, Sound, StorageError,
    TableSelection,
};
