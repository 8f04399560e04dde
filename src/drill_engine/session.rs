//! The game controller: setup → playing → finished.
//!
//! Everything the UI can do arrives as an [`Event`] through
//! [`Game::dispatch`]. The controller owns the table selection, the current
//! round and the card collection; the presenter only ever sees borrowed
//! snapshots.
//!
//! ```text
//!            Start                 last Submit / Tick past limit
//!   Setup ──────────▶ Playing ───────────────────────────────▶ Finished
//!     ▲                 │  ▲                                      │
//!     └── BackToSetup ──┘  └──────────────── Retry ───────────────┤
//!     ▲                                                           │
//!     └──────────────────────── BackToSetup ──────────────────────┘
//! ```

use rand::{rngs::StdRng, SeedableRng};

use crate::drill_engine::{
    cards::{self, Collection},
    config::DrillConfig,
    error::ConfigError,
    generator,
    input::AnswerBuffer,
    locale::{self, Locale, Translator},
    models::{Problem, Reward, SessionResult, Sound, TableSelection},
    presenter::Presenter,
    scoring,
    storage::Storage,
    timer::{Clock, Countdown, SystemClock},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ToggleTable(u8),
    Start,
    /// Keypad key. Anything but `0`..=`9` is dropped.
    Digit(char),
    Backspace,
    Submit,
    /// Countdown poll, sent by the driver every `poll_interval`.
    Tick,
    Retry,
    BackToSetup,
    RequestReset,
    ConfirmReset,
    CancelReset,
    SetLocale(Locale),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Applied,
    /// Not valid in the current state; nothing changed.
    Ignored,
}

/// One timed run through the generated problems.
#[derive(Debug, Clone)]
pub struct Round {
    problems: Vec<Problem>,
    current: usize,
    countdown: Countdown,
    buffer: AnswerBuffer,
}

impl Round {
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Index of the problem on screen; equals `len` once all are answered.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.problems.get(self.current)
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.problems.len()
    }

    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }
}

#[derive(Debug, Clone)]
pub enum Phase {
    Setup,
    Playing(Round),
    Finished(SessionResult),
}

pub struct Game<C: Clock = SystemClock> {
    config: DrillConfig,
    clock: C,
    rng: StdRng,
    storage: Box<dyn Storage>,
    selection: TableSelection,
    collection: Collection,
    translator: Translator,
    phase: Phase,
    reset_pending: bool,
}

impl Game<SystemClock> {
    pub fn new(
        config: DrillConfig,
        storage: Box<dyn Storage>,
        system_locale: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Game::with_clock(config, storage, SystemClock, system_locale)
    }
}

impl<C: Clock> Game<C> {
    /// Build a controller and restore persisted state. Storage failures
    /// degrade to an empty collection and the system locale.
    ///
    /// The config is validated here, so a selected table is always enough
    /// to start a round.
    pub fn with_clock(
        config: DrillConfig,
        storage: Box<dyn Storage>,
        clock: C,
        system_locale: Option<&str>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };

        let unlocked = cards::load_unlocked(storage.as_ref()).unwrap_or_else(|e| {
            log::warn!("could not load unlocked cards, starting empty: {}", e);
            Default::default()
        });
        let saved_locale = locale::load_saved_locale(storage.as_ref()).unwrap_or_else(|e| {
            log::warn!("could not load language preference: {}", e);
            None
        });
        let locale = locale::detect_preferred_locale(saved_locale.as_deref(), system_locale);

        Ok(Game {
            config,
            clock,
            rng,
            storage,
            selection: TableSelection::new(),
            collection: Collection::new(unlocked),
            translator: Translator::new(locale),
            phase: Phase::Setup,
            reset_pending: false,
        })
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.phase {
            Phase::Playing(round) => Some(round),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&SessionResult> {
        match &self.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    pub fn selection(&self) -> &TableSelection {
        &self.selection
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn can_start(&self) -> bool {
        matches!(self.phase, Phase::Setup) && !self.selection.is_empty()
    }

    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Draw the initial screen.
    pub fn present(&self, presenter: &mut dyn Presenter) {
        presenter.render_collection(&self.collection, &self.translator);
        presenter.render_setup(&self.selection, self.can_start());
    }

    pub fn dispatch(&mut self, event: Event, presenter: &mut dyn Presenter) -> Handled {
        let handled = match event {
            Event::ToggleTable(table) => self.toggle_table(table, presenter),
            Event::Start => match self.phase {
                Phase::Setup if !self.selection.is_empty() => self.start_round(presenter),
                _ => Handled::Ignored,
            },
            Event::Retry => match self.phase {
                Phase::Finished(_) => self.start_round(presenter),
                _ => Handled::Ignored,
            },
            Event::Digit(key) => self.press_digit(key, presenter),
            Event::Backspace => self.backspace(presenter),
            Event::Submit => self.submit(presenter),
            Event::Tick => self.tick(presenter),
            Event::BackToSetup => self.back_to_setup(presenter),
            Event::RequestReset => {
                self.reset_pending = true;
                presenter.render_reset_prompt(true);
                Handled::Applied
            }
            Event::ConfirmReset => self.confirm_reset(presenter),
            Event::CancelReset => self.cancel_reset(presenter),
            Event::SetLocale(locale) => self.set_locale(locale, presenter),
        };
        if handled == Handled::Ignored {
            log::debug!("ignored {:?}", event);
        }
        handled
    }

    fn toggle_table(&mut self, table: u8, presenter: &mut dyn Presenter) -> Handled {
        if !matches!(self.phase, Phase::Setup) || !self.config.accepts_table(table) {
            return Handled::Ignored;
        }
        self.selection.toggle(table);
        presenter.render_setup(&self.selection, self.can_start());
        Handled::Applied
    }

    fn start_round(&mut self, presenter: &mut dyn Presenter) -> Handled {
        let problems = match generator::generate_problems(
            &self.selection.to_vec(),
            self.config.problem_count,
            self.config.max_multiplier,
            &mut self.rng,
        ) {
            Ok(problems) => problems,
            Err(e) => {
                log::debug!("cannot start round: {}", e);
                return Handled::Ignored;
            }
        };

        // Replacing the phase drops any previous round and its countdown.
        let round = Round {
            problems,
            current: 0,
            countdown: Countdown::start(self.clock.now(), self.config.time_limit()),
            buffer: AnswerBuffer::new(self.config.max_input_digits),
        };
        log::info!(
            "round started: tables {:?}, {} problems, {}s",
            self.selection.to_vec(),
            round.problems.len(),
            self.config.time_limit_secs
        );

        presenter.render_timer(self.config.time_limit_secs);
        presenter.render_progress(0, round.problems.len());
        if let Some(first) = round.current_problem() {
            presenter.render_problem(first);
        }
        presenter.render_input("");
        self.phase = Phase::Playing(round);
        Handled::Applied
    }

    fn press_digit(&mut self, key: char, presenter: &mut dyn Presenter) -> Handled {
        let Phase::Playing(round) = &mut self.phase else {
            return Handled::Ignored;
        };
        if !round.buffer.push(key) {
            return Handled::Ignored;
        }
        presenter.render_input(round.buffer.as_str());
        presenter.play_sound(Sound::Click);
        Handled::Applied
    }

    fn backspace(&mut self, presenter: &mut dyn Presenter) -> Handled {
        let Phase::Playing(round) = &mut self.phase else {
            return Handled::Ignored;
        };
        if !round.buffer.backspace() {
            return Handled::Ignored;
        }
        presenter.render_input(round.buffer.as_str());
        Handled::Applied
    }

    fn submit(&mut self, presenter: &mut dyn Presenter) -> Handled {
        let Phase::Playing(round) = &mut self.phase else {
            return Handled::Ignored;
        };
        let Some(value) = round.buffer.parse() else {
            return Handled::Ignored;
        };
        let Some(problem) = round.problems.get_mut(round.current) else {
            return Handled::Ignored;
        };

        problem.user_answer = Some(value);
        presenter.play_sound(if problem.is_correct() { Sound::Correct } else { Sound::Fail });
        round.current += 1;
        round.buffer.clear();

        if round.is_complete() {
            self.finish(false, presenter);
        } else {
            presenter.render_progress(round.current, round.problems.len());
            if let Some(next) = round.current_problem() {
                presenter.render_problem(next);
            }
            presenter.render_input("");
        }
        Handled::Applied
    }

    fn tick(&mut self, presenter: &mut dyn Presenter) -> Handled {
        let Phase::Playing(round) = &self.phase else {
            return Handled::Ignored;
        };
        let now = self.clock.now();
        presenter.render_timer(round.countdown.remaining_secs(now));
        if round.countdown.is_expired(now) {
            self.finish(true, presenter);
        }
        Handled::Applied
    }

    fn finish(&mut self, time_up: bool, presenter: &mut dyn Presenter) {
        let now = self.clock.now();
        let round = match std::mem::replace(&mut self.phase, Phase::Setup) {
            Phase::Playing(round) => round,
            other => {
                self.phase = other;
                return;
            }
        };

        let elapsed = round.countdown.elapsed(now);
        let total = round.problems.len();
        let score = scoring::score(&round.problems);
        let success = scoring::is_success(score, total, elapsed, round.countdown.limit(), time_up);

        let reward = if success {
            match self.collection.unlock_random(&mut self.rng) {
                Some(card) => {
                    log::info!("unlocked card {}", card.id);
                    self.persist_collection();
                    Reward::NewCard(card.id.to_string())
                }
                None => Reward::CollectionComplete,
            }
        } else {
            Reward::None
        };

        let result = SessionResult {
            score,
            total,
            band: scoring::score_band(score, total),
            success,
            time_up,
            elapsed,
            time_limit: round.countdown.limit(),
            log: scoring::problem_log(&round.problems),
            reward,
        };
        log::info!(
            "round finished: {}/{} in {:.2}s, time_up={}, success={}",
            score,
            total,
            result.elapsed_secs(),
            time_up,
            success
        );

        if success {
            presenter.play_sound(Sound::Fanfare);
        }
        presenter.render_progress(total, total);
        presenter.render_result(&result, &self.translator);
        if result.reward.card_id().is_some() {
            presenter.render_collection(&self.collection, &self.translator);
        }
        self.phase = Phase::Finished(result);
    }

    fn back_to_setup(&mut self, presenter: &mut dyn Presenter) -> Handled {
        if matches!(self.phase, Phase::Setup) {
            return Handled::Ignored;
        }
        self.phase = Phase::Setup;
        presenter.render_setup(&self.selection, self.can_start());
        Handled::Applied
    }

    fn confirm_reset(&mut self, presenter: &mut dyn Presenter) -> Handled {
        if !self.reset_pending {
            return Handled::Ignored;
        }
        self.reset_pending = false;
        self.collection.clear();
        self.persist_collection();
        log::info!("card collection reset");
        presenter.render_reset_prompt(false);
        presenter.render_collection(&self.collection, &self.translator);
        Handled::Applied
    }

    fn cancel_reset(&mut self, presenter: &mut dyn Presenter) -> Handled {
        if !self.reset_pending {
            return Handled::Ignored;
        }
        self.reset_pending = false;
        presenter.render_reset_prompt(false);
        Handled::Applied
    }

    fn set_locale(&mut self, locale: Locale, presenter: &mut dyn Presenter) -> Handled {
        self.translator = Translator::new(locale);
        if let Err(e) = locale::save_locale(self.storage.as_mut(), locale) {
            log::warn!("could not save language preference: {}", e);
        }
        presenter.render_collection(&self.collection, &self.translator);
        Handled::Applied
    }

    fn persist_collection(&mut self) {
        if let Err(e) = cards::save_unlocked(self.storage.as_mut(), self.collection.unlocked()) {
            log::warn!("could not save unlocked cards: {}", e);
        }
    }
}
