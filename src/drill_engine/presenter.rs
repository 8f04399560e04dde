//! The narrow surface the game talks to for anything user-visible.
//!
//! All methods are notifications. Renderers that have no use for one simply
//! leave the default in place.

use crate::drill_engine::{
    cards::Collection,
    locale::Translator,
    models::{Problem, SessionResult, Sound, TableSelection},
};

pub trait Presenter {
    fn render_setup(&mut self, _selection: &TableSelection, _can_start: bool) {}

    fn render_problem(&mut self, problem: &Problem);

    fn render_progress(&mut self, _current: usize, _total: usize) {}

    fn render_input(&mut self, _buffer: &str) {}

    fn render_timer(&mut self, _remaining_secs: u64) {}

    fn render_result(&mut self, result: &SessionResult, translator: &Translator);

    fn render_collection(&mut self, _collection: &Collection, _translator: &Translator) {}

    /// `true` opens the reset confirmation, `false` closes it.
    fn render_reset_prompt(&mut self, _open: bool) {}

    /// Silent unless the renderer has audio.
    fn play_sound(&mut self, _sound: Sound) {}
}

/// Presenter that records every notification, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub problems: Vec<Problem>,
    pub progress: Vec<(usize, usize)>,
    pub inputs: Vec<String>,
    pub timer: Vec<u64>,
    pub results: Vec<SessionResult>,
    pub sounds: Vec<Sound>,
    pub setups: Vec<(Vec<u8>, bool)>,
    pub collections: Vec<usize>,
    pub reset_prompts: Vec<bool>,
}

impl Presenter for RecordingPresenter {
    fn render_setup(&mut self, selection: &TableSelection, can_start: bool) {
        self.setups.push((selection.to_vec(), can_start));
    }

    fn render_problem(&mut self, problem: &Problem) {
        self.problems.push(problem.clone());
    }

    fn render_progress(&mut self, current: usize, total: usize) {
        self.progress.push((current, total));
    }

    fn render_input(&mut self, buffer: &str) {
        self.inputs.push(buffer.to_string());
    }

    fn render_timer(&mut self, remaining_secs: u64) {
        self.timer.push(remaining_secs);
    }

    fn render_result(&mut self, result: &SessionResult, _translator: &Translator) {
        self.results.push(result.clone());
    }

    fn render_collection(&mut self, collection: &Collection, _translator: &Translator) {
        self.collections.push(collection.unlocked().len());
    }

    fn render_reset_prompt(&mut self, open: bool) {
        self.reset_prompts.push(open);
    }

    fn play_sound(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }
}
