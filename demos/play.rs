//! Play the game in a terminal.
//!
//! Run with: `cargo run --example play [config.json]`
//!
//! Input is line based:
//!
//! - **Setup**: table numbers (`3 4 7`) toggle tables, `go` starts,
//!   `reset` asks to clear the card collection (`yes` / `no`),
//!   `lang fr` / `lang en` switches language, `quit` exits.
//! - **Playing**: type the answer and press enter. `back` aborts.
//! - **Result**: `again` retries with the same tables, `back` returns to setup.
//!
//! Unlocked cards are kept in `multiplication-drill.json` (override with
//! `MULTIPLICATION_DRILL_STORE`). Set `RUST_LOG=debug` to watch the engine.
//!
//! A reader thread forwards stdin lines over a channel; the main loop waits on
//! that channel with a timeout and sends `Event::Tick` whenever a poll
//! interval passes, so input and the countdown never race.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use multiplication_drill::{
    result_title, Collection, DrillConfig, Event, FileStorage, Game, Locale, Phase, Presenter,
    Problem, SessionResult, Sound, TableSelection, Translator, CATALOG,
};

const DEFAULT_STORE: &str = "multiplication-drill.json";

#[derive(Default)]
struct TerminalPresenter {
    last_timer: Option<u64>,
    /// Refreshed whenever the collection is drawn, which also happens on a
    /// language switch.
    reset_prompt: String,
}

impl Presenter for TerminalPresenter {
    fn render_setup(&mut self, selection: &TableSelection, can_start: bool) {
        let tables: Vec<String> = selection.iter().map(|t| t.to_string()).collect();
        let hint = if can_start { "type `go` to start" } else { "pick at least one table (2-9)" };
        println!("Tables: [{}]  {hint}", tables.join(" "));
    }

    fn render_problem(&mut self, problem: &Problem) {
        println!();
        println!("   {problem} = ?");
    }

    fn render_progress(&mut self, current: usize, total: usize) {
        println!("   ({current} / {total})");
    }

    fn render_timer(&mut self, remaining_secs: u64) {
        // Ticks arrive ten times a second; print each ten-second mark and the last five.
        let mark = remaining_secs % 10 == 0 || remaining_secs <= 5;
        if mark && self.last_timer != Some(remaining_secs) {
            println!("   ⏱  {remaining_secs}s");
        }
        self.last_timer = Some(remaining_secs);
    }

    fn render_result(&mut self, result: &SessionResult, t: &Translator) {
        self.last_timer = None;
        println!();
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  {}", result_title(result, t));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        if result.was_late() {
            println!(
                "  {} {:.2}s ({} {}s)",
                t.t("result.timeLabel"),
                result.elapsed_secs(),
                t.t("result.limit"),
                result.time_limit.as_secs()
            );
        }
        match result.reward.card_id().and_then(|id| CATALOG.iter().find(|c| c.id == id)) {
            Some(card) => {
                let name = t.t(&card.name_key());
                println!("  {} {} {}", t.t("result.newCardLabel"), card.emoji, name)
            }
            None if result.success => println!("  {}", t.t("result.allCardsLabel")),
            None => {}
        }
        println!("  {}", t.t("result.problemsLabel"));
        for entry in &result.log {
            let given = entry.user_answer.map(|v| v.to_string()).unwrap_or_else(|| "—".into());
            if entry.correct {
                println!("  {:>3}. {}×{} = {}  ✅", entry.index, entry.a, entry.b, entry.answer);
            } else {
                println!(
                    "  {:>3}. {}×{} = {}  ❌  {}",
                    entry.index, entry.a, entry.b, given, entry.answer
                );
            }
        }
        println!();
        println!("`again` to retry, `back` for the tables");
    }

    fn render_collection(&mut self, collection: &Collection, t: &Translator) {
        let cards: Vec<String> = CATALOG
            .iter()
            .map(|c| if collection.is_unlocked(c.id) { c.emoji.to_string() } else { "▢".into() })
            .collect();
        println!("{}: {}", t.t("setup.collection"), cards.join(" "));
        self.reset_prompt = t.t("setup.resetConfirm");
    }

    fn render_reset_prompt(&mut self, open: bool) {
        if open {
            println!("{} (yes / no)", self.reset_prompt);
        }
    }

    fn play_sound(&mut self, sound: Sound) {
        // Terminal bell for the big moments only.
        if matches!(sound, Sound::Fanfare) {
            print!("\x07");
            let _ = io::stdout().flush();
        }
    }
}

#[derive(Clone, Copy)]
enum Screen {
    Setup,
    Playing,
    Result,
}

fn screen(game: &Game) -> Screen {
    match game.phase() {
        Phase::Setup       => Screen::Setup,
        Phase::Playing(_)  => Screen::Playing,
        Phase::Finished(_) => Screen::Result,
    }
}

/// Translate one input line into events. Returns `false` to quit.
fn handle_line(game: &mut Game, ui: &mut TerminalPresenter, line: &str) -> bool {
    let mut words = line.split_whitespace();
    let first = words.next().unwrap_or("");

    match (screen(game), first) {
        (_, "quit" | "q") => return false,
        (_, "yes") => {
            game.dispatch(Event::ConfirmReset, ui);
        }
        (_, "no") => {
            game.dispatch(Event::CancelReset, ui);
        }
        (_, "reset") => {
            game.dispatch(Event::RequestReset, ui);
        }
        (_, "lang") => {
            match words.next().and_then(Locale::from_tag) {
                Some(locale) => {
                    game.dispatch(Event::SetLocale(locale), ui);
                }
                None => println!("usage: lang en|fr"),
            }
        }
        (_, "back") => {
            game.dispatch(Event::BackToSetup, ui);
        }
        (Screen::Setup, "go") => {
            game.dispatch(Event::Start, ui);
        }
        (Screen::Setup, _) => {
            for word in line.split_whitespace() {
                match word.parse::<u8>() {
                    Ok(table) => {
                        game.dispatch(Event::ToggleTable(table), ui);
                    }
                    Err(_) => println!("unknown command `{word}`"),
                }
            }
        }
        (Screen::Playing, _) => {
            for key in line.trim().chars() {
                game.dispatch(Event::Digit(key), ui);
            }
            game.dispatch(Event::Submit, ui);
        }
        (Screen::Result, "again") => {
            game.dispatch(Event::Retry, ui);
        }
        (Screen::Result, _) => println!("`again` or `back`"),
    }
    true
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => DrillConfig::load(Path::new(&path))?,
        None => DrillConfig::default(),
    };
    let store =
        std::env::var("MULTIPLICATION_DRILL_STORE").unwrap_or_else(|_| DEFAULT_STORE.into());
    let system_locale = std::env::var("LANG").ok();

    let storage = Box::new(FileStorage::new(store));
    let mut game = Game::new(config, storage, system_locale.as_deref())?;
    let mut ui = TerminalPresenter::default();
    println!("{}", game.translator().t("app.title"));
    game.present(&mut ui);

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let poll = game.config().poll_interval();
    let mut next_tick = Instant::now() + poll;
    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(line) => {
                if !handle_line(&mut game, &mut ui, line.trim()) {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                game.dispatch(Event::Tick, &mut ui);
                next_tick += poll;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}
