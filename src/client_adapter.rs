use serde_json::{json, Value};
use crate::drill_engine::{
    cards::{find_card, Collection, CATALOG},
    locale::Translator,
    models::{ProblemLogEntry, Reward, SessionResult},
};

/// Headline shown over the result, e.g. `"18 / 20 - bravo"`.
pub fn result_title(result: &SessionResult, t: &Translator) -> String {
    format!(
        "{} / {} {} {}",
        result.score,
        result.total,
        t.t("result.title"),
        t.t(result.band.key())
    )
}

/// One row of the problem list. Wrong rows carry what was typed and the
/// expected answer; unanswered rows have `"given": null`.
fn log_row(entry: &ProblemLogEntry) -> Value {
    if entry.correct {
        json!({
            "index": entry.index,
            "expression": format!("{}×{}", entry.a, entry.b),
            "given": entry.user_answer,
            "correct": true
        })
    } else {
        json!({
            "index": entry.index,
            "expression": format!("{}×{}", entry.a, entry.b),
            "given": entry.user_answer,
            "correct": false,
            "expected": entry.answer
        })
    }
}

fn card_json(id: &str, t: &Translator) -> Value {
    match find_card(id) {
        Some(card) => json!({
            "id": card.id,
            "emoji": card.emoji,
            "color": card.color,
            "label": t.t(&card.name_key())
        }),
        None => json!({ "id": id, "emoji": "", "color": "", "label": id }),
    }
}

/// Payload for the result screen.
///
/// The time line only appears when the run ended late, as in the browser
/// version.
pub fn to_client_result(result: &SessionResult, t: &Translator) -> Value {
    let time = if result.was_late() {
        json!({
            "label": t.t("result.timeLabel"),
            "elapsed": format!("{:.2}s", result.elapsed_secs()),
            "limit": result.time_limit.as_secs()
        })
    } else {
        Value::Null
    };

    let reward = match &result.reward {
        Reward::None => Value::Null,
        Reward::NewCard(id) => json!({
            "label": t.t("result.newCardLabel"),
            "card": card_json(id, t)
        }),
        Reward::CollectionComplete => json!({
            "label": t.t("result.allCardsLabel"),
            "card": null
        }),
    };

    json!({
        "title": result_title(result, t),
        "score": result.score,
        "total": result.total,
        "success": result.success,
        "timeUp": result.time_up,
        "time": time,
        "reward": reward,
        "mistakes": result.mistakes().count(),
        "problemsLabel": t.t("result.problemsLabel"),
        "problems": result.log.iter().map(log_row).collect::<Vec<_>>()
    })
}

/// Payload for the treasure box: every catalog card, locked or not.
pub fn to_client_collection(collection: &Collection, t: &Translator) -> Value {
    let cards: Vec<Value> = CATALOG
        .iter()
        .map(|card| {
            json!({
                "id": card.id,
                "emoji": card.emoji,
                "color": card.color,
                "label": t.t(&card.name_key()),
                "locked": !collection.is_unlocked(card.id)
            })
        })
        .collect();
    Value::Array(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::locale::Locale;
    use crate::drill_engine::models::ScoreBand;
    use std::time::Duration;

    fn entry(index: usize, a: u8, b: u8, user_answer: Option<u32>) -> ProblemLogEntry {
        let answer = a as u32 * b as u32;
        ProblemLogEntry { index, a, b, answer, user_answer, correct: user_answer == Some(answer) }
    }

    fn result(reward: Reward, elapsed_ms: u64, time_up: bool) -> SessionResult {
        SessionResult {
            score: 1,
            total: 2,
            band: ScoreBand::Medium,
            success: false,
            time_up,
            elapsed: Duration::from_millis(elapsed_ms),
            time_limit: Duration::from_secs(60),
            log: vec![entry(1, 3, 4, Some(12)), entry(2, 6, 7, None)],
            reward,
        }
    }

    #[test]
    fn title_uses_band_label() {
        let t = Translator::new(Locale::En);
        assert_eq!(result_title(&result(Reward::None, 1_000, false), &t), "1 / 2 - not bad");
    }

    #[test]
    fn wrong_rows_carry_expected_answer() {
        let t = Translator::new(Locale::En);
        let payload = to_client_result(&result(Reward::None, 1_000, false), &t);
        let rows = payload["problems"].as_array().unwrap();
        assert_eq!(rows[0]["expression"], "3×4");
        assert!(rows[0].get("expected").is_none());
        assert_eq!(rows[1]["given"], Value::Null);
        assert_eq!(rows[1]["expected"], 42);
        assert_eq!(payload["mistakes"], 1);
        assert_eq!(payload["time"], Value::Null);
    }

    #[test]
    fn late_runs_show_the_time_line() {
        let t = Translator::new(Locale::Fr);
        let payload = to_client_result(&result(Reward::None, 60_040, true), &t);
        assert_eq!(payload["time"]["elapsed"], "60.04s");
        assert_eq!(payload["time"]["label"], "Temps :");
    }

    #[test]
    fn reward_payloads() {
        let t = Translator::new(Locale::En);
        let new_card = to_client_result(&result(Reward::NewCard("c2".into()), 1_000, false), &t);
        assert_eq!(new_card["reward"]["card"]["label"], "Rocket");
        let complete = to_client_result(&result(Reward::CollectionComplete, 1_000, false), &t);
        assert_eq!(complete["reward"]["card"], Value::Null);
    }

    #[test]
    fn collection_marks_locked_cards() {
        let t = Translator::new(Locale::En);
        let collection = Collection::new(["c1".to_string()].into());
        let payload = to_client_collection(&collection, &t);
        let cards = payload.as_array().unwrap();
        assert_eq!(cards.len(), CATALOG.len());
        assert_eq!(cards[0]["locked"], false);
        assert_eq!(cards[1]["locked"], true);
    }
}
