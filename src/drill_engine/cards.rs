//! Collectible reward cards.
//!
//! The catalog is fixed. Which cards are unlocked is the only state that
//! survives between runs; it is stored as a JSON array of ids under
//! [`UNLOCKED_CARDS_KEY`].

use std::collections::BTreeSet;

use rand::Rng;
use serde::Serialize;

use crate::drill_engine::{error::StorageError, storage::Storage};

pub const UNLOCKED_CARDS_KEY: &str = "multiplication_unlocked_cards_v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
}

impl Card {
    /// Translation key for the card's display name.
    pub fn name_key(&self) -> String {
        format!("cards.{}", self.id)
    }
}

pub static CATALOG: [Card; 18] = [
    Card { id: "c1",  emoji: "🌟", color: "#f59e0b" },
    Card { id: "c2",  emoji: "🚀", color: "#06b6d4" },
    Card { id: "c3",  emoji: "🧰", color: "#ef4444" },
    Card { id: "c4",  emoji: "🏅", color: "#10b981" },
    Card { id: "c5",  emoji: "👑", color: "#f97316" },
    Card { id: "c6",  emoji: "🦄", color: "#8b5cf6" },
    Card { id: "c7",  emoji: "💎", color: "#3b82f6" },
    Card { id: "c8",  emoji: "🪐", color: "#06b6d4" },
    Card { id: "c9",  emoji: "🌈", color: "#22c55e" },
    Card { id: "c10", emoji: "⚡", color: "#f59e0b" },
    Card { id: "c11", emoji: "❤️", color: "#ef4444" },
    Card { id: "c12", emoji: "📚", color: "#3b82f6" },
    Card { id: "c13", emoji: "🧪", color: "#a78bfa" },
    Card { id: "c14", emoji: "🐿️", color: "#a3a3a3" },
    Card { id: "c15", emoji: "🦋", color: "#ec4899" },
    Card { id: "c16", emoji: "🏔️", color: "#64748b" },
    Card { id: "c17", emoji: "🔥", color: "#f97316" },
    Card { id: "c18", emoji: "🌙", color: "#94a3b8" },
];

pub fn find_card(id: &str) -> Option<&'static Card> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Read the persisted set. A missing key is an empty set, not an error.
pub fn load_unlocked(storage: &dyn Storage) -> Result<BTreeSet<String>, StorageError> {
    match storage.get_item(UNLOCKED_CARDS_KEY)? {
        Some(raw) => Ok(serde_json::from_str::<Vec<String>>(&raw)?.into_iter().collect()),
        None => Ok(BTreeSet::new()),
    }
}

pub fn save_unlocked(
    storage: &mut dyn Storage,
    unlocked: &BTreeSet<String>,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(unlocked)?;
    storage.set_item(UNLOCKED_CARDS_KEY, &raw)
}

/// The learner's collection: catalog plus the unlocked ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    unlocked: BTreeSet<String>,
}

impl Collection {
    pub fn new(unlocked: BTreeSet<String>) -> Self {
        Collection { unlocked }
    }

    pub fn unlocked(&self) -> &BTreeSet<String> {
        &self.unlocked
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn locked(&self) -> Vec<&'static Card> {
        CATALOG.iter().filter(|c| !self.is_unlocked(c.id)).collect()
    }

    pub fn is_complete(&self) -> bool {
        CATALOG.iter().all(|c| self.is_unlocked(c.id))
    }

    /// Unlock one locked card, chosen uniformly. `None` once all are owned.
    pub fn unlock_random<R: Rng>(&mut self, rng: &mut R) -> Option<&'static Card> {
        let locked = self.locked();
        if locked.is_empty() {
            return None;
        }
        let pick = locked[rng.gen_range(0..locked.len())];
        self.unlocked.insert(pick.id.to_string());
        Some(pick)
    }

    pub fn clear(&mut self) {
        self.unlocked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::storage::MemoryStorage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: BTreeSet<_> = CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn unlocking_never_repeats() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut collection = Collection::default();
        let mut seen = BTreeSet::new();
        for _ in 0..CATALOG.len() {
            let card = collection.unlock_random(&mut rng).unwrap();
            assert!(seen.insert(card.id), "card {} unlocked twice", card.id);
        }
        assert!(collection.is_complete());
        assert_eq!(collection.unlock_random(&mut rng), None);
        assert_eq!(collection.unlocked().len(), CATALOG.len());
    }

    #[test]
    fn last_locked_card_is_the_one_picked() {
        let mut rng = StdRng::seed_from_u64(9);
        let owned = CATALOG.iter().filter(|c| c.id != "c7").map(|c| c.id.to_string()).collect();
        let mut collection = Collection::new(owned);
        assert_eq!(collection.unlock_random(&mut rng).map(|c| c.id), Some("c7"));
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = MemoryStorage::new();
        assert!(load_unlocked(&store).unwrap().is_empty());
    }

    #[test]
    fn corrupt_value_is_an_error() {
        let store = MemoryStorage::new().with_item(UNLOCKED_CARDS_KEY, "[\"c1\",");
        assert!(load_unlocked(&store).is_err());
    }

    #[test]
    fn persisted_layout_is_a_json_array() {
        let mut store = MemoryStorage::new();
        let set: BTreeSet<String> = ["c3".to_string(), "c12".to_string()].into();
        save_unlocked(&mut store, &set).unwrap();
        assert_eq!(
            store.get_item(UNLOCKED_CARDS_KEY).unwrap().as_deref(),
            Some("[\"c12\",\"c3\"]")
        );
        assert_eq!(load_unlocked(&store).unwrap(), set);
    }
}
