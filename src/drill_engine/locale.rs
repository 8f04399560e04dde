//! Display strings.
//!
//! The engine itself only needs the score-band labels and card names; both
//! are looked up here by stable dotted keys (`scores.perfect`, `cards.c7`).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::drill_engine::{error::StorageError, storage::Storage};

pub const LANGUAGE_KEY: &str = "multiplication_lang";

const EN: &str = include_str!("../../locales/en.json");
const FR: &str = include_str!("../../locales/fr.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Fr,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Locale> {
        match tag {
            "en" => Some(Locale::En),
            "fr" => Some(Locale::Fr),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A saved preference wins. Otherwise French for any `fr*` system tag,
/// English for everything else.
pub fn detect_preferred_locale(saved: Option<&str>, system: Option<&str>) -> Locale {
    if let Some(locale) = saved.and_then(Locale::from_tag) {
        return locale;
    }
    match system {
        Some(tag) if tag.to_ascii_lowercase().starts_with("fr") => Locale::Fr,
        _ => Locale::En,
    }
}

pub fn load_saved_locale(storage: &dyn Storage) -> Result<Option<String>, StorageError> {
    storage.get_item(LANGUAGE_KEY)
}

pub fn save_locale(storage: &mut dyn Storage, locale: Locale) -> Result<(), StorageError> {
    storage.set_item(LANGUAGE_KEY, locale.tag())
}

/// Resolves keys against one locale's resource tree.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    resources: Value,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        let raw = match locale {
            Locale::En => EN,
            Locale::Fr => FR,
        };
        let resources = serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("failed to parse {} resources: {}", locale, e);
            Value::Null
        });
        Translator { locale, resources }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Walk the dotted path. Missing entries translate to the key itself.
    pub fn t(&self, key: &str) -> String {
        let mut node = &self.resources;
        for part in key.split('.') {
            match node.get(part) {
                Some(next) => node = next,
                None => return key.to_string(),
            }
        }
        match node {
            Value::String(s) => s.clone(),
            _ => key.to_string(),
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Translator::new(Locale::default())
    }
}
