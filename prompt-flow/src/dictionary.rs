use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{error::Result, language::Language};

/// Flat key → localized string table for one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Dictionaries for every supported language
#[derive(Debug, Clone, Default)]
pub struct Translations {
    pub km: Dictionary,
    pub en: Dictionary,
}

impl Translations {
    pub fn new(km: Dictionary, en: Dictionary) -> Self {
        Self { km, en }
    }

    pub fn from_json(km: &str, en: &str) -> Result<Self> {
        Ok(Self {
            km: Dictionary::from_json(km)?,
            en: Dictionary::from_json(en)?,
        })
    }

    pub fn dictionary(&self, language: Language) -> &Dictionary {
        match language {
            Language::Km => &self.km,
            Language::En => &self.en,
        }
    }

    /// Active language first, then English, then the key itself.
    pub fn lookup<'a>(&'a self, language: Language, key: &'a str) -> &'a str {
        self.dictionary(language)
            .get(key)
            .or_else(|| self.en.get(key))
            .unwrap_or(key)
    }
}
