use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    dictionary::Translations, error::Result, language::Language, storage::PreferenceStorage,
};

/// Storage key holding the selected language code
pub const LANGUAGE_KEY: &str = "language";

/// Active language plus the dictionaries used to localize strings.
///
/// Created once from storage and handed explicitly to whatever needs to
/// localize text. Changing the language writes through to storage.
#[derive(Clone)]
pub struct LanguageContext {
    language: Language,
    translations: Arc<Translations>,
    storage: Arc<dyn PreferenceStorage>,
}

impl LanguageContext {
    /// Load the persisted language, keeping [`Language::Km`] when nothing
    /// valid is stored.
    pub async fn load(
        storage: Arc<dyn PreferenceStorage>,
        translations: Arc<Translations>,
    ) -> Result<Self> {
        let language = match storage.get(LANGUAGE_KEY).await? {
            Some(code) => Language::from_code(&code).unwrap_or_else(|| {
                warn!(stored = %code, "Ignoring unsupported stored language");
                Language::default()
            }),
            None => Language::default(),
        };
        debug!(language = %language, "Language context loaded");

        Ok(Self {
            language,
            translations,
            storage,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub async fn set_language(&mut self, language: Language) -> Result<()> {
        self.storage.set(LANGUAGE_KEY, language.code()).await?;
        self.language = language;
        Ok(())
    }

    /// Resolve `key` in the active language, then English, then return it raw.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.lookup(self.language, key)
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }
}
