use prompt_flow::{FlowError, LanguageContext, PreferenceStorage, Translations};
use std::sync::Arc;

use crate::error::ServiceError;

const KM: &str = include_str!("../data/translations/km.json");
const EN: &str = include_str!("../data/translations/en.json");

/// Dictionaries shipped with the service
pub fn builtin() -> Result<Translations, FlowError> {
    Translations::from_json(KM, EN)
}

/// Language context over the builtin dictionaries, restored from `storage`
pub async fn language_context(
    storage: Arc<dyn PreferenceStorage>,
) -> Result<LanguageContext, ServiceError> {
    let translations = Arc::new(builtin()?);
    Ok(LanguageContext::load(storage, translations).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_flow::Language;
    use std::collections::BTreeSet;

    #[test]
    fn test_builtin_dictionaries_share_keys() {
        let translations = builtin().unwrap();
        let km: BTreeSet<&str> = translations.km.keys().collect();
        let en: BTreeSet<&str> = translations.en.keys().collect();

        assert!(!en.is_empty());
        assert_eq!(km, en);
    }

    #[test]
    fn test_builtin_error_strings() {
        let translations = builtin().unwrap();
        assert_eq!(
            translations.lookup(Language::En, "symptoms.error"),
            "Failed to analyze your symptoms. Please try again."
        );
        assert_ne!(
            translations.lookup(Language::Km, "symptoms.error"),
            "symptoms.error"
        );
    }
}
