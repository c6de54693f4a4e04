use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Output language requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Km,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Km, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Km => "km",
            Language::En => "en",
        }
    }

    /// Exact match on the two supported codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "km" => Some(Language::Km),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Name embedded in prompts as the target language tag.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Km => "Khmer",
            Language::En => "English",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::En)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Deserializer for request bodies: a missing, null, non-string or unknown
/// tag resolves to [`Language::Km`].
///
/// Use with `#[serde(default, deserialize_with = "prompt_flow::language::lenient")]`.
pub fn lenient<'de, D>(deserializer: D) -> Result<Language, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<Value>::deserialize(deserializer)?;
    Ok(match tag {
        Some(Value::String(code)) => Language::from_code(&code).unwrap_or_default(),
        _ => Language::default(),
    })
}
