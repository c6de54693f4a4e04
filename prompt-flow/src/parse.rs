use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a model reply was rejected
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("reply is not valid JSON for the expected shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("reply failed validation: {0}")]
    Schema(String),
}

/// Typed shape a model reply must take.
///
/// Deserialization enforces field presence and enum values; `validate` adds
/// any constraint serde cannot express.
pub trait ModelOutput: DeserializeOwned + Send {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Strictly parse model text into `T`.
///
/// Surrounding whitespace is tolerated. Prose around the JSON, code fences and
/// truncated output are all rejected.
pub fn parse_model_output<T: ModelOutput>(text: &str) -> Result<T, ParseError> {
    let parsed: T = serde_json::from_str(text.trim())?;
    parsed.validate().map_err(ParseError::Schema)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Verdict {
        label: String,
        score: u8,
    }

    impl ModelOutput for Verdict {
        fn validate(&self) -> Result<(), String> {
            if self.label.trim().is_empty() {
                return Err("label is empty".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn test_parses_valid_json() {
        let verdict: Verdict = parse_model_output("  {\"label\":\"ok\",\"score\":3}\n").unwrap();
        assert_eq!(verdict.label, "ok");
        assert_eq!(verdict.score, 3);
    }

    #[test]
    fn test_rejects_prose_wrapping() {
        let err = parse_model_output::<Verdict>("Sure! {\"label\":\"ok\",\"score\":3}").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_rejects_code_fence() {
        let text = "```json\n{\"label\":\"ok\",\"score\":3}\n```";
        assert!(parse_model_output::<Verdict>(text).is_err());
    }

    #[test]
    fn test_rejects_truncation_and_missing_fields() {
        assert!(parse_model_output::<Verdict>("{\"label\":\"ok\",\"sco").is_err());
        assert!(parse_model_output::<Verdict>("{\"label\":\"ok\"}").is_err());
    }

    #[test]
    fn test_validation_failure() {
        let err = parse_model_output::<Verdict>("{\"label\":\" \",\"score\":1}").unwrap_err();
        assert!(matches!(err, ParseError::Schema(_)));
    }
}
