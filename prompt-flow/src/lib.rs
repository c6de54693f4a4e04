pub mod analysis;
pub mod context;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod language;
pub mod mock;
pub mod parse;
pub mod runner;
pub mod storage;

// Re-export commonly used types
pub use analysis::{Analysis, OutputSource};
pub use context::{LANGUAGE_KEY, LanguageContext};
pub use dictionary::{Dictionary, Translations};
pub use error::{FlowError, Result};
#[cfg(feature = "rig")]
pub use generator::OpenRouterGenerator;
pub use generator::TextGenerator;
pub use language::Language;
pub use mock::{GenerationCall, MockTextGenerator};
pub use parse::{ModelOutput, ParseError, parse_model_output};
pub use runner::{AnalysisRunner, Analyzed};
pub use storage::{FilePreferenceStorage, InMemoryPreferenceStorage, PreferenceStorage};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Greeting {
        text: String,
    }

    impl ModelOutput for Greeting {}

    #[derive(Debug, PartialEq, Serialize)]
    struct GreetingResponse {
        text: String,
        echoed: String,
    }

    struct GreetingAnalysis;

    impl Analysis for GreetingAnalysis {
        type Request = String;
        type Output = Greeting;
        type Response = GreetingResponse;

        fn id(&self) -> &str {
            "greeting"
        }

        fn max_tokens(&self) -> u64 {
            64
        }

        fn prompt(&self, request: &String, language: Language) -> String {
            format!("Greet {} in {} as JSON", request, language.display_name())
        }

        fn fallback(&self, _request: &String, language: Language) -> Greeting {
            let text = match language {
                Language::En => "Hello",
                Language::Km => "សួស្តី",
            };
            Greeting {
                text: text.to_string(),
            }
        }

        fn finalize(&self, request: String, _language: Language, output: Greeting) -> GreetingResponse {
            GreetingResponse {
                text: output.text,
                echoed: request,
            }
        }
    }

    #[tokio::test]
    async fn test_model_output_is_used_when_valid() {
        let generator = MockTextGenerator::new().with_response(r#"{"text":"Hi Dara"}"#);
        let runner = AnalysisRunner::new(Arc::new(generator.clone()), "test-model");

        let analyzed = runner
            .run(&GreetingAnalysis, "Dara".to_string(), Language::En)
            .await
            .unwrap();

        assert_eq!(analyzed.source, OutputSource::Model);
        assert_eq!(analyzed.response.text, "Hi Dara");
        assert_eq!(analyzed.response.echoed, "Dara");

        let call = generator.last_call().unwrap();
        assert_eq!(call.model_id, "test-model");
        assert_eq!(call.max_tokens, 64);
        assert!(call.prompt.contains("in English"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_uses_fallback() {
        let generator = MockTextGenerator::new().with_response("Here you go: hello!");
        let runner = AnalysisRunner::new(Arc::new(generator), "test-model");

        let analyzed = runner
            .run(&GreetingAnalysis, "Dara".to_string(), Language::Km)
            .await
            .unwrap();

        assert_eq!(analyzed.source, OutputSource::Fallback);
        assert_eq!(analyzed.response.text, "សួស្តី");
    }

    #[tokio::test]
    async fn test_generation_error_propagates() {
        let generator = MockTextGenerator::new().failing("network down");
        let runner = AnalysisRunner::new(Arc::new(generator), "test-model");

        let err = runner
            .run(&GreetingAnalysis, "Dara".to_string(), Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Generation(_)));
    }
}
