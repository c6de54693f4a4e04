use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{FlowError, Result};
use crate::generator::TextGenerator;

/// One recorded call to [`MockTextGenerator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationCall {
    pub prompt: String,
    pub model_id: String,
    pub max_tokens: u64,
}

/// Scripted [`TextGenerator`] for tests and offline runs.
///
/// Replies cycle through the configured responses. With no responses the
/// reply is an empty string, which never parses as JSON.
#[derive(Clone, Default)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<GenerationCall>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Every call fails with [`FlowError::Generation`] carrying `message`.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.lock().unwrap() = Some(message.into());
        self
    }

    pub fn calls(&self) -> Vec<GenerationCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<GenerationCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str, model_id: &str, max_tokens: u64) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(GenerationCall {
                prompt: prompt.to_string(),
                model_id: model_id.to_string(),
                max_tokens,
            });
            calls.len() - 1
        };

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(FlowError::Generation(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(String::new())
        } else {
            Ok(responses[index % responses.len()].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_cycle() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(generator.generate("p", "m", 10).await.unwrap(), "first");
        assert_eq!(generator.generate("p", "m", 10).await.unwrap(), "second");
        assert_eq!(generator.generate("p", "m", 10).await.unwrap(), "first");
        assert_eq!(generator.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failure_is_recorded() {
        let generator = MockTextGenerator::new().failing("rate limited");

        let err = generator.generate("hello", "model-x", 42).await.unwrap_err();
        assert!(matches!(err, FlowError::Generation(msg) if msg == "rate limited"));

        let call = generator.last_call().unwrap();
        assert_eq!(call.prompt, "hello");
        assert_eq!(call.model_id, "model-x");
        assert_eq!(call.max_tokens, 42);
    }

    #[tokio::test]
    async fn test_default_reply_is_empty() {
        let generator = MockTextGenerator::new();
        assert_eq!(generator.generate("p", "m", 1).await.unwrap(), "");
    }
}
