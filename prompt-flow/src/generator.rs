use async_trait::async_trait;

use crate::error::Result;

/// Hosted text-completion call.
///
/// Implementations send `prompt` to `model_id` with a `max_tokens` budget and
/// return the raw reply text. Callers must not trust the shape of that text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, model_id: &str, max_tokens: u64) -> Result<String>;
}

#[cfg(feature = "rig")]
pub use openrouter::OpenRouterGenerator;

#[cfg(feature = "rig")]
mod openrouter {
    use async_trait::async_trait;
    use rig::{client::CompletionClient, completion::Prompt, providers::openrouter};
    use tracing::{debug, error};

    use super::TextGenerator;
    use crate::error::{FlowError, Result};

    /// [`TextGenerator`] backed by OpenRouter through rig.
    ///
    /// Builds a fresh agent per call so one generator serves every model id
    /// and token budget. No retries and no explicit timeout.
    pub struct OpenRouterGenerator {
        client: openrouter::Client,
    }

    impl OpenRouterGenerator {
        pub fn new(api_key: &str) -> Self {
            Self {
                client: openrouter::Client::new(api_key),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for OpenRouterGenerator {
        async fn generate(&self, prompt: &str, model_id: &str, max_tokens: u64) -> Result<String> {
            debug!(model = %model_id, max_tokens, "Sending completion request");

            let agent = self.client.agent(model_id).max_tokens(max_tokens).build();
            agent.prompt(prompt).await.map_err(|e| {
                error!(model = %model_id, error = %e, "Completion request failed");
                FlowError::Generation(e.to_string())
            })
        }
    }
}
