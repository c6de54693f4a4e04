//! AnalysisRunner – drives one [`Analysis`] through a single request:
//! render prompt → one completion call → strict parse → fallback on rejection → finalize.
//!
//! A failing completion call is returned to the caller untouched. A reply that
//! fails to parse is never surfaced; the analysis fallback replaces it.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    analysis::{Analysis, OutputSource},
    error::Result,
    generator::TextGenerator,
    language::Language,
    parse::parse_model_output,
};

/// Finalized response plus where its content came from
#[derive(Debug)]
pub struct Analyzed<R> {
    pub response: R,
    pub source: OutputSource,
}

/// Shared, cheap-to-clone executor for analyses.
#[derive(Clone)]
pub struct AnalysisRunner {
    generator: Arc<dyn TextGenerator>,
    model_id: String,
}

impl AnalysisRunner {
    pub fn new(generator: Arc<dyn TextGenerator>, model_id: impl Into<String>) -> Self {
        Self {
            generator,
            model_id: model_id.into(),
        }
    }

    pub async fn run<A: Analysis>(
        &self,
        analysis: &A,
        request: A::Request,
        language: Language,
    ) -> Result<Analyzed<A::Response>> {
        let prompt = analysis.prompt(&request, language);

        info!(
            analysis = %analysis.id(),
            language = %language,
            model = %self.model_id,
            prompt_length = prompt.len(),
            "Requesting completion"
        );

        let text = self
            .generator
            .generate(&prompt, &self.model_id, analysis.max_tokens())
            .await?;

        let (output, source) = match parse_model_output::<A::Output>(&text) {
            Ok(output) => (output, OutputSource::Model),
            Err(e) => {
                warn!(
                    analysis = %analysis.id(),
                    error = %e,
                    reply_length = text.len(),
                    "Model reply rejected, using fallback"
                );
                (analysis.fallback(&request, language), OutputSource::Fallback)
            }
        };

        info!(analysis = %analysis.id(), source = ?source, "Analysis complete");

        Ok(Analyzed {
            response: analysis.finalize(request, language, output),
            source,
        })
    }
}
