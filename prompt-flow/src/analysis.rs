use serde::Serialize;

use crate::{language::Language, parse::ModelOutput};

/// Where the analysis output came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSource {
    /// The model reply parsed and validated
    Model,
    /// The reply was rejected and the static fallback was used
    Fallback,
}

/// One prompt-and-fallback endpoint.
///
/// An analysis turns a request into a prompt, supplies a fallback for when the
/// model reply is unusable, and decorates whichever output it ends up with.
pub trait Analysis: Send + Sync {
    type Request: Send;
    type Output: ModelOutput;
    type Response: Serialize + Send;

    /// Identifier used in logs
    fn id(&self) -> &str;

    /// Token budget for the completion call
    fn max_tokens(&self) -> u64;

    /// Instruction sent to the model
    fn prompt(&self, request: &Self::Request, language: Language) -> String;

    /// Static output used when the reply does not parse.
    ///
    /// Must depend only on `language` and on request fields the analysis
    /// chooses to echo.
    fn fallback(&self, request: &Self::Request, language: Language) -> Self::Output;

    /// Merge synthetic display data into the output
    fn finalize(
        &self,
        request: Self::Request,
        language: Language,
        output: Self::Output,
    ) -> Self::Response;
}
