mod builder;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use color_advisor_model::ModelRequest;
use serde::{Deserialize, Serialize};

use crate::analysis::{self, ANALYSIS_SENTINEL, AnalysisResult};
use crate::conversation::ConversationTurn;
use crate::error::{AnalysisError, ChatError};
use crate::model_client::ModelClient;
use crate::prompt::build_prompt;
pub use builder::AdvisorBuilder;

/// The reply to one chat message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// The model's reply, verbatim.
    pub response: String,
    /// Whether the reply carries the analysis marker, meaning the caller
    /// should request an analysis next.
    pub should_analyze: bool,
}

/// A conversational color advisor.
///
/// The advisor holds no conversation state. Callers pass the full visible
/// history with every message, and clones share the same model client.
#[derive(Clone)]
pub struct Advisor {
    model_client: ModelClient,
    persona: Arc<str>,
}

impl Advisor {
    fn from_builder(builder: AdvisorBuilder) -> Self {
        let AdvisorBuilder {
            make_client,
            persona,
            retry_policy,
        } = builder;
        Self {
            model_client: make_client(retry_policy),
            persona,
        }
    }

    /// Returns the persona prepended to every prompt.
    #[inline]
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Sends `message` to the model, with `history` as the conversation so
    /// far.
    pub async fn chat(
        &self,
        message: &str,
        history: &[ConversationTurn],
    ) -> Result<ChatReply, ChatError> {
        if message.is_empty() {
            return Err(ChatError::MessageRequired);
        }

        let prompt = build_prompt(&self.persona, history, message);
        debug!(
            "sending a chat message with {} history turns",
            history.len()
        );
        let completion = self
            .model_client
            .complete(ModelRequest::new(prompt))
            .await
            .map_err(|err| ChatError::Failed {
                kind: err.kind(),
                message: err.to_string(),
            })?;
        if completion.is_truncated() {
            warn!("model reply was cut off: {:?}", completion.finish_reason);
        }

        let should_analyze = completion.text.contains(ANALYSIS_SENTINEL);
        Ok(ChatReply {
            response: completion.text,
            should_analyze,
        })
    }

    /// Extracts the most recent analysis from `history`.
    #[inline]
    pub fn analyze(
        &self,
        history: &[ConversationTurn],
    ) -> Result<AnalysisResult, AnalysisError> {
        analysis::extract_analysis(history)
    }
}
