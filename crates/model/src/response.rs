use serde::{Deserialize, Serialize};

/// The reason why a model completion has finished.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum ModelFinishReason {
    /// The model has finished generating text.
    Stop,
    /// The output was cut off by the token limit.
    Length,
    /// The output was cut off by a content filter.
    ContentFilter,
    /// Any reason the provider reports that is not listed above.
    Other,
}

/// A completely received, non-streaming completion.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelCompletion {
    /// The generated text.
    pub text: String,
    /// The reason the model finished generating, if reported.
    pub finish_reason: Option<ModelFinishReason>,
}

impl ModelCompletion {
    /// Creates a completion that finished normally.
    #[inline]
    pub fn stopped<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some(ModelFinishReason::Stop),
        }
    }

    /// Returns `true` if the output was truncated before the model
    /// finished.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(
            self.finish_reason,
            Some(ModelFinishReason::Length | ModelFinishReason::ContentFilter)
        )
    }
}
