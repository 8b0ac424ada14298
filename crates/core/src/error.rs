use color_advisor_model::ErrorKind;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// A stable, machine-readable code for a failed advisor operation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The chat message was missing or empty.
    MessageRequired,
    /// The model call failed, after retries where applicable.
    ChatFailed,
    /// The analysis input was malformed.
    InvalidInput,
    /// No assistant turn carried a parseable analysis.
    AnalysisNotFound,
    /// The analysis failed for an unexpected reason.
    AnalysisFailed,
}

/// The error returned by [`Advisor::chat`](crate::Advisor::chat).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The message was empty.
    #[error("Message is required")]
    MessageRequired,
    /// The model could not produce a reply.
    #[error("{message}")]
    Failed {
        /// What the model provider reported.
        kind: ErrorKind,
        /// The underlying error message.
        message: String,
    },
}

impl ChatError {
    /// Returns the code of this error.
    #[inline]
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::MessageRequired => ErrorCode::MessageRequired,
            ChatError::Failed { .. } => ErrorCode::ChatFailed,
        }
    }
}

/// The error returned by the analysis extractor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The conversation history was not a sequence.
    #[error("{0}")]
    InvalidInput(String),
    /// No assistant turn carried a parseable analysis.
    #[error("No analysis JSON found in conversation history")]
    NotFound,
    /// The operation failed as a whole.
    #[error("{0}")]
    Failed(String),
}

impl AnalysisError {
    /// Returns the code of this error.
    #[inline]
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::InvalidInput(_) => ErrorCode::InvalidInput,
            AnalysisError::NotFound => ErrorCode::AnalysisNotFound,
            AnalysisError::Failed(_) => ErrorCode::AnalysisFailed,
        }
    }
}

impl From<crate::conversation::InvalidHistory> for AnalysisError {
    #[inline]
    fn from(err: crate::conversation::InvalidHistory) -> Self {
        AnalysisError::InvalidInput(err.to_string())
    }
}
