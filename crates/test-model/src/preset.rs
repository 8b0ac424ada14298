use color_advisor_model::{ErrorKind, ModelFinishReason};
use serde::{Deserialize, Serialize};

/// The preset reply for one completion step.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetResponse {
    /// Text of the reply.
    pub text: String,
    /// Finish reason reported with the reply.
    #[serde(default)]
    pub finish_reason: Option<ModelFinishReason>,
    /// If set, the request will fail in the first `failures` attempts.
    /// `Some(0)` means the request will fail infinitely.
    #[serde(default)]
    pub failures: Option<u64>,
    /// The kind reported by injected failures.
    #[serde(default = "default_failure_kind")]
    pub failure_kind: ErrorKind,
}

fn default_failure_kind() -> ErrorKind {
    ErrorKind::Unavailable
}

impl PresetResponse {
    /// Creates a `PresetResponse` with the specified text.
    #[inline]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some(ModelFinishReason::Stop),
            failures: None,
            failure_kind: default_failure_kind(),
        }
    }

    /// Sets failure times before a successful response. `0` means the
    /// response will always be a failure.
    #[inline]
    pub fn with_failures(mut self, failures: u64) -> Self {
        self.failures = Some(failures);
        self
    }

    /// Sets the kind reported by the injected failures.
    #[inline]
    pub fn with_failure_kind(mut self, kind: ErrorKind) -> Self {
        self.failure_kind = kind;
        self
    }

    /// Sets the finish reason of the reply.
    #[inline]
    pub fn with_finish_reason(mut self, reason: ModelFinishReason) -> Self {
        self.finish_reason = Some(reason);
        self
    }

    pub(crate) fn should_fail(&self, attempt: u64) -> bool {
        match self.failures {
            None => false,
            Some(0) => true,
            Some(failures) => attempt < failures,
        }
    }
}
