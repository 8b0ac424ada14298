use std::sync::Arc;

use color_advisor_model::ModelProvider;

use super::Advisor;
use crate::model_client::ModelClient;
use crate::prompt::DEFAULT_PERSONA;
use crate::retry::RetryPolicy;

type MakeClientFn = Box<dyn FnOnce(RetryPolicy) -> ModelClient + Send>;

/// [`Advisor`] builder.
pub struct AdvisorBuilder {
    pub(crate) make_client: MakeClientFn,
    pub(crate) persona: Arc<str>,
    pub(crate) retry_policy: RetryPolicy,
}

impl AdvisorBuilder {
    /// Creates a new builder with the specified model provider, the
    /// built-in persona and the default retry policy.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            make_client: Box::new(move |policy| {
                ModelClient::new(provider, policy)
            }),
            persona: Arc::from(DEFAULT_PERSONA),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Replaces the persona prepended to every prompt.
    #[inline]
    pub fn with_persona<S: Into<Arc<str>>>(mut self, persona: S) -> Self {
        self.persona = persona.into();
        self
    }

    /// Replaces the retry policy.
    #[inline]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Builds the advisor.
    #[inline]
    pub fn build(self) -> Advisor {
        Advisor::from_builder(self)
    }
}
