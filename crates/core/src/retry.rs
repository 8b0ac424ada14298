//! Retrying transient model failures.

use std::time::Duration;

use backoff::backoff::Constant;
use color_advisor_model::{
    ErrorKind, ModelCompletion, ModelProvider, ModelProviderError,
    ModelRequest,
};

/// How the advisor retries a completion request.
///
/// Only [`ErrorKind::Unavailable`] failures are retried, each after the
/// same fixed delay. The default allows two attempts 800ms apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` counts the first attempt and is
    /// clamped to at least one.
    #[inline]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A policy that never retries.
    #[inline]
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Total attempts, including the first one.
    #[inline]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between two attempts.
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    #[inline]
    fn default() -> Self {
        Self::new(2, Duration::from_millis(800))
    }
}

/// Sends `req`, retrying unavailable responses per `policy`.
pub(crate) async fn complete_with_retry<P: ModelProvider>(
    provider: &P,
    req: &ModelRequest,
    policy: RetryPolicy,
) -> Result<ModelCompletion, P::Error> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;
    backoff::future::retry_notify(
        Constant::new(policy.delay()),
        || {
            attempt += 1;
            let this_attempt = attempt;
            let fut = provider.complete(req);
            async move {
                fut.await.map_err(|err| {
                    if err.kind() == ErrorKind::Unavailable
                        && this_attempt < max_attempts
                    {
                        backoff::Error::transient(err)
                    } else {
                        backoff::Error::permanent(err)
                    }
                })
            }
        },
        |err: P::Error, delay: Duration| {
            warn!("model is unavailable ({err}), retrying in {delay:?}");
        },
    )
    .await
}
