//! A local fake model for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use color_advisor_model::{
    ErrorKind, ModelCompletion, ModelProvider, ModelProviderError,
    ModelRequest,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    steps: Vec<PresetResponse>,
    next_step: usize,
    // Failed attempts on the current step.
    step_attempts: u64,
    requests: Vec<ModelRequest>,
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how
/// the model should reply to each successive request. A step is consumed
/// once it produces a successful reply; injected failures keep the
/// script on the same step. If there are no enough steps in the script,
/// an error will be returned.
///
/// Clones share the same script, so a test can keep one handle to
/// inspect the recorded requests after handing another to the code under
/// test.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_response(&self, preset: PresetResponse) {
        self.script().steps.push(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns every request received so far, failed attempts included.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.script().requests.clone()
    }

    /// Returns the number of requests received so far.
    pub fn attempts(&self) -> usize {
        self.script().requests.len()
    }

    /// Returns the prompt of the most recent request.
    pub fn last_prompt(&self) -> Option<String> {
        self.script().requests.last().map(|req| req.prompt.clone())
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_result(&self, req: &ModelRequest) -> Result<ModelCompletion, Error> {
        let mut script = self.script();
        script.requests.push(req.clone());

        let Some(step) = script.steps.get(script.next_step).cloned() else {
            return Err(Error {
                message: "no enough steps",
                kind: ErrorKind::Other,
            });
        };

        if step.should_fail(script.step_attempts) {
            script.step_attempts += 1;
            return Err(Error {
                message: "injected failure",
                kind: step.failure_kind,
            });
        }

        script.next_step += 1;
        script.step_attempts = 0;
        Ok(ModelCompletion {
            text: step.text,
            finish_reason: step.finish_reason,
        })
    }
}

impl Debug for TestModelProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let script = self.script();
        f.debug_struct("TestModelProvider")
            .field("steps", &script.steps.len())
            .field("next_step", &script.next_step)
            .field("delay", &self.delay)
            .finish()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn complete(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelCompletion, Self::Error>> + Send + 'static
    {
        let result = self.next_result(req);
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        async move {
            sleep(delay).await;
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_complete() {
        let provider = TestModelProvider::default();
        provider.add_response(PresetResponse::with_text("Hello, world!"));
        provider.add_response(PresetResponse::with_text("Sure, let me look."));

        let completion =
            provider.complete(&ModelRequest::new("Hi")).await.unwrap();
        assert_eq!(completion.text, "Hello, world!");

        let completion = provider
            .complete(&ModelRequest::new("Check my colors"))
            .await
            .unwrap();
        assert_eq!(completion.text, "Sure, let me look.");

        assert_eq!(provider.attempts(), 2);
        assert_eq!(provider.last_prompt().as_deref(), Some("Check my colors"));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let provider = TestModelProvider::default();
        provider.add_response(PresetResponse::with_text("ok").with_failures(2));

        let req = ModelRequest::new("Hi");
        for _ in 0..2 {
            let err = provider.complete(&req).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unavailable);
        }
        assert_eq!(provider.complete(&req).await.unwrap().text, "ok");
        assert_eq!(provider.attempts(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_script() {
        let provider = TestModelProvider::default();
        let handle = provider.clone();
        provider.add_response(PresetResponse::with_text("shared"));

        handle.complete(&ModelRequest::new("Hi")).await.unwrap();
        assert_eq!(provider.attempts(), 1);
    }

    #[tokio::test]
    async fn test_script_exhausted() {
        let provider = TestModelProvider::default();
        let err = provider
            .complete(&ModelRequest::new("Hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
