use std::pin::Pin;
use std::sync::Arc;

use color_advisor_model::{
    ModelCompletion, ModelProvider, ModelProviderError, ModelRequest,
};
use tracing::Instrument;

use crate::retry::{RetryPolicy, complete_with_retry};

type CompleteResult = Result<ModelCompletion, Box<dyn ModelProviderError>>;
type BoxedCompleteFuture =
    Pin<Box<dyn Future<Output = CompleteResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ModelRequest) -> BoxedCompleteFuture + Send + Sync>;

/// A wrapper around a model provider that applies the retry policy and
/// provides a type-erased interface for the other modules.
#[derive(Clone)]
pub(crate) struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    #[inline]
    pub fn new<P: ModelProvider + 'static>(
        provider: P,
        policy: RetryPolicy,
    ) -> Self {
        // We have to erase the type `P`, since `ModelClient` doesn't have a
        // generic parameter and we don't want it either.
        let provider = Arc::new(provider);
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let provider = Arc::clone(&provider);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    match complete_with_retry(&*provider, &req, policy).await {
                        Ok(completion) => {
                            trace!("finished a request");
                            Ok(completion)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ModelProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("model client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the completion once it has been fully
    /// received, retrying transient failures.
    #[inline]
    pub async fn complete(&self, req: ModelRequest) -> CompleteResult {
        (self.handler_fn)(req).await
    }
}
