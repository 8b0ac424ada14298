/// A request to be sent to the model provider.
///
/// The advisor always talks to the model with one flattened text prompt
/// that already embeds the persona and the conversation so far.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelRequest {
    /// The complete prompt text.
    pub prompt: String,
}

impl ModelRequest {
    /// Creates a request with the given prompt.
    #[inline]
    pub fn new<S: Into<String>>(prompt: S) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}
