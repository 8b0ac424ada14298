use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The model endpoint is temporarily unavailable. This is the only
    /// kind that callers may consider retrying.
    Unavailable,
    /// The content is moderated.
    Moderated,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// Any other errors.
    Other,
}

impl ErrorKind {
    /// Classifies a non-success HTTP status returned by a model endpoint.
    #[inline]
    pub fn from_http_status(status: u16) -> Self {
        match status {
            503 => ErrorKind::Unavailable,
            429 => ErrorKind::RateLimitExceeded,
            _ => ErrorKind::Other,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unavailable => write!(f, "Service unavailable"),
            ErrorKind::Moderated => write!(f, "Content moderated"),
            ErrorKind::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_http_status() {
        assert_eq!(ErrorKind::from_http_status(503), ErrorKind::Unavailable);
        assert_eq!(
            ErrorKind::from_http_status(429),
            ErrorKind::RateLimitExceeded
        );
        assert_eq!(ErrorKind::from_http_status(500), ErrorKind::Other);
        assert_eq!(ErrorKind::from_http_status(502), ErrorKind::Other);
    }
}
