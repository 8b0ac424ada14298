//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use strum::{Display, EnumString};

/// The secret used when `JWT_SECRET` is unset.
pub const DEFAULT_JWT_SECRET: &str = "demo-secret-key";

/// The hosted model the advisor talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    /// Google's Gemini `generateContent` API.
    Gemini,
    /// Any OpenAI-compatible `/chat/completions` endpoint.
    #[strum(serialize = "openai")]
    OpenAI,
}

impl ProviderKind {
    /// The environment variable holding the API key of this provider.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
        }
    }
}

/// Runtime configuration for the server.
///
/// Every field except the API key has a default, so the server only needs
/// the key of the chosen provider to start.
#[derive(Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Which model vendor to use (default: Gemini).
    pub provider: ProviderKind,

    /// API key of the chosen provider.
    pub api_key: Option<String>,

    /// Model name override. Each provider has its own default.
    pub model: Option<String>,

    /// Endpoint override, e.g. a proxy or a local mock.
    pub base_url: Option<String>,

    /// Per-request timeout for model calls. Unset means no timeout.
    pub timeout: Option<Duration>,

    /// Total attempts per chat message, including the first one.
    pub retry_attempts: u32,

    /// Delay between two attempts.
    pub retry_delay: Duration,

    /// File to load the advisor persona from, instead of the built-in one.
    pub persona_file: Option<PathBuf>,

    /// HS256 secret for verifying bearer tokens.
    pub jwt_secret: String,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let provider = parse_var(&var, "COLOR_ADVISOR_PROVIDER", ProviderKind::Gemini);
        Self {
            bind_address: var("COLOR_ADVISOR_BIND")
                .unwrap_or_else(|| "0.0.0.0:3000".to_owned()),
            log_level: var("COLOR_ADVISOR_LOG")
                .unwrap_or_else(|| "info".to_owned()),
            log_json: var("COLOR_ADVISOR_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            provider,
            api_key: var(provider.api_key_var()),
            model: var("COLOR_ADVISOR_MODEL"),
            base_url: var("COLOR_ADVISOR_BASE_URL"),
            timeout: var("COLOR_ADVISOR_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
            retry_attempts: parse_var(&var, "COLOR_ADVISOR_RETRY_ATTEMPTS", 2),
            retry_delay: Duration::from_millis(parse_var(
                &var,
                "COLOR_ADVISOR_RETRY_DELAY_MS",
                800,
            )),
            persona_file: var("COLOR_ADVISOR_PERSONA_FILE").map(PathBuf::from),
            jwt_secret: var("JWT_SECRET")
                .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_owned()),
        }
    }

    /// Returns `true` if tokens are verified with the built-in secret.
    #[inline]
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<deducted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay", &self.retry_delay)
            .field("persona_file", &self.persona_file)
            .field("jwt_secret", &"<deducted>")
            .finish()
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_var<T: FromStr>(
    var: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    var(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
