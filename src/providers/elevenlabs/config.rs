use std::env::VarError;
use std::fmt::{self, Debug};

use super::error::{ElevenLabsError, Result};

pub const ELEVENLABS_API_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// The environment variable read by [`ElevenLabsConfig::from_env`].
pub const ELEVENLABS_API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Client configuration. Built once at startup and never changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ElevenLabsConfig {
    api_key: String,
}

impl Debug for ElevenLabsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevenLabsConfig")
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl ElevenLabsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var(ELEVENLABS_API_KEY_ENV))
    }

    fn from_env_value(value: std::result::Result<String, VarError>) -> Result<Self> {
        match value {
            Ok(api_key) if !api_key.is_empty() => Ok(Self::new(api_key)),
            _ => Err(ElevenLabsError::Config(format!(
                "expected {ELEVENLABS_API_KEY_ENV} to exist as an environment variable"
            ))),
        }
    }

    /// Build the configuration from a one-shot asynchronous initializer.
    ///
    /// Anything the factory needs (a secrets manager handle, another config
    /// value, ...) is captured by the closure.
    ///
    /// ```no_run
    /// use elevenlabs_client::providers::elevenlabs::ElevenLabsConfig;
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let secret = String::from("my-key");
    /// let config = ElevenLabsConfig::from_factory(move || async move {
    ///     Ok::<_, anyhow::Error>(ElevenLabsConfig::new(secret))
    /// })
    /// .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from_factory<F, Fut>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<ElevenLabsConfig>>,
    {
        Ok(factory().await?)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
