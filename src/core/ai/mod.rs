// model providers - one adapter per vendor behind a single trait

mod claude;
mod gemini;
mod openai;

pub use claude::Claude;
pub use gemini::Gemini;
pub use openai::OpenAi;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::Error;
use crate::core::types::{ProviderRequest, Speaker};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// a text completion service. persona placement and history formatting
/// are up to the implementation
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    async fn generate(&self, request: &ProviderRequest) -> Result<String, Error>;

    fn name(&self) -> &str;

    fn model(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    #[value(name = "openai")]
    OpenAI,
    Claude,
    Gemini,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Claude => "claude-sonnet-4-20250514",
            Provider::Gemini => "gemini-2.0-flash",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com",
            Provider::Claude => "https://api.anthropic.com",
            Provider::Gemini => "https://generativelanguage.googleapis.com",
        }
    }

    /// env vars checked for the api key, in order
    pub fn key_vars(self) -> &'static [&'static str] {
        match self {
            Provider::OpenAI => &["OPENAI_API_KEY"],
            Provider::Claude => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY", "CLAUDE_KEY"],
            Provider::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        }
    }

    pub fn api_key_from_env(self) -> Option<String> {
        self.key_vars()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
    }

    pub fn missing_key(self) -> Error {
        let vars = match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Claude => "ANTHROPIC_API_KEY, CLAUDE_API_KEY, or CLAUDE_KEY",
            Provider::Gemini => "GEMINI_API_KEY or GOOGLE_API_KEY",
        };
        Error::MissingApiKey {
            provider: self.name(),
            vars,
        }
    }
}

/// how to reach a provider. built once from the command line
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ProviderSettings {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            api_key: None,
            model: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    fn client(&self) -> Result<reqwest::Client, Error> {
        Ok(reqwest::Client::builder().timeout(self.timeout).build()?)
    }
}

/// build the adapter for the configured provider.
/// fails with `MissingApiKey` when no credential is available
pub fn connect(settings: &ProviderSettings) -> Result<Arc<dyn ProviderAdapter>, Error> {
    let api_key = settings
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| settings.provider.api_key_from_env())
        .ok_or_else(|| settings.provider.missing_key())?;

    let client = settings.client()?;
    let base_url = settings.base_url();
    let model = settings.model().to_string();

    let adapter: Arc<dyn ProviderAdapter> = match settings.provider {
        Provider::OpenAI => Arc::new(OpenAi::new(client, api_key, base_url, model)),
        Provider::Claude => Arc::new(Claude::new(client, api_key, base_url, model)),
        Provider::Gemini => Arc::new(Gemini::new(client, api_key, base_url, model)),
    };

    Ok(adapter)
}

// non-2xx bodies become provider errors, the text is only ever logged
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Provider(format!("{status}: {body}")))
}

fn role(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "user",
        Speaker::Assistant => "assistant",
    }
}
