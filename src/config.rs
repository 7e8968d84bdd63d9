// runtime configuration, resolved once at startup

use std::path::PathBuf;

use crate::Error;
use crate::core::PersonaConfig;
use crate::core::ai::ProviderSettings;

/// status code sent when the provider failed and the fallback reply went out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FallbackStatus {
    /// 200 with the normal reply shape
    #[default]
    Ok,
    /// 500 with an error field next to the reply
    Error,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderSettings,
    pub persona: PersonaConfig,
    pub fallback_status: FallbackStatus,
}

impl Config {
    pub fn new(provider: ProviderSettings, persona: PersonaConfig) -> Self {
        Self {
            provider,
            persona,
            fallback_status: FallbackStatus::default(),
        }
    }
}

/// build the persona from an optional prompt file plus sampling settings
pub fn load_persona(
    file: Option<&PathBuf>,
    max_output_tokens: u32,
    temperature: f32,
) -> Result<PersonaConfig, Error> {
    match file {
        Some(path) => PersonaConfig::from_file(path, max_output_tokens, temperature),
        None => {
            let default = PersonaConfig::default();
            PersonaConfig::new(default.system_prompt(), max_output_tokens, temperature)
        }
    }
}
