// one chat round trip: validate, flag, ask the model, always answer

use std::sync::Arc;

use tracing::{info, warn};

use super::ai::ProviderAdapter;
use super::persona::PersonaConfig;
use super::risk::RiskClassifier;
use super::types::{ChatRequest, ChatResponse, ProviderRequest, Turn};
use crate::Error;

pub const FALLBACK_REPLY: &str = "I'm having a little trouble connecting right now, but I'm still here. Could you try saying that again?";

/// how the reply was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    /// the provider call failed, the text is for operators only
    ProviderFailed(String),
    /// no credential was configured, the provider was never called
    Unconfigured,
}

#[derive(Debug, Clone)]
pub struct Relayed {
    pub response: ChatResponse,
    pub outcome: Outcome,
}

impl Relayed {
    pub fn is_fallback(&self) -> bool {
        self.outcome != Outcome::Generated
    }
}

pub struct ChatRelay {
    persona: PersonaConfig,
    provider: Option<Arc<dyn ProviderAdapter>>,
}

impl ChatRelay {
    pub fn new(persona: PersonaConfig, provider: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            persona,
            provider: Some(provider),
        }
    }

    /// a relay with no provider: every valid request gets `Outcome::Unconfigured`
    pub fn unconfigured(persona: PersonaConfig) -> Self {
        Self {
            persona,
            provider: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    /// persona as the system field, then history in order, then the new message
    pub fn build_request(&self, request: &ChatRequest) -> ProviderRequest {
        let mut turns = Vec::with_capacity(request.history.len() + 1);
        turns.extend(request.history.iter().cloned());
        turns.push(Turn::user(request.message.as_str()));

        ProviderRequest {
            system_prompt: self.persona.system_prompt().to_string(),
            turns,
            temperature: self.persona.temperature(),
            max_output_tokens: self.persona.max_output_tokens(),
        }
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<Relayed, Error> {
        if request.message.trim().is_empty() {
            return Err(Error::InvalidInput);
        }

        let session = request.session_id.as_deref().unwrap_or("-");

        // flag before touching the network so a dead provider can't hide it
        let risk_detected = match RiskClassifier::first_match(&request.message) {
            Some(phrase) => {
                info!(session, phrase, "high risk phrase detected");
                true
            }
            None => false,
        };

        let Some(provider) = &self.provider else {
            warn!(session, "no provider credential configured");
            return Ok(fallback(risk_detected, Outcome::Unconfigured));
        };

        let call = self.build_request(&request);

        match provider.generate(&call).await {
            Ok(reply) => {
                info!(
                    session,
                    provider = provider.name(),
                    risk_detected,
                    "reply generated"
                );
                Ok(Relayed {
                    response: ChatResponse {
                        reply,
                        risk_detected,
                    },
                    outcome: Outcome::Generated,
                })
            }
            Err(e) => {
                warn!(
                    session,
                    provider = provider.name(),
                    error = %e,
                    "provider call failed, sending fallback reply"
                );
                Ok(fallback(
                    risk_detected,
                    Outcome::ProviderFailed(e.to_string()),
                ))
            }
        }
    }
}

fn fallback(risk_detected: bool, outcome: Outcome) -> Relayed {
    Relayed {
        response: ChatResponse {
            reply: FALLBACK_REPLY.to_string(),
            risk_detected,
        },
        outcome,
    }
}
