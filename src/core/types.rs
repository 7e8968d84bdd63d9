// request/response shapes shared by the relay, the providers and the http layer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    #[serde(alias = "model", alias = "bot")]
    Assistant,
}

/// one prior message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(alias = "role")]
    pub speaker: Speaker,
    #[serde(alias = "content")]
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<Turn>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub risk_detected: bool,
}

/// everything a provider needs for one completion.
/// the persona travels in `system_prompt`, never inside `turns`
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub system_prompt: String,
    pub turns: Vec<Turn>,
    pub temperature: f32,
    pub max_output_tokens: u32,
}
