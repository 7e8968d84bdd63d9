// openai chat completions - also works for any compatible endpoint

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ProviderAdapter, check_status, role};
use crate::Error;
use crate::core::types::ProviderRequest;

pub struct OpenAi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAi {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    // system prompt goes first as a native system message
    fn body<'a>(&'a self, request: &'a ProviderRequest) -> Request<'a> {
        let mut messages = Vec::with_capacity(request.turns.len() + 1);
        messages.push(Message {
            role: "system",
            content: &request.system_prompt,
        });
        messages.extend(request.turns.iter().map(|turn| Message {
            role: role(turn.speaker),
            content: &turn.text,
        }));

        Request {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_output_tokens,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAi {
    async fn generate(&self, request: &ProviderRequest) -> Result<String, Error> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .await?;

        let response: Response = check_status(response).await?.json().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Provider("openai returned no message content".into()))
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
