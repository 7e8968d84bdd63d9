// anthropic messages api

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ProviderAdapter, check_status, role};
use crate::Error;
use crate::core::types::{ProviderRequest, Speaker};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct Claude {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

// what we send to claude
#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

// what claude sends back
#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    content: Vec<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    text: Option<String>,
}

impl Claude {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    fn body<'a>(&'a self, request: &'a ProviderRequest) -> Request<'a> {
        Request {
            model: &self.model,
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
            system: &request.system_prompt,
            messages: merge_turns(request),
        }
    }
}

// claude wants user/assistant to alternate, so back-to-back turns
// from the same speaker get folded into one message
fn merge_turns(request: &ProviderRequest) -> Vec<Message> {
    let mut messages: Vec<Message> = Vec::with_capacity(request.turns.len());
    let mut last: Option<Speaker> = None;

    for turn in &request.turns {
        if last == Some(turn.speaker)
            && let Some(prev) = messages.last_mut()
        {
            prev.content.push_str("\n\n");
            prev.content.push_str(&turn.text);
        } else {
            messages.push(Message {
                role: role(turn.speaker),
                content: turn.text.clone(),
            });
        }
        last = Some(turn.speaker);
    }

    messages
}

#[async_trait]
impl ProviderAdapter for Claude {
    async fn generate(&self, request: &ProviderRequest) -> Result<String, Error> {
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&self.body(request))
            .send()
            .await?;

        let response: Response = check_status(response).await?.json().await?;

        // only text blocks count, anything else is a malformed reply for us
        let text: Vec<String> = response
            .content
            .into_iter()
            .filter_map(|c| c.text)
            .collect();
        if text.is_empty() {
            return Err(Error::Provider("claude returned no text content".into()));
        }

        Ok(text.join(""))
    }

    fn name(&self) -> &str {
        "claude"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
