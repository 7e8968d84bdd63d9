// google gemini generateContent

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ProviderAdapter, check_status};
use crate::Error;
use crate::core::types::{ProviderRequest, Speaker};

pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    // absent when the candidate was blocked
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl Gemini {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    fn body<'a>(&self, request: &'a ProviderRequest) -> Request<'a> {
        let contents = request
            .turns
            .iter()
            .map(|turn| Content {
                role: Some(match turn.speaker {
                    Speaker::User => "user",
                    Speaker::Assistant => "model",
                }),
                parts: vec![Part { text: &turn.text }],
            })
            .collect();

        Request {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_prompt,
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl ProviderAdapter for Gemini {
    async fn generate(&self, request: &ProviderRequest) -> Result<String, Error> {
        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&self.body(request))
            .send()
            .await?;

        let response: Response = check_status(response).await?.json().await?;

        let text: Vec<String> = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Provider("gemini returned no candidate text".into()));
        }

        Ok(text.join(""))
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
