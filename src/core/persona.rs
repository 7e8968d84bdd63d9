// the assistant's persona - loaded once at startup, never changed after

use std::path::Path;

use crate::Error;

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a supportive, empathetic, and calm conversational assistant for a suicide prevention help line application.
Your goal is to listen, provide comfort, and encourage the user to seek professional help if they are in danger.
You are NOT a therapist and you are NOT a medical professional. Do NOT give medical advice or diagnosis.

Rules:
1. Be non-judgmental, patient, and warm.
2. Keep responses relatively short (2-4 sentences usually) to encourage dialogue, unless a longer explanation is needed for comfort.
3. If the user expresses intent to harm themselves or others, or is in immediate danger:
   - Prioritize safety.
   - Gently but clearly urge them to contact emergency services or a helpline.
   - Do NOT try to "solve" their crisis alone.
4. Voice tone: Your text matches a calm, slow-paced voice. Avoid using too many emojis or internet slang. Use soothing language.
5. If asked if you are a human, clarify that you are an AI companion here to support them.

Example of a safety response:
"I hear how much pain you are in, and I am concerned for your safety. Please, reach out to a crisis helpline or emergency services right now. There are people who want to support you through this.""#;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct PersonaConfig {
    system_prompt: String,
    max_output_tokens: u32,
    temperature: f32,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl PersonaConfig {
    pub fn new(
        system_prompt: impl Into<String>,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<Self, Error> {
        let system_prompt = system_prompt.into();

        if system_prompt.trim().is_empty() {
            return Err(Error::Config("system prompt is empty".into()));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(Error::Config(format!(
                "temperature must be between 0 and 1, got {temperature}"
            )));
        }
        if max_output_tokens == 0 {
            return Err(Error::Config("max output tokens must be positive".into()));
        }

        Ok(Self {
            system_prompt,
            max_output_tokens,
            temperature,
        })
    }

    /// read the system prompt from a file, keep the given sampling settings
    pub fn from_file(
        path: impl AsRef<Path>,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        let prompt = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("can't read persona file {}: {e}", path.display()))
        })?;

        Self::new(prompt.trim(), max_output_tokens, temperature)
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}
