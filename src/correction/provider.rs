use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::CorrectionConfig;
use crate::error::PipelineError;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn generate(&self, model: &str, prompt: String, system: Option<String>) -> Result<String>;
}

/// Google Generative Language API (`generateContent`)
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    /// Build from config, reading the key from the environment.
    pub fn from_env(config: &CorrectionConfig) -> Result<Self> {
        let api_key = config
            .api_key_from_env()
            .ok_or_else(|| PipelineError::MissingApiKey(config.api_key_vars.join(", ")))?;
        Ok(Self::new(config.base_url.clone(), api_key))
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), model)
    }
}

fn request_body(prompt: String, system: Option<String>) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": { "temperature": 0.0 },
    });
    if let Some(sys) = system {
        body["systemInstruction"] = json!({ "parts": [{ "text": sys }] });
    }
    body
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: &Value) -> Result<String> {
    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .context("Failed to parse content from Gemini response")?;
    let text: String = parts.iter().filter_map(|part| part["text"].as_str()).collect();
    if text.trim().is_empty() {
        return Err(PipelineError::EmptyResponse.into());
    }
    Ok(text)
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn generate(&self, model: &str, prompt: String, system: Option<String>) -> Result<String> {
        let url = self.endpoint(model);
        debug!("POST {}", url);

        let res = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt, system))
            .send()
            .await?
            .error_for_status()?;
        let json: Value = res.json().await?;

        extract_text(&json)
    }
}
