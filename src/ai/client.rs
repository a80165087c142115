use std::{collections::VecDeque, sync::Mutex};

use serde_json::{Value, json};

use crate::{
    config::GeminiConfig,
    foundation::error::{DogViewError, DogViewResult},
    media::VisualSample,
};

/// One piece of a multimodal prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum Part {
    Text(String),
    InlineImage { mime: String, data: String },
}

impl From<&VisualSample> for Part {
    fn from(sample: &VisualSample) -> Self {
        Self::InlineImage {
            mime: sample.mime.clone(),
            data: sample.data.clone(),
        }
    }
}

/// A single-turn generation request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerateRequest {
    pub parts: Vec<Part>,
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u32>,
    /// When set, the model is asked for `application/json` matching this schema.
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
            ..Self::default()
        }
    }

    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(t) => Some(t.as_str()),
                Part::InlineImage { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, Part::InlineImage { .. }))
    }
}

/// Text generation seam. Implementations report every failure as
/// [`DogViewError::Remote`].
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> DogViewResult<String>;

    fn name(&self) -> &str;
}

/// Google Gemini `generateContent` over REST.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> DogViewResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            DogViewError::validation("Gemini API key not set (GEMINI_API_KEY or API_KEY)")
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DogViewError::remote(format!("http client init failed: {e}")))?;
        Ok(Self {
            http,
            config,
            api_key,
        })
    }
}

/// JSON body for a `generateContent` call.
pub fn request_body(request: &GenerateRequest) -> Value {
    let parts: Vec<Value> = request
        .parts
        .iter()
        .map(|p| match p {
            Part::Text(text) => json!({ "text": text }),
            Part::InlineImage { mime, data } => json!({
                "inlineData": { "mimeType": mime, "data": data }
            }),
        })
        .collect();

    let mut generation = serde_json::Map::new();
    if let Some(t) = request.temperature {
        generation.insert("temperature".into(), json!(t));
    }
    if let Some(n) = request.max_output_tokens {
        generation.insert("maxOutputTokens".into(), json!(n));
    }
    if let Some(schema) = &request.response_schema {
        generation.insert("responseMimeType".into(), json!("application/json"));
        generation.insert("responseSchema".into(), schema.clone());
    }

    let mut body = json!({ "contents": [{ "parts": parts }] });
    if !generation.is_empty() {
        body["generationConfig"] = Value::Object(generation);
    }
    body
}

/// Concatenated text of the first candidate.
pub fn response_text(response: &Value) -> DogViewResult<String> {
    if let Some(error) = response.get("error") {
        let msg = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown Gemini API error");
        return Err(DogViewError::remote(format!("Gemini API error: {msg}")));
    }

    let parts = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.pointer("/content/parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| DogViewError::remote("no candidates in Gemini response"))?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();
    if text.is_empty() {
        return Err(DogViewError::remote("Gemini response has no text"));
    }
    Ok(text)
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiClient {
    #[tracing::instrument(skip_all, fields(model = %self.config.model, image = request.has_image()))]
    async fn generate(&self, request: &GenerateRequest) -> DogViewResult<String> {
        let body = request_body(request);
        let response = self
            .http
            .post(self.config.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| DogViewError::remote(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DogViewError::remote(format!("reading response failed: {e}")))?;
        if !status.is_success() {
            return Err(DogViewError::remote(format!(
                "Gemini API error ({status}): {}",
                text.chars().take(500).collect::<String>()
            )));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| DogViewError::remote(format!("unparseable Gemini response: {e}")))?;
        tracing::debug!(usage = ?json.get("usageMetadata"), "gemini call complete");
        response_text(&json)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Always fails, so callers land on their fallbacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineBackend;

#[async_trait::async_trait]
impl GenerativeBackend for OfflineBackend {
    async fn generate(&self, _request: &GenerateRequest) -> DogViewResult<String> {
        Err(DogViewError::remote("offline: no generative backend configured"))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Replays canned replies in order and records what it was asked. Runs dry into
/// remote errors.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<DogViewResult<String>>>,
    seen: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedBackend {
    pub fn new(replies: impl IntoIterator<Item = DogViewResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, reply: DogViewResult<String>) {
        if let Ok(mut q) = self.replies.lock() {
            q.push_back(reply);
        }
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate(&self, request: &GenerateRequest) -> DogViewResult<String> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request.clone());
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut q| q.pop_front())
            .unwrap_or_else(|| Err(DogViewError::remote("scripted backend exhausted")))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ai/client.rs"]
mod tests;
