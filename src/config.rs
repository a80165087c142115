//! Backend and render configuration.

use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::foundation::{color::Color, core::Canvas, error::DogViewResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Gemini REST API.
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Read `GEMINI_API_KEY` (or `API_KEY`), `DOGVIEW_MODEL` and `DOGVIEW_GEMINI_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model: non_empty("DOGVIEW_MODEL").unwrap_or(defaults.model),
            base_url: non_empty("DOGVIEW_GEMINI_URL").unwrap_or(defaults.base_url),
            timeout: defaults.timeout,
        }
    }

    /// `POST` target for one model call, without the key.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Output and overlay options for one render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub show_feet: bool,
    pub vignette: bool,
    /// Skip the vision filter and perspective zoom.
    pub human_view: bool,
    pub skin_tone: Option<Color>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            width: canvas.width,
            height: canvas.height,
            show_feet: true,
            vignette: true,
            human_view: false,
            skin_tone: None,
        }
    }
}

impl RenderSettings {
    pub fn load(path: &Path) -> DogViewResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_str(&text)?;
        settings.canvas()?;
        Ok(settings)
    }

    pub fn canvas(&self) -> DogViewResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/settings.rs"]
mod tests;
