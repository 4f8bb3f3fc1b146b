//! Blocking client for the remote chat-completion service.
//!
//! One request shape for both workflows: a `json_object`-constrained chat
//! completion, bearer-authenticated, with a hard request timeout and a
//! short doubling backoff on rate limits, 5xx statuses, and transport
//! errors. Anything else fails immediately and the caller's document
//! stays as it was.

use crate::prompt::{self, EDIT_SYSTEM_PROMPT, SEED_MAX};
use crate::{brief::SiteBrief, AiError};
use pagesmith_patch::sanitize;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use std::thread;
use std::time::Duration;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Temperature for differential edits (generation temperature is
/// user-configurable; edits always run slightly conservative).
const EDIT_TEMPERATURE: f32 = 0.8;

/// A freshly generated page. `title`/`meta` from the response are
/// discarded; the page shell is built from the brief instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedPage {
    pub css: String,
    pub body_html: String,
}

/// A differential edit. A blank field signals "no change", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditPatch {
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub body_html: String,
}

/// Client for the generation service.
pub struct GenerationClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl GenerationClient {
    /// Build from `OPENAI_API_KEY` (required) and `OPENAI_API_BASE`
    /// (optional). A missing credential is fatal before any session work.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(AiError::MissingApiKey)?;
        let base_url = env::var("OPENAI_API_BASE")
            .ok()
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(api_key, base_url)
    }

    pub fn new(api_key: String, base_url: String) -> Result<Self, AiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url,
            model: DEFAULT_MODEL.to_string(),
            temperature: 1.0,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Generate a full page from the brief. The returned body is already
    /// sanitized; missing `css`/`body_html` keys are a hard failure.
    pub fn generate(&self, brief: &SiteBrief) -> Result<GeneratedPage, AiError> {
        let seed = rand::thread_rng().gen_range(1..=SEED_MAX);
        let messages = json!([
            { "role": "user", "content": prompt::generation_prompt(brief, seed) },
        ]);
        let content = self.complete(&messages, self.temperature)?;
        let mut page: GeneratedPage = decode(&content)?;
        page.body_html = sanitize(&page.body_html);
        Ok(page)
    }

    /// Ask for a differential edit of the current document. Blank fields
    /// in the response mean "no change"; a non-blank body is sanitized.
    pub fn edit(
        &self,
        css: &str,
        body_html: &str,
        instruction: &str,
    ) -> Result<EditPatch, AiError> {
        let messages = json!([
            { "role": "system", "content": EDIT_SYSTEM_PROMPT },
            { "role": "user", "content": prompt::edit_prompt(css, body_html, instruction) },
        ]);
        let content = self.complete(&messages, EDIT_TEMPERATURE)?;
        let mut patch: EditPatch = decode(&content)?;
        if !patch.body_html.is_empty() {
            patch.body_html = sanitize(&patch.body_html);
        }
        Ok(patch)
    }

    fn complete(&self, messages: &Value, temperature: f32) -> Result<String, AiError> {
        let endpoint = format!("{}/chat/completions", self.base_url);
        let payload = json!({
            "model": self.model,
            "temperature": temperature,
            "response_format": { "type": "json_object" },
            "messages": messages,
        });

        let mut backoff = INITIAL_BACKOFF;
        let mut attempt = 1;
        loop {
            match self.send(&endpoint, &payload) {
                Ok(content) => return Ok(content),
                Err(err) if attempt < MAX_ATTEMPTS && is_retryable(&err) => {
                    log::warn!(
                        "generation request failed (attempt {attempt}/{MAX_ATTEMPTS}), \
                         retrying in {backoff:?}: {err}"
                    );
                    thread::sleep(backoff);
                    backoff *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn send(&self, endpoint: &str, payload: &Value) -> Result<String, AiError> {
        log::debug!("POST {endpoint} (model {})", self.model);
        let response = self
            .http
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            return Err(AiError::Status {
                status: status.as_u16(),
            });
        }

        let completion: Value = response.json()?;
        completion["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AiError::MalformedResponse {
                reason: "completion carries no message content".to_string(),
            })
    }
}

fn decode<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T, AiError> {
    serde_json::from_str(content).map_err(|err| AiError::MalformedResponse {
        reason: err.to_string(),
    })
}

fn is_retryable(err: &AiError) -> bool {
    match err {
        AiError::RateLimited => true,
        // Timeouts and connection faults retry; a body that failed to
        // decode will not improve on a second attempt.
        AiError::Transport(err) => !err.is_decode(),
        AiError::Status { status } => *status >= 500,
        _ => false,
    }
}
