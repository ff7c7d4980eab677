use crate::error::SynthesisError;
use crate::synthesis::{GenerationConfig, TextCompletion};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Value shipped in sample configuration files in place of a real key.
pub const PLACEHOLDER_API_KEY: &str = "SUA_API_KEY_AQUI";

const GENERIC_REMOTE_ERROR: &str = "completion service reported an error";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL` and `GEMINI_BASE_URL`.
    /// Blank values count as unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: non_empty_env("GEMINI_API_KEY"),
            model: non_empty_env("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: non_empty_env("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }

    fn endpoint(&self) -> Result<Url, SynthesisError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SynthesisError::NotConfigured("missing api key".to_string()))?;

        let mut url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        ))?;
        url.query_pairs_mut().append_pair("key", key.trim());
        Ok(url)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestGenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: RequestGenerationConfig,
}

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TextCompletion for GeminiClient {
    fn is_configured(&self) -> bool {
        self.config.has_credential()
    }

    async fn complete(
        &self,
        prompt: &str,
        generation: GenerationConfig,
    ) -> Result<String, SynthesisError> {
        let payload = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: RequestGenerationConfig {
                temperature: generation.temperature,
                max_output_tokens: generation.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.config.endpoint()?)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        // error bodies carry the message we want to surface, so the status is not checked first
        // the request url holds the api key and must not reach error messages
        let body: Value = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        parse_completion(&body)
    }
}

pub(crate) fn parse_completion(body: &Value) -> Result<String, SynthesisError> {
    if let Some(content) = body
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
    {
        return content
            .get("parts")
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(SynthesisError::MalformedResponse);
    }

    if let Some(error) = body.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(GENERIC_REMOTE_ERROR);
        return Err(SynthesisError::Remote(message.to_string()));
    }

    Err(SynthesisError::MalformedResponse)
}
