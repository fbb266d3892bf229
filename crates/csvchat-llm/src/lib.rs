// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod answer;

pub use answer::{APOLOGY, AnswerService, CompletionBackend, build_answer_prompt};

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Blocking client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    http: HttpClient,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Client {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("llm.base_url must not be empty");
        }
        if model.trim().is_empty() {
            bail!("llm.model must not be empty");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            model: model.to_owned(),
            api_key: api_key
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_owned),
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .authorized(self.http.get(format!("{}/models", self.base_url)))
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: ModelsResponse = response.json().context("decode model list")?;
        Ok(parsed.data.into_iter().map(|model| model.id).collect())
    }

    /// Checks the endpoint is reachable and serves the configured model.
    /// Some providers prefix ids with `models/`.
    pub fn ping(&self) -> Result<()> {
        let models = self.list_models()?;
        let exists = models.iter().any(|name| {
            name == &self.model || name.strip_prefix("models/") == Some(self.model.as_str())
        });
        if !exists {
            bail!(
                "model {:?} is not served by {} -- check [llm].model",
                self.model,
                self.base_url
            );
        }
        Ok(())
    }

    pub fn chat_complete(&self, messages: &[Message]) -> Result<String> {
        let request = ChatRequest::new(&self.model, messages);
        let response = self
            .authorized(self.http.post(format!("{}/chat/completions", self.base_url)))
            .json(&request)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: ChatCompletionResponse = response.json().context("decode chat response")?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("no choices in chat response"))?;
        Ok(content)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

impl CompletionBackend for Client {
    fn complete(&self, prompt: &str) -> Result<String> {
        self.chat_complete(&[Message::user(prompt)])
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("timed out waiting for {base_url}");
    }
    anyhow!("cannot reach {base_url} ({error})")
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.message.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), error.message);
    }

    // Google wraps errors in a one-element array.
    if let Ok(parsed) = serde_json::from_str::<Vec<ErrorEnvelope>>(body)
        && let Some(error) = parsed.into_iter().next().and_then(|envelope| envelope.error)
        && !error.message.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), error.message);
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return anyhow!("server error ({}): {}", status.as_u16(), trimmed);
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, messages: &'a [Message]) -> Self {
        Self {
            model,
            messages: messages
                .iter()
                .map(|message| ChatMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
            temperature: 0.2,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelRow>,
}

#[derive(Debug, Deserialize)]
struct ModelRow {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::{Client, Message, Role, clean_error_response};
    use anyhow::Result;
    use reqwest::StatusCode;
    use std::time::Duration;

    #[test]
    fn new_rejects_empty_base_url_and_model() {
        assert!(Client::new("", "m", None, Duration::from_secs(1)).is_err());
        assert!(Client::new("http://x/v1", "  ", None, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn blank_api_key_counts_as_missing() -> Result<()> {
        let client = Client::new("http://x/v1/", "m", Some("  "), Duration::from_secs(1))?;
        assert!(!client.has_api_key());
        assert_eq!(client.base_url(), "http://x/v1");
        Ok(())
    }

    #[test]
    fn debug_output_redacts_api_key() -> Result<()> {
        let client = Client::new("http://x/v1", "m", Some("secret"), Duration::from_secs(1))?;
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
        Ok(())
    }

    #[test]
    fn user_message_helper_sets_role() {
        let message = Message::user("hi");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "hi");
    }

    #[test]
    fn error_envelopes_are_condensed() {
        let openai = clean_error_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"invalid key"}}"#,
        );
        assert_eq!(openai.to_string(), "server error (401): invalid key");

        let google = clean_error_response(
            StatusCode::BAD_REQUEST,
            r#"[{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}]"#,
        );
        assert_eq!(google.to_string(), "server error (400): API key not valid");

        let plain = clean_error_response(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(plain.to_string(), "server error (502): upstream down");

        let opaque = clean_error_response(StatusCode::INTERNAL_SERVER_ERROR, "{not json");
        assert_eq!(opaque.to_string(), "server returned 500");
    }
}
