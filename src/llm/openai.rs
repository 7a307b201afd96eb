use super::ChatCompletion;
use crate::error::CompletionError;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Minimal request/response structs for the Chat Completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessageResponse>,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Per-client request settings.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: f32,
    /// How long to wait before the single retry after HTTP 429.
    pub retry_delay: Duration,
    /// Overall request timeout; `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        ChatOptions {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: None,
        }
    }
}

/// Client for any OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_base_url: String,
    options: ChatOptions,
}

impl OpenAiClient {
    pub fn new(
        api_base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: ChatOptions,
    ) -> Result<Self, CompletionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(OpenAiClient {
            client,
            api_key: api_key.into(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            options,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_base_url)
    }

    /// Run one chat completion with an explicit model and temperature.
    ///
    /// A 429 is retried exactly once after `retry_delay`; whatever the retry
    /// returns is final.
    pub fn chat_completion_with(
        &self,
        system: &str,
        user: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        let req = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
        };

        log::info!("Calling chat completion model {model:?}");

        let mut resp = self.send(&req)?;
        if resp.status() == StatusCode::TOO_MANY_REQUESTS {
            let text = resp.text()?;
            log::trace!("Raw response: {text}");
            log::warn!(
                "Rate limit exceeded. Waiting {}s before retrying once...",
                self.options.retry_delay.as_secs_f32()
            );
            thread::sleep(self.options.retry_delay);
            resp = self.send(&req)?;
        }

        read_content(resp)
    }

    fn send(&self, req: &ChatRequest<'_>) -> Result<Response, CompletionError> {
        let url = self.chat_url();

        log::trace!(
            "Request headers: Content-Type: application/json, Authorization: Bearer {}",
            redact(&self.api_key)
        );
        if log::log_enabled!(log::Level::Trace) {
            let body = serde_json::to_string(req).unwrap_or_default();
            log::trace!("Request body: {body}");
        }

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(req)
            .send()?;

        log::debug!("POST {url} -> HTTP {}", resp.status().as_u16());
        Ok(resp)
    }
}

impl ChatCompletion for OpenAiClient {
    fn chat_completion(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        self.chat_completion_with(system, user, &self.options.model, self.options.temperature)
    }
}

/// Turn a final response into the first choice's text.
fn read_content(resp: Response) -> Result<String, CompletionError> {
    let status = resp.status();
    let text = resp.text()?;

    log::trace!("Raw response: {text}");

    if !status.is_success() {
        return Err(CompletionError::Http {
            status: status.as_u16(),
            body: text,
        });
    }

    extract_content(&text)
}

fn extract_content(body: &str) -> Result<String, CompletionError> {
    let chat_resp: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(format!("invalid JSON: {e}")))?;

    if let Some(usage) = &chat_resp.usage {
        log::info!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        );
    }

    chat_resp
        .choices
        .and_then(|choices| choices.into_iter().next())
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            CompletionError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

/// Keep just enough of a secret to tell keys apart in logs.
fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}
