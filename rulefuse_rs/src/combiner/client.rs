use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{Result, RulefuseError};

const SYSTEM_PROMPT: &str = "You merge AI coding-assistant rule files. \
Reply with JSON only, following the requested schema.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client. One request per run, no retry.
pub struct RemoteClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl RemoteClient {
    /// Fails with a configuration error when no API key is set, so nothing
    /// touches the network without a credential.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;
        Self::with_http_client(api, client)
    }

    pub(crate) fn with_http_client(api: &ApiConfig, client: Client) -> Result<Self> {
        let api_key = api
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RulefuseError::Configuration("missing API key".to_string()))?
            .to_string();

        Ok(Self {
            client,
            endpoint: api.endpoint.clone(),
            model: api.model.clone(),
            api_key,
            max_tokens: api.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` and return the assistant message text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: 0.2,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            bytes = prompt.len(),
            "sending combine request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let snippet: String = text.chars().take(300).collect();
            return Err(RulefuseError::RemoteCall(format!("HTTP {status}: {snippet}")));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            RulefuseError::ResponseFormat(format!("not a chat-completions response: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| RulefuseError::ResponseFormat("response has no message content".into()))
    }
}
