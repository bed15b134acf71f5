use super::LlmBackend;
use crate::backends::llm_error::LlmError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct OpenAICompatibleConfig {
    pub name: String,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub chat_api: String,
    pub temperature: Option<f32>,
}

impl Default for OpenAICompatibleConfig {
    fn default() -> Self {
        Self {
            name: "openai".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            chat_api: "/chat/completions".to_string(),
            temperature: None,
        }
    }
}

pub struct OpenAICompatibleBackend {
    client: reqwest::Client,
    config: OpenAICompatibleConfig,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAICompatibleBackend {
    pub fn new(config: OpenAICompatibleConfig) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(15));

        if let Ok(https_proxy) = std::env::var("HTTPS_PROXY")
            && let Ok(proxy) = reqwest::Proxy::https(&https_proxy)
        {
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.chat_api.trim_start_matches('/')
        )
    }

    async fn send_message_attempt(&self, message: &str) -> Result<String, LlmError> {
        if self.config.api_key.is_empty() {
            return Err(LlmError::AuthenticationError {
                message: format!(
                    "{} API key not configured. Set it with: shipdash config set {}_api_key <your_key>",
                    self.config.name, self.config.name
                ),
            });
        }

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: message,
            }],
            max_completion_tokens: 1024,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout { seconds: 120 }
                } else {
                    LlmError::NetworkError {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let error_text = response.text().await.unwrap_or_default();

            return Err(match LlmError::from_status(status.as_u16(), error_text) {
                LlmError::RateLimit { message, .. } => LlmError::RateLimit {
                    retry_after,
                    message,
                },
                other => other,
            });
        }

        let response_data: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse {
                    message: format!("Failed to parse response: {}", e),
                })?;

        response_data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                message: format!("No response content from {}", self.config.name),
            })
    }
}

#[async_trait]
impl LlmBackend for OpenAICompatibleBackend {
    async fn send_message(&self, message: &str) -> Result<String> {
        Ok(self.send_message_attempt(message).await?)
    }

    fn backend_name(&self) -> &str {
        &self.config.name
    }
}
