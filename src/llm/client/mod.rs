//! LLM客户端 - wraps the single chat-completion endpoint used by every agent

use anyhow::Result;
use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::LLMConfig;

pub mod fallback;
pub mod stream;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use fallback::fallback_response;
pub use types::{ChatMessage, CompletionOptions, Role};

use stream::{SseDecoder, SseEvent};
use types::{ChatCompletionRequest, ChatCompletionResponse};

/// Why a remote completion could not be used
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("response carried no content")]
    EmptyContent,
}

/// Anything that can turn a message list into text.
///
/// Implementations must not fail: callers rely on always getting some text back.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage], options: &CompletionOptions) -> String;
}

/// LLM客户端 - 提供统一的LLM服务接口
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    http: reqwest::Client,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn has_credential(&self) -> bool {
        self.config.has_api_key()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base_url.trim_end_matches('/')
        )
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        options: &'a CompletionOptions,
        stream: bool,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            messages,
            model: options.model.as_deref().unwrap_or(&self.config.model),
            max_completion_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: options.temperature.unwrap_or(self.config.temperature),
            top_p: self.config.top_p,
            stream,
        }
    }

    /// 检查模型连接和功能是否正常
    pub async fn check_connection(&self) -> Result<()> {
        info!("🔄 Checking completion endpoint {}", self.endpoint());
        let messages = [
            ChatMessage::system("You are a UI design expert. Respond with creative design suggestions."),
            ChatMessage::user("Create a modern dashboard design with dark theme"),
        ];
        let options = CompletionOptions::new()
            .with_temperature(0.7)
            .with_max_tokens(500);

        match self.try_complete(&messages, &options).await {
            Ok(_) => {
                info!("✅ Completion endpoint is reachable");
                Ok(())
            }
            Err(e) => {
                warn!("❌ Completion endpoint check failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// One remote attempt, surfacing every failure to the caller
    pub async fn try_complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        if !self.has_credential() {
            return Err(CompletionError::MissingCredential);
        }

        let request = self.build_request(messages, options, false);
        debug!(model = request.model, messages = messages.len(), "sending completion request");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedBody(e.to_string()))?;
        parsed.into_content().ok_or(CompletionError::EmptyContent)
    }

    /// Complete a conversation, degrading to the rule-based reply on any failure
    pub async fn complete(&self, messages: &[ChatMessage], options: &CompletionOptions) -> String {
        match self.try_complete(messages, options).await {
            Ok(content) => content,
            Err(CompletionError::MissingCredential) => {
                info!("No API key configured, answering with the offline fallback");
                fallback_response(messages)
            }
            Err(e) => {
                warn!("⚠️ Completion request failed, answering with the offline fallback: {}", e);
                fallback_response(messages)
            }
        }
    }

    /// Streaming flavour of [`LLMClient::complete`].
    ///
    /// Every text delta is handed to `on_chunk` as it arrives. When the stream
    /// cannot be used, the fallback reply is delivered as a single chunk. A
    /// stream that breaks after some deltas keeps them: the fallback reply is
    /// appended as one more chunk. Returns everything that was delivered.
    pub async fn stream_complete<F>(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
        mut on_chunk: F,
    ) -> String
    where
        F: FnMut(&str) + Send,
    {
        let mut delivered = String::new();
        let mut emit = |text: &str, delivered: &mut String| {
            on_chunk(text);
            delivered.push_str(text);
        };

        let outcome = self
            .try_stream(messages, options, |text| emit(text, &mut delivered))
            .await;

        match outcome {
            Ok(()) if !delivered.is_empty() => delivered,
            Ok(()) => {
                warn!("⚠️ Completion stream ended without content, answering with the offline fallback");
                let reply = fallback_response(messages);
                emit(&reply, &mut delivered);
                delivered
            }
            Err(e) => {
                match e {
                    CompletionError::MissingCredential => {
                        info!("No API key configured, streaming the offline fallback")
                    }
                    other => warn!("⚠️ Completion stream failed, streaming the offline fallback: {}", other),
                }
                let reply = fallback_response(messages);
                emit(&reply, &mut delivered);
                delivered
            }
        }
    }

    async fn try_stream<F>(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
        mut on_delta: F,
    ) -> Result<(), CompletionError>
    where
        F: FnMut(&str) + Send,
    {
        if !self.has_credential() {
            return Err(CompletionError::MissingCredential);
        }

        let request = self.build_request(messages, options, true);
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let mut decoder = SseDecoder::new();
        let mut bytes = response.bytes_stream();
        while let Some(chunk) = bytes.next().await {
            for event in decoder.push(&chunk?) {
                match event {
                    SseEvent::Delta(text) => on_delta(&text),
                    SseEvent::Done => return Ok(()),
                }
            }
        }
        if let Some(SseEvent::Delta(text)) = decoder.finish() {
            on_delta(&text);
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for LLMClient {
    async fn complete(&self, messages: &[ChatMessage], options: &CompletionOptions) -> String {
        LLMClient::complete(self, messages, options).await
    }
}
