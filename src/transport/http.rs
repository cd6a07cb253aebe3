//! HTTP client for the assistant service

use super::{ChatService, TransportError};
use crate::conversation::Message;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Talks to the assistant service over JSON/HTTP.
///
/// The client keeps a cookie jar so the service can key its conversation
/// history to this session across calls.
pub struct HttpChatService {
    client: Client,
    chat_url: String,
    reset_url: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    /// Always sent, always null
    tools: Option<Vec<String>>,
}

impl HttpChatService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            chat_url: format!("{base_url}/chat"),
            reset_url: format!("{base_url}/reset"),
            base_url,
        })
    }

    async fn read_message(response: reqwest::Response) -> Result<Message, TransportError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            TransportError::decode(format!("Failed to parse response: {e} - body: {body}"))
        })
    }
}

fn classify_status(status: StatusCode, body: &str) -> TransportError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            TransportError::timeout(format!("HTTP {status}: {body}"))
        }
        _ => TransportError::server(status.as_u16(), body),
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn chat(&self, text: &str) -> Result<Message, TransportError> {
        let request = ChatRequest {
            message: text,
            tools: None,
        };
        let response = self.client.post(&self.chat_url).json(&request).send().await?;
        Self::read_message(response).await
    }

    async fn reset(&self) -> Result<Message, TransportError> {
        let response = self.client.post(&self.reset_url).send().await?;
        Self::read_message(response).await
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
