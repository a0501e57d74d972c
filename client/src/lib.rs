//! # Songwriting chat client
//!
//! Sends one prompt per call to a chat completions endpoint and returns the
//! assistant's reply.
//!
//! ```rust,no_run
//! use client::{Client, HttpTransport, config::ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig {
//!         max_tokens: 100,
//!         model_id: "gpt-4".to_string(),
//!         temperature: 0.7,
//!     };
//!     let transport = HttpTransport::new(
//!         "https://api.openai.com/v1/chat/completions",
//!         "sk-...",
//!     );
//!     let client = Client::new(config, transport);
//!
//!     if let Some(reply) = client.complete("Main idea: rain\nStyle details: folk").await? {
//!         println!("{reply}");
//!     }
//!
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use request::{ChatCompletionsRequest, Message};
use response::ChatCompletionsResponse;
use tracing::{debug, info, warn};

pub mod config;
pub mod transport;

pub use transport::{ChatTransport, HttpTransport};

pub const SONGWRITING_PERSONA: &str = "You're my songwriting partner! I'm going to send you ideas, lyrics, or song concepts. Please help me turn these scraps into lyric ideas. Thanks!";

pub struct Client<T> {
    pub config: config::ClientConfig,
    transport: T,
}

impl<T: ChatTransport> Client<T> {
    pub fn new(config: config::ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The persona system message followed by `prompt` as the user message.
    pub fn build_request(&self, prompt: &str) -> ChatCompletionsRequest {
        ChatCompletionsRequest::builder()
            .model(self.config.model_id.as_str())
            .message(Message::system(SONGWRITING_PERSONA))
            .message(Message::user(prompt))
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build()
    }

    /// Returns `choices[0].message.content`, or `None` when the response is
    /// valid JSON without that path.
    pub async fn complete(&self, prompt: &str) -> Result<Option<String>> {
        info!("Sending prompt to chat completions API: {}", prompt);

        let request = self.build_request(prompt);
        let body = self.transport.send(&request).await?;
        info!("Received response: {}", body);

        extract_reply(&body)
    }
}

/// Fails only when `body` is not JSON at all.
pub fn extract_reply(body: &str) -> Result<Option<String>> {
    let value: serde_json::Value =
        serde_json::from_str(body).context("Failed to parse AI response JSON")?;

    let response = match serde_json::from_value::<ChatCompletionsResponse>(value) {
        Ok(response) => response,
        Err(e) => {
            warn!("Unexpected chat completions response shape: {}", e);
            return Ok(None);
        }
    };

    if let Some(usage) = &response.usage {
        debug!(
            "Usage: prompt_tokens: {}, completion_tokens: {}, total_tokens: {}",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        );
    }

    Ok(response.content().map(str::to_string))
}
