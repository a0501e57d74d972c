use anyhow::{Result, bail};
use async_trait::async_trait;
use request::ChatCompletionsRequest;
use tracing::{debug, error};

/// Delivers a chat completions request and returns the raw response body.
#[async_trait]
pub trait ChatTransport {
    async fn send(&self, request: &ChatCompletionsRequest) -> Result<String>;
}

/// HTTPS transport authenticating with a static bearer token.
pub struct HttpTransport {
    api_key: String,
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: &str, api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatCompletionsRequest) -> Result<String> {
        debug!(
            "Sending chat completions request to {} with model: {}",
            self.url, request.model
        );

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!("Chat completions API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            error!("Chat completions API error: {} - {}", status, body);
            bail!("Chat completions API error: {} - {}", status, body);
        }

        Ok(body)
    }
}
