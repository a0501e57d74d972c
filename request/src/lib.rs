use serde::{Deserialize, Serialize};

pub mod message;

pub use message::{Message, Role};

/// Body of a `POST /chat/completions` call.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatCompletionsRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatCompletionsRequest {
    pub fn builder() -> ChatCompletionsRequestBuilder {
        ChatCompletionsRequestBuilder::default()
    }
}

#[derive(Default)]
pub struct ChatCompletionsRequestBuilder {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletionsRequestBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build(self) -> ChatCompletionsRequest {
        ChatCompletionsRequest {
            model: self.model,
            messages: self.messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
