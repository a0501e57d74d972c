use serde::{Deserialize, Serialize};

/// Non-streaming chat completions response.
///
/// Every field is optional so that error-shaped or partial bodies still
/// deserialize; callers decide what a missing reply means.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChatCompletionsResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub created: Option<i64>,
    pub id: Option<String>,
    pub model: Option<String>,
    pub object: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Choice {
    pub finish_reason: Option<String>,
    pub index: Option<i32>,
    pub message: Option<ChoiceMessage>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
    pub role: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Usage {
    pub completion_tokens: i32,
    pub prompt_tokens: i32,
    pub total_tokens: i32,
}

impl ChatCompletionsResponse {
    /// `choices[0].message.content`, if present.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}
