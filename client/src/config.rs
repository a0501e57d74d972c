use common::Settings;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub max_tokens: u32,
    pub model_id: String,
    pub temperature: f32,
}

impl From<&Settings> for ClientConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            max_tokens: settings.max_tokens,
            model_id: settings.model.clone(),
            temperature: settings.temperature,
        }
    }
}
