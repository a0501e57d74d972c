use anyhow::{Context, Result};
use config::Config;
use std::path::{Path, PathBuf};

use crate::env::EnvFile;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Path to the sops-encrypted secrets file, relative to the working directory.
    pub secrets_file: PathBuf,
    pub max_tokens: u32,
    pub temperature: f32,
    pub model: String,
    pub api_url: String,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(EnvFile::load(path)?)
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path.display()))?;

        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let secrets_file: String = required(config, "SECRETS_FILE")?;
        let max_tokens = required(config, "MAX_TOKENS")?;
        let temperature = required(config, "TEMPERATURE")?;
        let model = required(config, "MODEL")?;
        let api_url = config
            .get::<String>("api_url")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            secrets_file: PathBuf::from(secrets_file),
            max_tokens,
            temperature,
            model,
            api_url,
        })
    }

    pub fn resolve_secrets_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.secrets_file)
    }
}

fn required<T>(config: &Config, key: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    config
        .get(&key.to_lowercase())
        .with_context(|| format!("Missing or invalid {key} in configuration"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(contents: &str) -> Config {
        Config::builder()
            .add_source(EnvFile::parse(contents))
            .build()
            .unwrap()
    }

    #[test]
    fn from_config_reads_required_keys() {
        let config = config_from(
            "SECRETS_FILE=secrets.json.enc\nMAX_TOKENS=100\nTEMPERATURE=0.7\nMODEL=gpt-4",
        );

        let settings = Settings::from_config(&config).unwrap();

        assert_eq!(settings.secrets_file, PathBuf::from("secrets.json.enc"));
        assert_eq!(settings.max_tokens, 100);
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.model, "gpt-4");
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn from_config_honours_api_url_override() {
        let config = config_from(
            "SECRETS_FILE=s\nMAX_TOKENS=1\nTEMPERATURE=0\nMODEL=m\nAPI_URL=http://localhost:8080/chat/completions",
        );

        let settings = Settings::from_config(&config).unwrap();

        assert_eq!(settings.api_url, "http://localhost:8080/chat/completions");
    }

    #[test]
    fn from_config_fails_on_missing_key() {
        let config = config_from("SECRETS_FILE=s\nMAX_TOKENS=1\nTEMPERATURE=0.5");

        let err = Settings::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("MODEL"));
    }

    #[test]
    fn from_config_fails_on_unparsable_max_tokens() {
        let config = config_from("SECRETS_FILE=s\nMAX_TOKENS=lots\nTEMPERATURE=0.5\nMODEL=m");

        let err = Settings::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn from_config_fails_on_unparsable_temperature() {
        let config = config_from("SECRETS_FILE=s\nMAX_TOKENS=10\nTEMPERATURE=warm\nMODEL=m");

        let err = Settings::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("TEMPERATURE"));
    }

    #[test]
    fn resolve_secrets_path_joins_working_directory() {
        let config = config_from(
            "SECRETS_FILE=config/secrets.json.enc\nMAX_TOKENS=1\nTEMPERATURE=0\nMODEL=m",
        );
        let settings = Settings::from_config(&config).unwrap();

        assert_eq!(
            settings.resolve_secrets_path(Path::new("/work")),
            PathBuf::from("/work/config/secrets.json.enc")
        );
    }
}
