use anyhow::{Context, Result};
use client::{Client, HttpTransport, config::ClientConfig};
use common::Settings;
use secrets::{Decrypt, SopsDecryptor};
use std::{
    io,
    path::{Path, PathBuf},
};
use tracing::info;

pub mod error;
pub mod session;

pub use error::AppError;
pub use session::Session;

pub fn env_file_path(cwd: &Path) -> PathBuf {
    cwd.join("config").join(".env")
}

/// Everything resolved once at startup.
pub struct App {
    pub settings: Settings,
    pub api_key: String,
}

impl App {
    pub fn load(cwd: &Path, decryptor: &dyn Decrypt) -> Result<Self> {
        let settings = Settings::load(&env_file_path(cwd))?;

        let secrets_path = settings.resolve_secrets_path(cwd);
        info!("Resolved secrets file path: {}", secrets_path.display());

        let api_key = secrets::resolve_api_key(decryptor, &secrets_path)?;

        Ok(Self { settings, api_key })
    }

    pub fn client(&self) -> Client<HttpTransport> {
        let transport = HttpTransport::new(&self.settings.api_url, &self.api_key);
        info!("Chat completions endpoint: {}", transport.url());

        Client::new(ClientConfig::from(&self.settings), transport)
    }
}

pub async fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let app = App::load(&cwd, &SopsDecryptor::default())?;
    let client = app.client();

    Session::new(&client, io::stdin().lock(), io::stdout())
        .run()
        .await
}
