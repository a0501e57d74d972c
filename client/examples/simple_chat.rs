use anyhow::{Context, Result};
use client::{Client, HttpTransport, config::ClientConfig};
use common::DEFAULT_API_URL;

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;

    let client = Client::new(
        ClientConfig {
            max_tokens: 256,
            model_id: "gpt-4".to_string(),
            temperature: 0.7,
        },
        HttpTransport::new(DEFAULT_API_URL, &api_key),
    );

    println!("Sending request to {}...", client.transport().url());

    let reply = client
        .complete("Main idea: a lighthouse keeper's last night\nStyle details: slow waltz, hopeful")
        .await?;

    println!("{}", reply.unwrap_or_default());

    Ok(())
}
