use std::{io, process::ExitCode};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();
    info!("Starting lyric buddy");

    lyric_buddy::error::report(lyric_buddy::run().await, &mut io::stderr())
}
